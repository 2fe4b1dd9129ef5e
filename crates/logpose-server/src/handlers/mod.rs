pub mod health;
pub mod waypoints;
