//! Log Pose core: pure domain logic for the location-reveal game.
//!
//! - [`compass`]: bearing, distance, direction label, needle rotation
//! - [`sensor`]: canonical position/heading inputs
//! - [`display`]: player-side input state and readings
//! - [`route`]: admin-side navigation over the waypoint list
//! - [`ports`] / [`store`]: the waypoint store interface and its in-memory implementation
//! - [`proto`]: REST request/response types
//!
//! No HTTP, no I/O beyond reading seed files.

pub mod compass;
pub mod display;
pub mod error;
pub mod ports;
pub mod proto;
pub mod route;
pub mod seeds;
pub mod sensor;
pub mod store;
pub mod types;

pub use compass::{CompassReading, Direction};
pub use error::LogPoseError;
pub use types::{GeoPoint, WaypointDraft};
