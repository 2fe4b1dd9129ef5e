//! Client side of Log Pose: a typed HTTP client for the REST API plus the
//! player loop and admin commands the `logpose` binary wires to its CLI.

pub mod admin;
pub mod client;
pub mod feed;
pub mod player;
