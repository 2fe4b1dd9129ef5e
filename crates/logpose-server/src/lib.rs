//! logpose-server: REST surface over the waypoint store.
//!
//! Public reads for players, secret-gated writes for the admin. State lives
//! in an `Arc<dyn WaypointStore>` handed to [`router::build_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use logpose_core::{ports::WaypointStore, seeds, store::InMemoryWaypointStore};

use crate::config::ServerConfig;

/// Seed the in-memory store from the configured file, or the built-in route.
pub fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn WaypointStore>> {
    let store = match &config.waypoints_file {
        Some(path) => {
            let drafts = seeds::load_drafts(path)?;
            let store = InMemoryWaypointStore::new(drafts)?;
            tracing::info!("Loaded seed route from {}", path.display());
            store
        }
        None => InMemoryWaypointStore::with_default_seeds(),
    };
    Ok(Arc::new(store))
}
