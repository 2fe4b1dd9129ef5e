//! In-memory waypoint store.
//!
//! One `RwLock` guards the list and the pointer together, so a replace and
//! the index clamp that follows it land as a single swap. Writers are applied
//! in lock order (last write wins); readers never see a half-applied replace.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::LogPoseError;
use crate::ports::{Result, WaypointStore};
use crate::seeds;
use crate::types::{build_waypoints, CurrentWaypoint, GeoPoint, WaypointDraft, WaypointSnapshot};

#[derive(Debug)]
struct StoreState {
    waypoints: Vec<GeoPoint>,
    active: usize,
}

impl StoreState {
    fn current(&self) -> CurrentWaypoint {
        CurrentWaypoint {
            location: self.waypoints[self.active].clone(),
            index: self.active,
            total: self.waypoints.len(),
        }
    }

    fn snapshot(&self) -> WaypointSnapshot {
        WaypointSnapshot {
            locations: self.waypoints.clone(),
            current_index: self.active,
        }
    }
}

#[derive(Debug)]
pub struct InMemoryWaypointStore {
    state: RwLock<StoreState>,
}

impl InMemoryWaypointStore {
    /// Build a store from drafts. Fails on an empty or invalid list.
    pub fn new(drafts: Vec<WaypointDraft>) -> Result<Self> {
        let waypoints = build_waypoints(drafts)?;
        Ok(Self {
            state: RwLock::new(StoreState {
                waypoints,
                active: 0,
            }),
        })
    }

    /// Store seeded with the built-in route.
    pub fn with_default_seeds() -> Self {
        Self {
            state: RwLock::new(StoreState {
                waypoints: seeds::default_waypoints(),
                active: 0,
            }),
        }
    }
}

#[async_trait]
impl WaypointStore for InMemoryWaypointStore {
    async fn current(&self) -> Result<CurrentWaypoint> {
        Ok(self.state.read().await.current())
    }

    async fn all(&self) -> Result<WaypointSnapshot> {
        Ok(self.state.read().await.snapshot())
    }

    async fn set_active(&self, index: usize) -> Result<CurrentWaypoint> {
        let mut state = self.state.write().await;
        let total = state.waypoints.len();
        if index >= total {
            return Err(LogPoseError::InvalidInput(format!(
                "location index {index} out of range (0..{total})"
            )));
        }
        state.active = index;
        tracing::debug!(index, name = %state.waypoints[index].name, "active waypoint set");
        Ok(state.current())
    }

    async fn replace(&self, drafts: Vec<WaypointDraft>) -> Result<WaypointSnapshot> {
        // Validate before taking the write lock; nothing mutates on error.
        let waypoints = build_waypoints(drafts)?;

        let mut state = self.state.write().await;
        state.waypoints = waypoints;
        if state.active >= state.waypoints.len() {
            tracing::debug!(
                previous = state.active,
                len = state.waypoints.len(),
                "active index out of range after replace, resetting to 0"
            );
            state.active = 0;
        }
        Ok(state.snapshot())
    }
}
