//! Port traits: the store interface the server and tests program against.
//!
//! The in-memory implementation lives in [`crate::store`]; anything that can
//! hold an ordered list plus an active index can stand in for it.

use async_trait::async_trait;

use crate::error::LogPoseError;
use crate::types::{CurrentWaypoint, WaypointDraft, WaypointSnapshot};

pub type Result<T> = std::result::Result<T, LogPoseError>;

/// Ordered waypoint list with a single active pointer.
///
/// Implementations keep the list non-empty and the index in range at all
/// times. Rejected calls leave state untouched.
#[async_trait]
pub trait WaypointStore: Send + Sync {
    /// The active waypoint, its index and the list length.
    async fn current(&self) -> Result<CurrentWaypoint>;

    /// Every waypoint plus the active index.
    async fn all(&self) -> Result<WaypointSnapshot>;

    /// Move the pointer. `index` must satisfy `0 <= index < len`.
    async fn set_active(&self, index: usize) -> Result<CurrentWaypoint>;

    /// Swap in a new list. Ids are reassigned from 1; the pointer falls back
    /// to 0 when it no longer fits.
    async fn replace(&self, drafts: Vec<WaypointDraft>) -> Result<WaypointSnapshot>;
}
