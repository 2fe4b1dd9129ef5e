//! Admin-side view of the route: where the pointer is, where it can move,
//! and how far along the group is.

use serde::Serialize;

use crate::error::LogPoseError;
use crate::types::{GeoPoint, WaypointSnapshot};

/// How a waypoint relates to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    Finish,
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    /// 1-based position of the active waypoint.
    pub position: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    waypoints: Vec<GeoPoint>,
    current: usize,
}

impl RoutePlan {
    pub fn new(waypoints: Vec<GeoPoint>, current: usize) -> Result<Self, LogPoseError> {
        if waypoints.is_empty() {
            return Err(LogPoseError::InvalidInput("route has no waypoints".into()));
        }
        if current >= waypoints.len() {
            return Err(LogPoseError::InvalidInput(format!(
                "active index {current} out of range (0..{})",
                waypoints.len()
            )));
        }
        Ok(Self { waypoints, current })
    }

    pub fn from_snapshot(snapshot: WaypointSnapshot) -> Result<Self, LogPoseError> {
        Self::new(snapshot.locations, snapshot.current_index)
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &GeoPoint {
        &self.waypoints[self.current]
    }

    /// Index after the active one; `None` at the last waypoint.
    pub fn next(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.waypoints.len()).then_some(next)
    }

    /// Index before the active one; `None` at the first waypoint.
    pub fn previous(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    pub fn reset(&self) -> usize {
        0
    }

    pub fn progress(&self) -> Progress {
        let total = self.waypoints.len();
        Progress {
            total,
            position: self.current + 1,
            remaining: total - self.current - 1,
        }
    }

    /// Endpoints are always labelled as such, even when active.
    pub fn stage(&self, index: usize) -> Stage {
        if index == 0 {
            Stage::Start
        } else if index + 1 == self.waypoints.len() {
            Stage::Finish
        } else if index < self.current {
            Stage::Completed
        } else if index == self.current {
            Stage::Active
        } else {
            Stage::Pending
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = (usize, &GeoPoint, Stage)> + '_ {
        self.waypoints
            .iter()
            .enumerate()
            .map(move |(i, p)| (i, p, self.stage(i)))
    }
}
