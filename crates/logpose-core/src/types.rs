//! Waypoint data model shared by the store, the server and the client.

use serde::{Deserialize, Serialize};

use crate::error::LogPoseError;

// ── GeoPoint ──────────────────────────────────────────────────

/// A named point in the reveal sequence. `id` is 1-based and reassigned
/// whenever the list is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Reject non-finite or out-of-range WGS84 coordinates.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), LogPoseError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(LogPoseError::InvalidInput(format!(
            "latitude {lat} outside [-90, 90]"
        )));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(LogPoseError::InvalidInput(format!(
            "longitude {lng} outside [-180, 180]"
        )));
    }
    Ok(())
}

// ── Drafts (replace payload) ──────────────────────────────────

/// A coordinate as admin tooling sends it: either a JSON number or a numeric
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    /// The finite value, if this input carries one.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for CoordinateInput {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// One element of a replace request, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: CoordinateInput,
    pub lng: CoordinateInput,
}

impl WaypointDraft {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: Some(name.into()),
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Validate and turn the draft into the `id`-th waypoint (1-based).
    /// A missing or blank name becomes `Location {id}`.
    pub fn into_point(self, id: u32) -> Result<GeoPoint, LogPoseError> {
        let lat = self.lat.value().ok_or_else(|| {
            LogPoseError::InvalidInput(format!("waypoint {id}: lat is not a number"))
        })?;
        let lng = self.lng.value().ok_or_else(|| {
            LogPoseError::InvalidInput(format!("waypoint {id}: lng is not a number"))
        })?;
        validate_coordinates(lat, lng)
            .map_err(|e| LogPoseError::InvalidInput(format!("waypoint {id}: {e}")))?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Location {id}"));

        Ok(GeoPoint { id, name, lat, lng })
    }
}

impl From<&GeoPoint> for WaypointDraft {
    fn from(p: &GeoPoint) -> Self {
        Self::new(p.name.clone(), p.lat, p.lng)
    }
}

/// Validate a whole list and assign ids 1..=n. Nothing is returned unless
/// every draft is valid.
pub fn build_waypoints(drafts: Vec<WaypointDraft>) -> Result<Vec<GeoPoint>, LogPoseError> {
    if drafts.is_empty() {
        return Err(LogPoseError::InvalidInput(
            "waypoint list must not be empty".into(),
        ));
    }
    drafts
        .into_iter()
        .zip(1u32..)
        .map(|(draft, id)| draft.into_point(id))
        .collect()
}

// ── Store views ───────────────────────────────────────────────

/// The active waypoint together with its position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWaypoint {
    pub location: GeoPoint,
    pub index: usize,
    pub total: usize,
}

/// The full list and the active index.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSnapshot {
    pub locations: Vec<GeoPoint>,
    pub current_index: usize,
}
