//! Wire types for the REST surface, shared by `logpose-server` and the
//! `logpose` client.
//!
//! Responses carry a `success` flag and camelCase keys so existing browser
//! frontends keep working. Requests are parsed in two steps: serde accepts
//! any shape for the payload fields, then the typed accessors below turn
//! them into values or an `InvalidInput` error. The shared secret is thus
//! checkable before the payload is judged.

use serde::{Deserialize, Serialize};

use crate::error::LogPoseError;
use crate::types::{CurrentWaypoint, GeoPoint, WaypointDraft, WaypointSnapshot};

// ── Responses ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWaypointResponse {
    pub success: bool,
    pub location: GeoPoint,
    pub index: usize,
    pub total: usize,
}

impl From<CurrentWaypoint> for CurrentWaypointResponse {
    fn from(c: CurrentWaypoint) -> Self {
        Self {
            success: true,
            location: c.location,
            index: c.index,
            total: c.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointsResponse {
    pub success: bool,
    pub locations: Vec<GeoPoint>,
    pub current_index: usize,
}

impl From<WaypointSnapshot> for WaypointsResponse {
    fn from(s: WaypointSnapshot) -> Self {
        Self {
            success: true,
            locations: s.locations,
            current_index: s.current_index,
        }
    }
}

/// Reply to a successful index change. Mirrors [`CurrentWaypointResponse`]
/// without the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveResponse {
    pub success: bool,
    pub location: GeoPoint,
    pub index: usize,
}

impl From<CurrentWaypoint> for SetActiveResponse {
    fn from(c: CurrentWaypoint) -> Self {
        Self {
            success: true,
            location: c.location,
            index: c.index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ── Requests ──────────────────────────────────────────────────

/// `POST /api/current`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub location_index: Option<serde_json::Value>,
}

impl SetActiveRequest {
    pub fn new(password: impl Into<String>, index: usize) -> Self {
        Self {
            password: password.into(),
            location_index: Some(serde_json::Value::from(index)),
        }
    }

    /// The requested index as a non-negative whole number. Range against the
    /// list length is the store's check.
    pub fn index(&self) -> Result<usize, LogPoseError> {
        let raw = self
            .location_index
            .as_ref()
            .ok_or_else(|| LogPoseError::InvalidInput("locationIndex is required".into()))?;
        raw.as_u64()
            .or_else(|| {
                // JSON clients may send `1.0`; any whole, non-negative number counts.
                raw.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| {
                LogPoseError::InvalidInput(format!(
                    "locationIndex must be a non-negative integer, got {raw}"
                ))
            })
    }
}

/// `POST /api/locations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplaceWaypointsRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub locations: Option<serde_json::Value>,
}

impl ReplaceWaypointsRequest {
    pub fn new(
        password: impl Into<String>,
        drafts: &[WaypointDraft],
    ) -> Result<Self, LogPoseError> {
        let locations =
            serde_json::to_value(drafts).map_err(|e| LogPoseError::Internal(e.into()))?;
        Ok(Self {
            password: password.into(),
            locations: Some(locations),
        })
    }

    /// The drafts, or an error if `locations` is missing, not an array, or
    /// holds a malformed entry. Emptiness and ranges are checked by the store.
    pub fn drafts(&self) -> Result<Vec<WaypointDraft>, LogPoseError> {
        let raw = self
            .locations
            .as_ref()
            .ok_or_else(|| LogPoseError::InvalidInput("locations is required".into()))?;
        let items = raw
            .as_array()
            .ok_or_else(|| LogPoseError::InvalidInput("locations must be an array".into()))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<WaypointDraft>(item.clone()).map_err(|e| {
                    LogPoseError::InvalidInput(format!("location {}: {e}", i + 1))
                })
            })
            .collect()
    }
}

/// `POST /api/auth/verify`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_response_uses_wire_names() {
        let resp = CurrentWaypointResponse::from(CurrentWaypoint {
            location: GeoPoint {
                id: 2,
                name: "Sion".into(),
                lat: 50.9402,
                lng: 6.9538,
            },
            index: 1,
            total: 9,
        });
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "success": true,
                "location": { "id": 2, "name": "Sion", "lat": 50.9402, "lng": 6.9538 },
                "index": 1,
                "total": 9
            })
        );
    }

    #[test]
    fn waypoints_response_camel_case_index() {
        let resp = WaypointsResponse::from(WaypointSnapshot {
            locations: vec![],
            current_index: 3,
        });
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["currentIndex"], 3);
        assert_eq!(v["success"], true);
    }

    #[test]
    fn set_active_index_parsing() {
        let req: SetActiveRequest =
            serde_json::from_value(json!({ "password": "pw", "locationIndex": 4 })).unwrap();
        assert_eq!(req.index().unwrap(), 4);

        for bad in [json!(-1), json!(-2.0), json!(1.5), json!(1e300), json!("2"), json!(null)] {
            let req: SetActiveRequest =
                serde_json::from_value(json!({ "password": "pw", "locationIndex": bad })).unwrap();
            assert!(
                matches!(req.index(), Err(LogPoseError::InvalidInput(_))),
                "accepted {:?}",
                req.location_index
            );
        }

        let whole: SetActiveRequest =
            serde_json::from_value(json!({ "password": "pw", "locationIndex": 1.0 })).unwrap();
        assert_eq!(whole.index().unwrap(), 1);

        let negative_zero: SetActiveRequest =
            serde_json::from_value(json!({ "password": "pw", "locationIndex": -0.0 })).unwrap();
        assert_eq!(negative_zero.index().unwrap(), 0);

        let missing: SetActiveRequest = serde_json::from_value(json!({})).unwrap();
        assert!(missing.password.is_empty());
        assert!(missing.index().is_err());
    }

    #[test]
    fn set_active_request_round_trips_through_constructor() {
        let req = SetActiveRequest::new("pw", 7);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "password": "pw", "locationIndex": 7 }));
    }

    #[test]
    fn replace_request_drafts() {
        let req: ReplaceWaypointsRequest = serde_json::from_value(json!({
            "password": "pw",
            "locations": [
                { "name": "A", "lat": 1.0, "lng": 2.0 },
                { "lat": "3.5", "lng": "4.5" }
            ]
        }))
        .unwrap();
        let drafts = req.drafts().unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].name, None);
    }

    #[test]
    fn replace_request_rejects_bad_shapes() {
        let not_array: ReplaceWaypointsRequest =
            serde_json::from_value(json!({ "password": "pw", "locations": { "a": 1 } })).unwrap();
        assert!(not_array.drafts().is_err());

        let bad_entry: ReplaceWaypointsRequest = serde_json::from_value(json!({
            "password": "pw",
            "locations": [{ "name": "no coords" }]
        }))
        .unwrap();
        let err = bad_entry.drafts().unwrap_err();
        assert!(err.to_string().contains("location 1"));

        let missing: ReplaceWaypointsRequest =
            serde_json::from_value(json!({ "password": "pw" })).unwrap();
        assert!(missing.drafts().is_err());
    }

    #[test]
    fn error_response_shape() {
        let v = serde_json::to_value(ErrorResponse::new("wrong admin secret")).unwrap();
        assert_eq!(v, json!({ "success": false, "error": "wrong admin secret" }));
    }
}
