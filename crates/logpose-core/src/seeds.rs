//! Seed routes.
//!
//! The store starts from the built-in Cologne route unless a seed file is
//! configured. Seed files are YAML (plain JSON arrays parse too) holding a
//! list of `{name, lat, lng}` entries.

use std::path::Path;

use anyhow::Context;

use crate::types::{GeoPoint, WaypointDraft};

const DEFAULT_ROUTE: &[(&str, f64, f64)] = &[
    ("Cappuccino Time", 51.23047926785446, 6.746243947748435),
    ("Kneipe 1 - Päffgen Brauhaus", 50.9388, 6.9529),
    ("Kneipe 2 - Brauerei zur Malzmühle", 50.9356, 6.9602),
    ("Kneipe 3 - Peters Brauhaus", 50.9363, 6.9577),
    ("Kneipe 4 - Gilden im Zims", 50.9385, 6.9542),
    ("Kneipe 5 - Früh am Dom", 50.9412, 6.9581),
    ("Kneipe 6 - Gaffel am Dom", 50.9418, 6.9572),
    ("Kneipe 7 - Sion Brauhaus", 50.9402, 6.9538),
    ("Endpunkt - Heumarkt", 50.9358, 6.9611),
];

pub fn default_waypoints() -> Vec<GeoPoint> {
    DEFAULT_ROUTE
        .iter()
        .zip(1u32..)
        .map(|(&(name, lat, lng), id)| GeoPoint {
            id,
            name: name.to_string(),
            lat,
            lng,
        })
        .collect()
}

/// Parse a seed document. Validation happens when the drafts are built.
pub fn parse_drafts(text: &str) -> anyhow::Result<Vec<WaypointDraft>> {
    serde_yaml::from_str(text).context("seed document is not a list of {name, lat, lng}")
}

pub fn load_drafts(path: &Path) -> anyhow::Result<Vec<WaypointDraft>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    parse_drafts(&text).with_context(|| format!("invalid seed file {}", path.display()))
}
