//! Compass engine: great-circle bearing and distance between two WGS84
//! points, plus the values the player display needs to draw the needle.
//!
//! Everything here is a pure function over `f64`. Earth is treated as a
//! sphere; range validation is the caller's job (see [`crate::sensor`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensor::{DeviceHeading, LivePosition};
use crate::types::GeoPoint;

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Initial bearing from point 1 to point 2, degrees clockwise from true
/// north in `[0, 360)`. Coincident points yield 0.
pub fn compute_bearing(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    if lat1 == lat2 && lng1 == lng2 {
        return 0.0;
    }

    let d_lng = (lng2 - lng1).to_radians();
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();

    let y = d_lng.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lng.cos();
    if y == 0.0 && x == 0.0 {
        // both points on the same pole
        return 0.0;
    }

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Haversine distance in meters.
pub fn compute_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // near-antipodal inputs can push `a` a hair past 1
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

// ── Direction label ───────────────────────────────────────────

/// Eight-point compass rose. Each point owns a 45° sector centred on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn from_bearing(bearing: f64) -> Self {
        let sector = ((bearing / 45.0).round() as i64).rem_euclid(8);
        Self::ALL[sector as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn direction_label(bearing: f64) -> Direction {
    Direction::from_bearing(bearing)
}

/// Rotation to apply to the needle graphic: `bearing - heading`.
///
/// Deliberately left unnormalized so a rotation animation never snaps when
/// the value crosses the 0/360 seam. A missing heading counts as north.
pub fn needle_rotation(bearing: f64, heading: Option<DeviceHeading>) -> f64 {
    bearing - heading.unwrap_or(DeviceHeading::NORTH).degrees()
}

// ── Distance formatting ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
}

impl DistanceUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormattedDistance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl fmt::Display for FormattedDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DistanceUnit::Meters => write!(f, "{:.0} {}", self.value, self.unit.as_str()),
            DistanceUnit::Kilometers => write!(f, "{:.1} {}", self.value, self.unit.as_str()),
        }
    }
}

/// Whole meters below 1 km, kilometers with one decimal from 1 km up.
pub fn format_distance(distance_m: f64) -> FormattedDistance {
    if distance_m < 1000.0 {
        FormattedDistance {
            value: distance_m.round(),
            unit: DistanceUnit::Meters,
        }
    } else {
        FormattedDistance {
            value: (distance_m / 100.0).round() / 10.0,
            unit: DistanceUnit::Kilometers,
        }
    }
}

// ── Reading ───────────────────────────────────────────────────

/// Everything the display shows for one (position, target, heading) triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompassReading {
    pub bearing_degrees: f64,
    pub distance_meters: f64,
    pub needle_rotation_degrees: f64,
    pub direction_label: Direction,
    pub distance: FormattedDistance,
}

pub fn compute_reading(
    position: LivePosition,
    target: &GeoPoint,
    heading: Option<DeviceHeading>,
) -> CompassReading {
    let bearing = compute_bearing(position.lat, position.lng, target.lat, target.lng);
    let distance = compute_distance(position.lat, position.lng, target.lat, target.lng);

    CompassReading {
        bearing_degrees: bearing,
        distance_meters: distance,
        needle_rotation_degrees: needle_rotation(bearing, heading),
        direction_label: direction_label(bearing),
        distance: format_distance(distance),
    }
}
