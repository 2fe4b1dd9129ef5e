//! Sensor adapter: turns raw device samples into the canonical inputs the
//! compass engine consumes.
//!
//! Orientation sensors disagree on convention: iOS reports a compass heading
//! (clockwise from north) while Android reports `alpha` (counter-clockwise).
//! Both are normalized here into a [`DeviceHeading`] so the engine never
//! branches on platform.

use serde::{Deserialize, Serialize};

use crate::error::LogPoseError;
use crate::types::validate_coordinates;

/// The device's last reported location. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LivePosition {
    pub lat: f64,
    pub lng: f64,
}

impl LivePosition {
    pub fn new(lat: f64, lng: f64) -> Result<Self, LogPoseError> {
        validate_coordinates(lat, lng)?;
        Ok(Self { lat, lng })
    }
}

/// Degrees clockwise from north in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceHeading(f64);

impl DeviceHeading {
    pub const NORTH: DeviceHeading = DeviceHeading(0.0);

    pub fn from_degrees(degrees: f64) -> Result<Self, LogPoseError> {
        if !degrees.is_finite() {
            return Err(LogPoseError::InvalidInput(format!(
                "heading {degrees} is not a finite angle"
            )));
        }
        Ok(Self(wrap_360(degrees)))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// A raw orientation sample in its platform's convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingSample {
    /// iOS-style compass heading, clockwise from north.
    CompassHeading(f64),
    /// Android-style `alpha`, counter-clockwise.
    Alpha(f64),
}

impl HeadingSample {
    pub fn normalize(self) -> Result<DeviceHeading, LogPoseError> {
        match self {
            Self::CompassHeading(deg) => DeviceHeading::from_degrees(deg),
            Self::Alpha(alpha) => DeviceHeading::from_degrees(360.0 - alpha),
        }
    }
}

fn wrap_360(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
