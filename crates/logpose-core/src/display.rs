//! Player display state: which inputs the compass has, and what to show.
//!
//! Two independent channels feed the display:
//!
//! - GPS: `AwaitingFirstFix -> Active`, `Failed` on a sensor error,
//!   `retry()` goes back to `AwaitingFirstFix`.
//! - Heading: `Unsupported` (terminal) or `AwaitingPermission -> Active`,
//!   `Denied` when the orientation sensor is refused or unavailable,
//!   `retry_heading()` goes back to `AwaitingPermission`.
//!
//! A reading exists once there is both a position and a target; the heading
//! is optional and counts as north unless it is `Active`.

use crate::compass::{compute_reading, CompassReading};
use crate::sensor::{DeviceHeading, LivePosition};
use crate::types::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum GpsState {
    AwaitingFirstFix,
    Active(LivePosition),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeadingState {
    Unsupported,
    AwaitingPermission,
    Active(DeviceHeading),
    Denied(String),
}

#[derive(Debug, Clone)]
pub struct PlayerDisplay {
    gps: GpsState,
    heading: HeadingState,
    target: Option<GeoPoint>,
}

impl PlayerDisplay {
    pub fn new(heading_supported: bool) -> Self {
        Self {
            gps: GpsState::AwaitingFirstFix,
            heading: if heading_supported {
                HeadingState::AwaitingPermission
            } else {
                HeadingState::Unsupported
            },
            target: None,
        }
    }

    pub fn gps(&self) -> &GpsState {
        &self.gps
    }

    pub fn heading(&self) -> &HeadingState {
        &self.heading
    }

    pub fn target(&self) -> Option<&GeoPoint> {
        self.target.as_ref()
    }

    pub fn on_position(&mut self, position: LivePosition) {
        self.gps = GpsState::Active(position);
    }

    /// Sensor failure. The last position is dropped; the display shows the
    /// message until [`retry`](Self::retry).
    pub fn on_position_error(&mut self, message: impl Into<String>) {
        self.gps = GpsState::Failed(message.into());
    }

    pub fn retry(&mut self) {
        if matches!(self.gps, GpsState::Failed(_)) {
            self.gps = GpsState::AwaitingFirstFix;
        }
    }

    /// Returns `false` when the heading channel is unsupported and the
    /// sample was ignored.
    pub fn on_heading(&mut self, heading: DeviceHeading) -> bool {
        if self.heading == HeadingState::Unsupported {
            return false;
        }
        self.heading = HeadingState::Active(heading);
        true
    }

    /// Orientation sensor refused or failed. Returns `false` when the
    /// channel is unsupported and the error was ignored.
    pub fn on_heading_error(&mut self, message: impl Into<String>) -> bool {
        if self.heading == HeadingState::Unsupported {
            return false;
        }
        self.heading = HeadingState::Denied(message.into());
        true
    }

    /// Ask for the orientation sensor again after a denial.
    pub fn retry_heading(&mut self) -> bool {
        if !matches!(self.heading, HeadingState::Denied(_)) {
            return false;
        }
        self.heading = HeadingState::AwaitingPermission;
        true
    }

    /// Returns `true` if the target actually changed.
    pub fn on_target(&mut self, target: GeoPoint) -> bool {
        if self.target.as_ref() == Some(&target) {
            return false;
        }
        self.target = Some(target);
        true
    }

    pub fn reading(&self) -> Option<CompassReading> {
        let GpsState::Active(position) = self.gps else {
            return None;
        };
        let target = self.target.as_ref()?;
        let heading = match &self.heading {
            HeadingState::Active(h) => Some(*h),
            _ => None,
        };
        Some(compute_reading(position, target, heading))
    }

    pub fn status_line(&self) -> String {
        let gps = match &self.gps {
            GpsState::AwaitingFirstFix => "waiting for GPS...".to_string(),
            GpsState::Active(_) => "GPS active".to_string(),
            GpsState::Failed(message) => format!("GPS error: {message}"),
        };
        match &self.heading {
            HeadingState::Denied(message) => format!("{gps} | compass error: {message}"),
            _ => gps,
        }
    }
}
