//! Line-oriented sensor feed for the player.
//!
//! One sample per line, e.g. piped from `gpsd` tooling or typed by hand:
//!
//! ```text
//! pos 50.9388 6.9529
//! compass 87.5
//! alpha 272.5
//! error permission denied
//! retry
//! heading-error orientation sensor unavailable
//! retry-heading
//! ```
//!
//! Blank lines and `#` comments are skipped.

use anyhow::{anyhow, bail, Context};
use logpose_core::sensor::{HeadingSample, LivePosition};

#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    Position(LivePosition),
    Heading(HeadingSample),
    PositionError(String),
    Retry,
    HeadingError(String),
    RetryHeading,
}

pub fn parse_line(line: &str) -> anyhow::Result<Option<SensorEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (kind, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match kind {
        "pos" => {
            let mut parts = rest
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty());
            let lat = number(parts.next(), "lat")?;
            let lng = number(parts.next(), "lng")?;
            if parts.next().is_some() {
                bail!("pos takes exactly two values");
            }
            SensorEvent::Position(LivePosition::new(lat, lng)?)
        }
        "compass" => {
            SensorEvent::Heading(HeadingSample::CompassHeading(number(Some(rest), "heading")?))
        }
        "alpha" => SensorEvent::Heading(HeadingSample::Alpha(number(Some(rest), "alpha")?)),
        "error" => SensorEvent::PositionError(message_or(rest, "position unavailable")),
        "retry" => SensorEvent::Retry,
        "heading-error" => SensorEvent::HeadingError(message_or(rest, "compass unavailable")),
        "retry-heading" => SensorEvent::RetryHeading,
        other => bail!("unknown sensor sample kind '{other}'"),
    };
    Ok(Some(event))
}

fn message_or(rest: &str, fallback: &str) -> String {
    if rest.is_empty() {
        fallback.to_string()
    } else {
        rest.to_string()
    }
}

fn number(token: Option<&str>, what: &str) -> anyhow::Result<f64> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow!("missing {what}"))?;
    token
        .parse::<f64>()
        .with_context(|| format!("{what} '{token}' is not a number"))
}
