//! Player loop: polls the active waypoint, feeds sensor samples into the
//! display and prints a compass line whenever something changes.
//!
//! Four event sources share one `select!`: the poll timer, finished target
//! fetches, the stdin sensor feed, and Ctrl-C. Fetches run on their own task
//! so a slow server never holds up sensor samples or shutdown; at most one is
//! in flight and a tick that finds one running is skipped.

use std::time::Duration;

use logpose_core::{
    display::{HeadingState, PlayerDisplay},
    proto::CurrentWaypointResponse,
    LogPoseError,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::feed::{parse_line, SensorEvent};

#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub poll_interval: Duration,
    pub heading_supported: bool,
    pub json: bool,
}

pub type FetchResult = Result<CurrentWaypointResponse, LogPoseError>;

/// Fetch the active waypoint on its own task; the result arrives on `tx`.
pub fn spawn_fetch(client: ApiClient, tx: mpsc::Sender<FetchResult>) -> JoinHandle<()> {
    tokio::spawn(async move {
        // The receiver is gone only after shutdown.
        let _ = tx.send(client.current().await).await;
    })
}

pub async fn run(client: ApiClient, opts: PlayerOptions) -> anyhow::Result<()> {
    let mut display = PlayerDisplay::new(opts.heading_supported);

    let mut ticker = tokio::time::interval(opts.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchResult>(1);
    let mut fetching = false;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut feed_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!("player started, polling every {:?}", opts.poll_interval);
    println!("{}", display.status_line());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if fetching {
                    tracing::debug!("previous target fetch still running, skipping tick");
                    continue;
                }
                fetching = true;
                spawn_fetch(client.clone(), fetch_tx.clone());
            }
            Some(result) = fetch_rx.recv() => {
                fetching = false;
                match result {
                    Ok(resp) => {
                        let name = resp.location.name.clone();
                        if display.on_target(resp.location) {
                            tracing::info!("target updated: {name} ({}/{})", resp.index + 1, resp.total);
                            print_display(&display, opts.json);
                        }
                    }
                    // Skip this cycle; the next tick retries.
                    Err(e) => tracing::warn!("failed to fetch target: {e}"),
                }
            }
            line = lines.next_line(), if feed_open => {
                match line {
                    Ok(Some(line)) => match parse_line(&line) {
                        Ok(Some(event)) => {
                            if apply_event(&mut display, event) {
                                print_display(&display, opts.json);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!("ignoring sensor line '{}': {e:#}", line.trim()),
                    },
                    Ok(None) => {
                        tracing::info!("sensor feed closed, keeping last position");
                        feed_open = false;
                    }
                    Err(e) => {
                        tracing::error!("sensor feed failed: {e}");
                        feed_open = false;
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("shutting down player");
                break;
            }
        }
    }
    Ok(())
}

/// Apply one sensor event. Returns `true` when the display should redraw.
pub fn apply_event(display: &mut PlayerDisplay, event: SensorEvent) -> bool {
    match event {
        SensorEvent::Position(position) => {
            display.on_position(position);
            true
        }
        SensorEvent::Heading(sample) => match sample.normalize() {
            Ok(heading) => display.on_heading(heading),
            Err(e) => {
                tracing::warn!("dropping heading sample: {e}");
                false
            }
        },
        SensorEvent::PositionError(message) => {
            display.on_position_error(message);
            true
        }
        SensorEvent::Retry => {
            display.retry();
            true
        }
        SensorEvent::HeadingError(message) => {
            tracing::warn!("compass unavailable: {message}");
            display.on_heading_error(message)
        }
        SensorEvent::RetryHeading => display.retry_heading(),
    }
}

fn print_display(display: &PlayerDisplay, json: bool) {
    if json {
        match display.reading() {
            Some(reading) => match serde_json::to_string(&reading) {
                Ok(s) => println!("{s}"),
                Err(e) => tracing::error!("failed to encode reading: {e}"),
            },
            None => println!("{}", serde_json::json!({ "status": display.status_line() })),
        }
    } else {
        println!("{}", render_line(display));
    }
}

/// One human-readable line: target, distance, direction, and needle angle.
pub fn render_line(display: &PlayerDisplay) -> String {
    match (display.reading(), display.target()) {
        (Some(reading), Some(target)) => {
            let line = format!(
                "{} | {} {} | bearing {:.1}° | needle {:.1}°",
                target.name,
                reading.distance,
                reading.direction_label,
                reading.bearing_degrees,
                reading.needle_rotation_degrees
            );
            match display.heading() {
                HeadingState::Denied(message) => format!("{line} | compass error: {message}"),
                _ => line,
            }
        }
        (None, Some(target)) => format!("{} | {}", target.name, display.status_line()),
        _ => display.status_line(),
    }
}
