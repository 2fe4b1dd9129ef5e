//! Admin commands: move the pointer, inspect the route, replace it.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use logpose_core::{
    route::{RoutePlan, Stage},
    seeds,
    types::WaypointSnapshot,
    GeoPoint,
};

use crate::client::ApiClient;

#[derive(Debug, Clone)]
pub enum AdminAction {
    Status,
    List,
    Next,
    Prev,
    Reset,
    Set { index: usize },
    Replace { file: PathBuf },
    Verify,
}

pub async fn run(
    client: &ApiClient,
    secret: Option<&str>,
    action: AdminAction,
) -> anyhow::Result<()> {
    match action {
        AdminAction::Status => {
            let plan = fetch_plan(client).await?;
            let progress = plan.progress();
            let current = plan.current();
            println!("active:    #{} {}", progress.position, current.name);
            println!("           {:.6}, {:.6}", current.lat, current.lng);
            println!(
                "progress:  {}/{} ({} remaining)",
                progress.position, progress.total, progress.remaining
            );
        }
        AdminAction::List => {
            let plan = fetch_plan(client).await?;
            for (index, point, stage) in plan.stages() {
                println!("{}", stage_line(index, point, stage, index == plan.current_index()));
            }
        }
        AdminAction::Next => {
            let plan = fetch_plan(client).await?;
            match plan.next() {
                Some(index) => activate(client, require(secret)?, index).await?,
                None => println!("already at the last waypoint"),
            }
        }
        AdminAction::Prev => {
            let plan = fetch_plan(client).await?;
            match plan.previous() {
                Some(index) => activate(client, require(secret)?, index).await?,
                None => println!("already at the first waypoint"),
            }
        }
        AdminAction::Reset => {
            let plan = fetch_plan(client).await?;
            activate(client, require(secret)?, plan.reset()).await?;
        }
        AdminAction::Set { index } => {
            activate(client, require(secret)?, index).await?;
        }
        AdminAction::Replace { file } => {
            let drafts = seeds::load_drafts(&file)?;
            let resp = client
                .replace(require(secret)?, &drafts)
                .await
                .context("replace failed")?;
            tracing::info!("replaced route from {}", file.display());
            println!(
                "route replaced: {} waypoints, active #{}",
                resp.locations.len(),
                resp.current_index + 1
            );
        }
        AdminAction::Verify => {
            client.verify(require(secret)?).await?;
            println!("admin secret accepted");
        }
    }
    Ok(())
}

fn require(secret: Option<&str>) -> anyhow::Result<&str> {
    secret
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("this command needs --secret or LOGPOSE_ADMIN_SECRET"))
}

async fn fetch_plan(client: &ApiClient) -> anyhow::Result<RoutePlan> {
    let resp = client.locations().await.context("failed to load waypoints")?;
    let plan = RoutePlan::from_snapshot(WaypointSnapshot {
        locations: resp.locations,
        current_index: resp.current_index,
    })?;
    Ok(plan)
}

async fn activate(client: &ApiClient, secret: &str, index: usize) -> anyhow::Result<()> {
    let resp = client
        .set_active(secret, index)
        .await
        .with_context(|| format!("failed to activate waypoint {index}"))?;
    println!("active waypoint: #{} {}", resp.index + 1, resp.location.name);
    Ok(())
}

pub fn stage_line(index: usize, point: &GeoPoint, stage: Stage, active: bool) -> String {
    let marker = match stage {
        Stage::Start => "start",
        Stage::Finish => "finish",
        Stage::Completed => "done",
        Stage::Active => "active",
        Stage::Pending => "",
    };
    let pointer = if active { ">" } else { " " };
    format!(
        "{pointer} #{:<3} {:<8} {}  ({:.6}, {:.6})",
        index + 1,
        marker,
        point.name,
        point.lat,
        point.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> GeoPoint {
        GeoPoint {
            id: 2,
            name: "Kneipe 1 - Päffgen Brauhaus".into(),
            lat: 50.9388,
            lng: 6.9529,
        }
    }

    #[test]
    fn stage_line_marks_active() {
        let line = stage_line(1, &point(), Stage::Active, true);
        assert_eq!(
            line,
            "> #2   active   Kneipe 1 - Päffgen Brauhaus  (50.938800, 6.952900)"
        );
    }

    #[test]
    fn stage_line_pending_has_blank_marker() {
        let line = stage_line(4, &point(), Stage::Pending, false);
        assert!(line.starts_with("  #5            Kneipe 1"));
    }

    #[test]
    fn require_rejects_missing_or_empty_secret() {
        assert!(require(None).is_err());
        assert!(require(Some("")).is_err());
        assert_eq!(require(Some("pw")).unwrap(), "pw");
    }
}
