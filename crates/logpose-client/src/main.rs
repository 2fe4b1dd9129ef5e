//! logpose: command-line player and admin for a Log Pose server.
//!
//! # Usage
//!
//! ```bash
//! # Follow the active waypoint, reading sensor samples from stdin
//! gps-feed | logpose player --poll-interval 5
//!
//! # Admin controls
//! export LOGPOSE_ADMIN_SECRET=...
//! logpose admin status
//! logpose admin next
//! logpose admin set 3
//! logpose admin replace route.yaml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use logpose_client::admin::{self, AdminAction};
use logpose_client::client::ApiClient;
use logpose_client::player::{self, PlayerOptions};

#[derive(Parser)]
#[command(name = "logpose")]
#[command(version)]
#[command(about = "Compass player and admin controls for a Log Pose server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the logpose-server
    #[arg(long, global = true, env = "LOGPOSE_SERVER_URL", default_value = "http://localhost:3000")]
    server: String,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the active waypoint and print compass readings
    Player {
        /// Seconds between target polls
        #[arg(long, default_value_t = 5)]
        poll_interval: u64,

        /// Treat the device as having no orientation sensor
        #[arg(long)]
        no_heading: bool,

        /// Print readings as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Admin controls (secret-gated)
    Admin {
        /// Shared admin secret
        #[arg(long, env = "LOGPOSE_ADMIN_SECRET", hide_env_values = true)]
        secret: Option<String>,

        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Show the active waypoint and progress
    Status,
    /// List all waypoints with their stage
    List,
    /// Advance to the next waypoint
    Next,
    /// Go back to the previous waypoint
    Prev,
    /// Jump back to the first waypoint
    Reset,
    /// Activate the waypoint at a 0-based index
    Set { index: usize },
    /// Replace the route from a YAML or JSON file
    Replace { file: PathBuf },
    /// Check the admin secret without changing anything
    Verify,
}

impl From<AdminCommand> for AdminAction {
    fn from(cmd: AdminCommand) -> Self {
        match cmd {
            AdminCommand::Status => AdminAction::Status,
            AdminCommand::List => AdminAction::List,
            AdminCommand::Next => AdminAction::Next,
            AdminCommand::Prev => AdminAction::Prev,
            AdminCommand::Reset => AdminAction::Reset,
            AdminCommand::Set { index } => AdminAction::Set { index },
            AdminCommand::Replace { file } => AdminAction::Replace { file },
            AdminCommand::Verify => AdminAction::Verify,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,logpose_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = ApiClient::new(&cli.server, Duration::from_secs(cli.timeout))?;

    match cli.command {
        Commands::Player {
            poll_interval,
            no_heading,
            json,
        } => {
            let opts = PlayerOptions {
                poll_interval: Duration::from_secs(poll_interval.max(1)),
                heading_supported: !no_heading,
                json,
            };
            player::run(client, opts).await
        }
        Commands::Admin { secret, action } => {
            admin::run(&client, secret.as_deref(), action.into()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_admin_set() {
        let cli = Cli::try_parse_from(["logpose", "admin", "--secret", "pw", "set", "3"]).unwrap();
        match cli.command {
            Commands::Admin { secret, action } => {
                assert_eq!(secret.as_deref(), Some("pw"));
                assert!(matches!(
                    AdminAction::from(action),
                    AdminAction::Set { index: 3 }
                ));
            }
            _ => panic!("expected admin command"),
        }
    }

    #[test]
    fn parses_player_flags() {
        let cli = Cli::try_parse_from([
            "logpose",
            "--server",
            "http://example.test",
            "player",
            "--poll-interval",
            "2",
            "--no-heading",
        ])
        .unwrap();
        assert_eq!(cli.server, "http://example.test");
        assert!(matches!(
            cli.command,
            Commands::Player {
                poll_interval: 2,
                no_heading: true,
                json: false
            }
        ));
    }
}
