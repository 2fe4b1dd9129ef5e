//! Server configuration from environment variables:
//!
//!   LOGPOSE_ADMIN_SECRET   - shared admin secret (required)
//!   LOGPOSE_BIND_ADDR      - listen address (default: 0.0.0.0:$PORT, PORT defaulting to 3000)
//!   LOGPOSE_WAYPOINTS_FILE - YAML/JSON seed route (default: built-in route)

use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::auth::AdminSecret;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub admin_secret: AdminSecret,
    pub waypoints_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let secret = lookup("LOGPOSE_ADMIN_SECRET").unwrap_or_default();
        if secret.trim().is_empty() {
            bail!("LOGPOSE_ADMIN_SECRET must be set to a non-empty value");
        }

        let bind_addr = match lookup("LOGPOSE_BIND_ADDR") {
            Some(addr) => addr,
            None => {
                let port = match lookup("PORT") {
                    Some(p) => p
                        .parse::<u16>()
                        .with_context(|| format!("PORT is not a valid port number: {p}"))?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let waypoints_file = lookup("LOGPOSE_WAYPOINTS_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            admin_secret: AdminSecret::new(secret),
            waypoints_file,
        })
    }
}
