//! Application settings loaded via OrthoConfig.
//!
//! Values come from `LEERSTAND_*` environment variables, command-line flags,
//! or a configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use leerstand::domain::AdminAllowList;
use leerstand::inbound::chat::DEFAULT_LEADERBOARD_SIZE;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MEDIA_DIR: &str = "media";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEERSTAND")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it all state is held in memory.
    pub database_url: Option<String>,
    /// Directory holding report photos.
    pub media_dir: Option<PathBuf>,
    /// Comma-separated external ids allowed to delete reports.
    pub admin_ids: Option<String>,
    /// Number of leaderboard rows shown.
    pub leaderboard_size: Option<usize>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn media_dir(&self) -> PathBuf {
        self.media_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR))
    }

    pub fn admins(&self) -> AdminAllowList {
        AdminAllowList::from_csv(self.admin_ids.as_deref().unwrap_or_default())
    }

    /// Leaderboard length; zero falls back to the default.
    pub fn leaderboard_size(&self) -> usize {
        match self.leaderboard_size {
            Some(0) | None => DEFAULT_LEADERBOARD_SIZE,
            Some(size) => size,
        }
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
