//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use leerstand::domain::AdminAllowList;
use leerstand::inbound::chat::DEFAULT_LEADERBOARD_SIZE;
use leerstand::outbound::persistence::DbPool;

/// Largest accepted request body, sized for phone photos.
pub const DEFAULT_PAYLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) media_dir: PathBuf,
    pub(crate) admins: Arc<AdminAllowList>,
    pub(crate) leaderboard_size: usize,
    pub(crate) payload_limit: usize,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory persistence.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, media_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            media_dir: media_dir.into(),
            admins: Arc::new(AdminAllowList::default()),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
            db_pool: None,
        }
    }

    #[must_use]
    pub fn with_admins(mut self, admins: AdminAllowList) -> Self {
        self.admins = Arc::new(admins);
        self
    }

    #[must_use]
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Attach a database connection pool.
    ///
    /// When provided, users, reports, and points are stored in PostgreSQL;
    /// otherwise they live in memory for the lifetime of the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }
}
