//! Builders wiring the driven adapters into the HTTP state.

use std::sync::Arc;

use leerstand::domain::ports::{MediaStore, PointsLedger, ReportRepository, UserRepository};
use leerstand::domain::{AdminAllowList, ConversationEngine, IdentityService, ReportsService};
use leerstand::inbound::chat::{ChatDispatcher, ChatPorts};
use leerstand::inbound::http::state::HttpState;
use leerstand::outbound::media::FsMediaStore;
use leerstand::outbound::memory::InMemoryStore;
use leerstand::outbound::persistence::{
    DieselPointsLedger, DieselReportRepository, DieselUserRepository,
};
use tracing::{info, warn};

use super::ServerConfig;

/// Driven adapters shared by the domain services.
struct Adapters<U, R, L, M> {
    users: Arc<U>,
    reports: Arc<R>,
    ledger: Arc<L>,
    media: Arc<M>,
}

fn wire<U, R, L, M>(
    adapters: Adapters<U, R, L, M>,
    admins: Arc<AdminAllowList>,
    leaderboard_size: usize,
) -> HttpState
where
    U: UserRepository + 'static,
    R: ReportRepository + 'static,
    L: PointsLedger + 'static,
    M: MediaStore + 'static,
{
    let Adapters {
        users,
        reports,
        ledger,
        media,
    } = adapters;
    let identity = IdentityService::new(users, admins);
    let conversation =
        ConversationEngine::new(identity.clone(), Arc::clone(&reports), Arc::clone(&media));
    let service = Arc::new(ReportsService::new(identity, reports, ledger, media));
    let chat = ChatDispatcher::new(
        ChatPorts {
            conversation: Arc::new(conversation),
            reports_command: service.clone(),
            reports_query: service.clone(),
        },
        leaderboard_size,
    );
    HttpState::new(Arc::new(chat), service)
}

/// Build the HTTP state, using PostgreSQL when a pool is configured and
/// in-memory stores otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the media directory cannot be opened.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let media = FsMediaStore::open(config.media_dir()).map_err(|err| {
        std::io::Error::other(format!(
            "failed to open media directory {}: {err}",
            config.media_dir().display()
        ))
    })?;
    let media = Arc::new(media);
    let admins = Arc::clone(&config.admins);
    if admins.is_empty() {
        warn!("no admin ids configured; reports cannot be deleted");
    }

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            wire(
                Adapters {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    reports: Arc::new(DieselReportRepository::new(pool.clone())),
                    ledger: Arc::new(DieselPointsLedger::new(pool.clone())),
                    media,
                },
                admins,
                config.leaderboard_size,
            )
        }
        None => {
            warn!("no database configured; users and reports are kept in memory");
            let store = Arc::new(InMemoryStore::new());
            wire(
                Adapters {
                    users: Arc::clone(&store),
                    reports: Arc::clone(&store),
                    ledger: store,
                    media,
                },
                admins,
                config.leaderboard_size,
            )
        }
    };
    Ok(state)
}
