//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::{AdminAllowList, ConversationEngine, IdentityService, ReportsService};
use crate::inbound::chat::{ChatDispatcher, ChatPorts, DEFAULT_LEADERBOARD_SIZE};
use crate::inbound::http::state::HttpState;
use crate::outbound::media::InMemoryMediaStore;
use crate::outbound::memory::InMemoryStore;

/// HTTP state wired to in-memory adapters.
pub struct MemoryHarness {
    pub state: HttpState,
    pub store: Arc<InMemoryStore>,
    pub media: Arc<InMemoryMediaStore>,
}

/// Wire the HTTP state over fresh in-memory stores.
///
/// `admins` is a comma-separated list of admin external ids.
pub fn memory_harness(admins: &str) -> MemoryHarness {
    let store = Arc::new(InMemoryStore::new());
    let media = Arc::new(InMemoryMediaStore::new());
    let identity = IdentityService::new(
        Arc::clone(&store),
        Arc::new(AdminAllowList::from_csv(admins)),
    );
    let conversation =
        ConversationEngine::new(identity.clone(), Arc::clone(&store), Arc::clone(&media));
    let reports = Arc::new(ReportsService::new(
        identity,
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&media),
    ));
    let chat = ChatDispatcher::new(
        ChatPorts {
            conversation: Arc::new(conversation),
            reports_command: reports.clone(),
            reports_query: reports.clone(),
        },
        DEFAULT_LEADERBOARD_SIZE,
    );
    MemoryHarness {
        state: HttpState::new(Arc::new(chat), reports),
        store,
        media,
    }
}
