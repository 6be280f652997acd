//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the chat dispatcher and the domain ports, and remain testable
//! without I/O.

use std::sync::Arc;

use crate::domain::ports::ReportsQuery;
use crate::inbound::chat::ChatDispatcher;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub chat: Arc<ChatDispatcher>,
    pub reports: Arc<dyn ReportsQuery>,
}

impl HttpState {
    pub fn new(chat: Arc<ChatDispatcher>, reports: Arc<dyn ReportsQuery>) -> Self {
        Self { chat, reports }
    }
}
