//! Routes chat events to the driving ports and renders the replies.
//!
//! Commands and menu buttons interrupt any running conversation before they
//! run. Plain text and photos feed the conversation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::command::{ChatCommand, CommandParseError};
use super::event::{ChatEvent, ChatInput, OutboundMessage};
use super::render;
use crate::domain::ports::{ConversationCommand, ReportsCommand, ReportsQuery};
use crate::domain::{ChatIdentity, ConversationInput, Error, ErrorCode};

/// Default number of leaderboard rows.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

/// Parameter object bundling the driving ports the dispatcher calls.
#[derive(Clone)]
pub struct ChatPorts {
    pub conversation: Arc<dyn ConversationCommand>,
    pub reports_command: Arc<dyn ReportsCommand>,
    pub reports_query: Arc<dyn ReportsQuery>,
}

enum Route {
    Command(Result<ChatCommand, CommandParseError>),
    Conversation(ConversationInput),
}

impl Route {
    fn of(input: ChatInput) -> Self {
        match input {
            ChatInput::Command { name, args } => Self::Command(ChatCommand::parse(&name, &args)),
            ChatInput::Button(label) => match ChatCommand::from_button(&label) {
                Some(command) => Self::Command(Ok(command)),
                None => Self::Command(Ok(ChatCommand::Help)),
            },
            ChatInput::Text(text) => {
                if let Some(parsed) = ChatCommand::from_text(&text) {
                    Self::Command(parsed)
                } else if let Some(command) = ChatCommand::from_button(&text) {
                    // Keyboards deliver button presses as plain text.
                    Self::Command(Ok(command))
                } else {
                    Self::Conversation(ConversationInput::Text(text))
                }
            }
            ChatInput::Photo(bytes) => Self::Conversation(ConversationInput::Photo(bytes)),
        }
    }
}

/// Chat front controller.
#[derive(Clone)]
pub struct ChatDispatcher {
    conversation: Arc<dyn ConversationCommand>,
    reports_command: Arc<dyn ReportsCommand>,
    reports_query: Arc<dyn ReportsQuery>,
    leaderboard_size: usize,
}

impl ChatDispatcher {
    pub fn new(ports: ChatPorts, leaderboard_size: usize) -> Self {
        Self {
            conversation: ports.conversation,
            reports_command: ports.reports_command,
            reports_query: ports.reports_query,
            leaderboard_size,
        }
    }

    /// Handle one inbound event and produce the reply.
    pub async fn handle(&self, event: ChatEvent) -> OutboundMessage {
        let ChatEvent { identity, input } = event;
        let reply = match Route::of(input) {
            Route::Command(parsed) => {
                if self.conversation.cancel(&identity.external_id).await {
                    debug!(external_id = %identity.external_id, "conversation interrupted by command");
                }
                match parsed {
                    Ok(command) => self.run(&identity, command).await,
                    Err(err) => {
                        debug!(external_id = %identity.external_id, error = %err, "unparsable command");
                        return render::command_error(&err);
                    }
                }
            }
            Route::Conversation(input) => self
                .conversation
                .advance(&identity.external_id, input)
                .await
                .map(|outcome| render::outcome(&outcome)),
        };
        reply.unwrap_or_else(|err| failure(&identity, &err))
    }

    async fn run(
        &self,
        identity: &ChatIdentity,
        command: ChatCommand,
    ) -> Result<OutboundMessage, Error> {
        match command {
            ChatCommand::Start => {
                if let Some(hint) = identity.display_hint.as_deref() {
                    debug!(external_id = %identity.external_id, display_hint = hint, "start");
                }
                let outcome = self.conversation.start(identity).await?;
                Ok(render::outcome(&outcome))
            }
            ChatCommand::NewReport => {
                let outcome = self.conversation.begin_report(identity).await?;
                Ok(render::outcome(&outcome))
            }
            ChatCommand::MyReports => {
                let reports = self.reports_query.list_mine(identity).await?;
                Ok(render::reports(
                    "📋 Deine Meldungen:",
                    "Du hast noch keine Meldungen abgegeben.",
                    &reports,
                ))
            }
            ChatCommand::AllReports => {
                let reports = self.reports_query.list_all().await?;
                Ok(render::reports(
                    "📋 Alle Meldungen:",
                    "Es gibt noch keine Meldungen.",
                    &reports,
                ))
            }
            ChatCommand::Leaderboard => {
                let entries = self.reports_query.leaderboard(self.leaderboard_size).await?;
                Ok(render::leaderboard(&entries))
            }
            ChatCommand::Help => Ok(render::help()),
            ChatCommand::Confirm(report_id) => {
                let confirmed = self.reports_command.confirm(report_id, identity).await?;
                info!(
                    report_id = %report_id,
                    confirmer = %identity.external_id,
                    confirmations = confirmed.confirmation_count,
                    "report confirmed"
                );
                Ok(render::confirmed(&confirmed))
            }
            ChatCommand::AdminDelete(report_id) => {
                let removed = self
                    .reports_command
                    .remove(report_id, &identity.external_id)
                    .await?;
                info!(report_id = %report_id, admin = %identity.external_id, "report removed");
                if !removed.media_released {
                    warn!(
                        report_id = %report_id,
                        image = %removed.report.image(),
                        "photo of removed report could not be released"
                    );
                }
                Ok(render::removed(&removed))
            }
        }
    }
}

fn failure(identity: &ChatIdentity, err: &Error) -> OutboundMessage {
    match err.code() {
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => {
            error!(external_id = %identity.external_id, error = %err, "chat event failed");
        }
        _ => debug!(external_id = %identity.external_id, error = %err, "chat event rejected"),
    }
    render::error(err)
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
