//! Transport-neutral chat events and replies.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ChatIdentity;

/// Content of one inbound chat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Text(String),
    Photo(Vec<u8>),
    Command { name: String, args: String },
    Button(String),
}

/// Inbound chat event tagged with the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub identity: ChatIdentity,
    pub input: ChatInput,
}

impl ChatEvent {
    pub fn new(identity: ChatIdentity, input: ChatInput) -> Self {
        Self { identity, input }
    }
}

/// Reply sent back to the user.
///
/// `menu` holds rows of button labels when the reply should show the main
/// menu keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    #[schema(example = "Meldung #12 gespeichert! Du hast 5 Punkte bekommen.")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<Vec<String>>>,
}

impl OutboundMessage {
    /// Plain text reply without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    /// Attach the given keyboard rows.
    pub fn with_menu(mut self, menu: Vec<Vec<String>>) -> Self {
        self.menu = Some(menu);
        self
    }
}
