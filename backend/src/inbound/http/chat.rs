//! Chat event API handlers.
//!
//! ```text
//! POST /api/v1/chat/events {"externalId":"4711","event":{"kind":"text","text":"Alex"}}
//! POST /api/v1/chat/users/4711/photo <raw image bytes>
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ChatIdentity, Error, ExternalId};
use crate::inbound::chat::{ChatEvent, ChatInput, OutboundMessage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Event content for `POST /api/v1/chat/events`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChatEventPayload {
    /// Free text typed by the user.
    Text { text: String },
    /// Slash command, with or without the leading `/`.
    Command {
        name: String,
        #[serde(default)]
        args: String,
    },
    /// Keyboard button press.
    Button { label: String },
}

impl From<ChatEventPayload> for ChatInput {
    fn from(value: ChatEventPayload) -> Self {
        match value {
            ChatEventPayload::Text { text } => Self::Text(text),
            ChatEventPayload::Command { name, args } => Self::Command { name, args },
            ChatEventPayload::Button { label } => Self::Button(label),
        }
    }
}

/// Request body for `POST /api/v1/chat/events`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatEventRequest {
    #[schema(example = "4711")]
    pub external_id: String,
    /// Transport display name, kept out of the leaderboard.
    #[serde(default)]
    pub display_name: Option<String>,
    pub event: ChatEventPayload,
}

fn parse_external_id(raw: String) -> Result<ExternalId, Error> {
    ExternalId::new(raw).map_err(|_| {
        Error::invalid_request("externalId must not be empty")
            .with_details(json!({ "field": "externalId", "code": "empty_external_id" }))
    })
}

/// Feed one chat event and return the bot's reply.
#[utoipa::path(
    post,
    path = "/api/v1/chat/events",
    request_body = ChatEventRequest,
    responses(
        (status = 200, description = "Bot reply", body = OutboundMessage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["chat"],
    operation_id = "postChatEvent"
)]
#[post("/chat/events")]
pub async fn post_chat_event(
    state: web::Data<HttpState>,
    payload: web::Json<ChatEventRequest>,
) -> ApiResult<web::Json<OutboundMessage>> {
    let ChatEventRequest {
        external_id,
        display_name,
        event,
    } = payload.into_inner();
    let mut identity = ChatIdentity::new(parse_external_id(external_id)?);
    if let Some(name) = display_name {
        identity = identity.with_display_hint(name);
    }
    let reply = state.chat.handle(ChatEvent::new(identity, event.into())).await;
    Ok(web::Json(reply))
}

/// Send a photo on behalf of a chat user.
#[utoipa::path(
    post,
    path = "/api/v1/chat/users/{external_id}/photo",
    params(("external_id" = String, Path, description = "Chat user identifier")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Bot reply", body = OutboundMessage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["chat"],
    operation_id = "postChatPhoto"
)]
#[post("/chat/users/{external_id}/photo")]
pub async fn post_chat_photo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<OutboundMessage>> {
    let external_id = parse_external_id(path.into_inner())?;
    if body.is_empty() {
        return Err(Error::invalid_request("photo body must not be empty")
            .with_details(json!({ "field": "body", "code": "empty_photo" })));
    }
    let event = ChatEvent::new(ChatIdentity::new(external_id), ChatInput::Photo(body.to_vec()));
    Ok(web::Json(state.chat.handle(event).await))
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
