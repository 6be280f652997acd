//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the chat, report, and health endpoints together with
//! the request and reply schemas. The document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::chat::OutboundMessage;
use crate::inbound::http::chat::{ChatEventPayload, ChatEventRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leerstand backend API",
        description = "Chat interface for reporting vacant dwellings, plus photo access and health probes.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::chat::post_chat_event,
        crate::inbound::http::chat::post_chat_photo,
        crate::inbound::http::reports::get_report_photo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ChatEventRequest,
        ChatEventPayload,
        OutboundMessage,
        Error,
        ErrorCode
    )),
    tags(
        (name = "chat", description = "Chat events and bot replies"),
        (name = "reports", description = "Stored report data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/v1/chat/events",
            "/api/v1/chat/users/{external_id}/photo",
            "/api/v1/reports/{id}/photo",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("OutboundMessage", "text")]
    #[case("ChatEventRequest", "externalId")]
    fn schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }
}
