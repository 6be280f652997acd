//! Report photo handler.
//!
//! ```text
//! GET /api/v1/reports/12/photo
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, http::header, web};
use serde_json::json;

use crate::domain::{Error, ReportId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Return the photo attached to a report.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}/photo",
    params(("id" = i64, Path, description = "Report number")),
    responses(
        (status = 200, description = "Photo bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 400, description = "Invalid report id", body = Error),
        (status = 404, description = "Report or photo not found", body = Error),
        (status = 503, description = "Media store unavailable", body = Error)
    ),
    tags = ["reports"],
    operation_id = "getReportPhoto"
)]
#[get("/reports/{id}/photo")]
pub async fn get_report_photo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let report_id = ReportId::from_str(&raw).map_err(|_| {
        Error::invalid_request("report id must be a positive integer")
            .with_details(json!({ "field": "id", "value": raw, "code": "invalid_report_id" }))
    })?;
    let bytes = state.reports.photo(report_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((header::CACHE_CONTROL, "private, max-age=3600"))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MediaStore, ReportRepository, UserRepository};
    use crate::domain::{Address, ExternalId, NewReport, NewUser, ScoringEvent};
    use crate::inbound::http::test_utils::memory_harness;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    async fn get(state: HttpState, uri: &str) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(get_report_photo)),
        )
        .await;
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn returns_stored_photo() {
        let harness = memory_harness("");
        let (owner, _) = harness
            .store
            .get_or_create(&NewUser::new(ExternalId::new("4711").expect("valid id"), false))
            .await
            .expect("registration succeeds");
        let image = harness.media.store(b"jpeg").await.expect("store succeeds");
        let report = NewReport::new(
            owner.id(),
            image,
            None,
            Address::parse("Teststr 5, Hamburg").expect("valid address"),
            "6 Monate",
        )
        .expect("valid report");
        let stored = harness
            .store
            .insert_crediting_owner(&report, ScoringEvent::ReportSubmitted)
            .await
            .expect("insert succeeds");

        let response = get(
            harness.state.clone(),
            &format!("/api/v1/reports/{}/photo", stored.id()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(response).await.as_ref(), b"jpeg");
    }

    #[rstest]
    #[case("/api/v1/reports/abc/photo", StatusCode::BAD_REQUEST)]
    #[case("/api/v1/reports/0/photo", StatusCode::BAD_REQUEST)]
    #[case("/api/v1/reports/9/photo", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn rejects_bad_or_missing_ids(#[case] uri: &str, #[case] expected: StatusCode) {
        let harness = memory_harness("");

        let response = get(harness.state.clone(), uri).await;

        assert_eq!(response.status(), expected);
    }
}
