//! Google Workspace probe routes

use crate::api_handler::{check_input, new_request_id, ApiResult, DomainQuery, EmailQuery};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;
use vanitizer_core::ProbeResult;

/// MX probe endpoint - GET /v1/google?email=asdf@koan.co
///
/// Probe failures are reported in the body with `status: false`.
pub async fn google_email_handler(
    Query(params): Query<EmailQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ProbeResult> {
    check_input("Email", &params.email)?;

    let result = state.probe.is_google_email(&params.email).await;
    info!(
        request_id = %new_request_id(),
        email = %state.privacy.redact_email(&params.email),
        status = result.status,
        "MX probe finished"
    );

    Ok(Json(result))
}

/// Workspace sign-in probe endpoint - GET /v1/google-apps?domain=koan.co
pub async fn google_apps_handler(
    Query(params): Query<DomainQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ProbeResult> {
    check_input("Domain", &params.domain)?;

    let result = state.probe.is_google_apps_domain(&params.domain).await;
    info!(
        request_id = %new_request_id(),
        domain = %params.domain,
        status = result.status,
        "Workspace probe finished"
    );

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, get_json};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_email_is_negative() {
        let (status, body) = get_json(app(), "/v1/google?email=not-an-email").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": false, "err": "invalid email address" }));
    }

    #[tokio::test]
    async fn test_empty_domain_is_bad_request() {
        let (status, body) = get_json(app(), "/v1/google-apps?domain=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("INVALID_INPUT"));
    }

    #[tokio::test]
    #[ignore = "requires network"]
    async fn test_gmail_is_google() {
        let (_, body) = get_json(app(), "/v1/google?email=asdf@gmail.com").await;
        assert_eq!(body["status"], json!(true));
    }
}
