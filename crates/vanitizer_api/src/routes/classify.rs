//! Static-list classification routes
//!
//! Both endpoints answer from the loaded reference lists alone; deployment
//! overrides do not apply here.

use crate::api_handler::{
    check_input, new_request_id, ApiResult, ClassifyResponse, EmailQuery, SubLevelDomainResponse,
};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Classification endpoint - GET /v1/classify?email=asdf@koan.co
pub async fn classify_handler(
    Query(params): Query<EmailQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<ClassifyResponse> {
    check_input("Email", &params.email)?;

    let email = params.email.as_str();
    let response = ClassifyResponse {
        disposable: state.classifier.is_disposable_email(email),
        free: state.classifier.is_free_email(email),
        work: state.classifier.is_work_email(email),
    };

    info!(
        request_id = %new_request_id(),
        email = %state.privacy.redact_email(email),
        work = response.work.status,
        "Email classified"
    );

    Ok(Json(response))
}

/// Registrable domain endpoint - GET /v1/sub-level-domain?email=asdf@usa.ibm.com
pub async fn sub_level_domain_handler(
    Query(params): Query<EmailQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SubLevelDomainResponse> {
    check_input("Email", &params.email)?;

    let domain = state.classifier.get_sub_level_domain(&params.email)?;
    debug!(
        email = %state.privacy.redact_email(&params.email),
        "Resolved registrable domain {}", domain
    );

    Ok(Json(SubLevelDomainResponse { domain }))
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::test_support::{app, app_with, get_json};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_classify_free_email() {
        let (status, body) = get_json(app(), "/v1/classify?email=asdf@gmail.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "disposable": { "status": false, "error": null },
                "free": { "status": true, "error": null },
                "work": { "status": false, "error": null },
            })
        );
    }

    #[tokio::test]
    async fn test_classify_disposable_email() {
        let (_, body) = get_json(app(), "/v1/classify?email=asdf@mailinator.com").await;
        assert_eq!(body["disposable"]["status"], json!(true));
        assert_eq!(body["work"]["status"], json!(false));
    }

    #[tokio::test]
    async fn test_classify_invalid_email() {
        let (status, body) = get_json(app(), "/v1/classify?email=koan.co").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["work"], json!({ "status": false, "error": "invalid_email" }));
    }

    #[tokio::test]
    async fn test_classify_ignores_overrides() {
        let mut config = AppConfig::default();
        config.overrides.domain_whitelist = vec!["gmail.com".to_string()];

        let (_, body) = get_json(app_with(config), "/v1/classify?email=asdf@gmail.com").await;
        assert_eq!(body["free"]["status"], json!(true));
    }

    #[tokio::test]
    async fn test_sub_level_domain() {
        let (status, body) = get_json(app(), "/v1/sub-level-domain?email=asdf@usa.ibm.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "domain": "ibm.com" }));
    }

    #[tokio::test]
    async fn test_sub_level_domain_unknown_tld() {
        let (status, body) =
            get_json(app(), "/v1/sub-level-domain?email=asdf@koan.notarealtld").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("invalid_tld"));
        assert!(body["timestamp"].is_string());
    }
}
