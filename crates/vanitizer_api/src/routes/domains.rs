//! Company-domain candidate endpoint

use crate::api_handler::{check_input, new_request_id, ApiResult, EmailQuery};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;
use vanitizer_core::CascadeResult;

/// Candidate endpoint - GET /v1/domains?email=asdf@koan.co
///
/// Runs the full cascade with the deployment's configured overrides. A
/// rejected address is still a 200; the verdict is in `status` and `err`.
pub async fn domains_handler(
    Query(params): Query<EmailQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<CascadeResult> {
    check_input("Email", &params.email)?;

    let request_id = new_request_id();
    let result = state
        .classifier
        .get_domains(&params.email, &state.cascade_config);

    info!(
        request_id = %request_id,
        email = %state.privacy.redact_email(&params.email),
        status = result.status,
        "Domain candidates computed"
    );

    Ok(Json(result))
}
