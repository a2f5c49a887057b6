//! API Routes Module
//!
//! Endpoints grouped by concern:
//! - `domains`: company-domain candidates for an address
//! - `classify`: static-list classification and registrable domain
//! - `google`: Google Workspace probes over DNS and HTTP
//! - `health`: health checks and list statistics

pub mod classify;
pub mod domains;
pub mod google;
pub mod health;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Build all API routes and return a configured Router
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/domains", get(domains::domains_handler))
        .route("/v1/classify", get(classify::classify_handler))
        .route("/v1/sub-level-domain", get(classify::sub_level_domain_handler))
        .route("/v1/google", get(google::google_email_handler))
        .route("/v1/google-apps", get(google::google_apps_handler))
        // Health and monitoring endpoints
        .route("/health", get(health::health_handler))
        .route("/admin/stats", get(health::stats_handler))
        .with_state(state)
}
