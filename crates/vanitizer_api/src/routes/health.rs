//! Health check and monitoring routes

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use crate::config::ProbesConfig;
use vanitizer_core::lists::ListStats;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint - GET /health
///
/// Simple health check to verify the API is running.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Statistics response
#[derive(Serialize)]
pub struct StatsResponse {
    pub version: String,
    pub lists: ListStats,
    pub overrides: OverrideCounts,
    pub probes: ProbesConfig,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct OverrideCounts {
    pub word_whitelist: usize,
    pub word_blacklist: usize,
    pub domain_whitelist: usize,
    pub domain_blacklist: usize,
}

/// Statistics endpoint - GET /admin/stats
///
/// Reference list sizes, configured override counts and probe timeouts.
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let cascade = &state.cascade_config;

    Json(StatsResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        lists: state.classifier.lists().stats(),
        overrides: OverrideCounts {
            word_whitelist: cascade.word_whitelist.len(),
            word_blacklist: cascade.word_blacklist.len(),
            domain_whitelist: cascade.domain_whitelist.len(),
            domain_blacklist: cascade.domain_blacklist.len(),
        },
        probes: state.config.probes.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::test_support::{app, app_with, get_json};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_stats_report_lists_and_overrides() {
        let mut config = AppConfig::default();
        config.overrides.word_blacklist = vec!["koan".to_string(), "acme".to_string()];
        config.probes.dns_timeout_ms = 750;

        let (status, body) = get_json(app_with(config), "/admin/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["lists"]["disposable_domains"].as_u64().unwrap() > 0);
        assert!(body["lists"]["free_domains"].as_u64().unwrap() > 0);
        assert_eq!(body["overrides"]["word_blacklist"], json!(2));
        assert_eq!(body["overrides"]["domain_whitelist"], json!(0));
        assert_eq!(body["probes"]["dns_timeout_ms"], json!(750));
        assert_eq!(body["probes"]["http_timeout_ms"], json!(5000));
    }
}
