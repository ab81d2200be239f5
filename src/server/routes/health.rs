//! Health and metrics endpoints

use crate::core::router::PolicyMetricsSnapshot;
use crate::core::types::HealthRecord;
use crate::monitoring::ProviderMetrics;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/v1/metrics", web::get().to(metrics));
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `healthy`, `degraded` or `unhealthy`
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub uptime_seconds: i64,
    pub providers: HashMap<String, HealthRecord>,
}

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub providers: HashMap<String, ProviderMetrics>,
    pub policy: &'static str,
    pub routing: PolicyMetricsSnapshot,
}

fn overall_status(providers: &HashMap<String, HealthRecord>) -> &'static str {
    let healthy = providers.values().filter(|r| r.healthy).count();
    match (healthy, providers.len()) {
        (h, total) if h == total => "healthy",
        (0, _) => "unhealthy",
        _ => "degraded",
    }
}

/// Gateway liveness plus the cached health of every provider
///
/// Always 200 while the gateway itself is serving; the body says whether
/// providers are usable.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let providers = state.monitor.get_all_health();
    let status = HealthStatus {
        status: Cow::Borrowed(overall_status(&providers)),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        uptime_seconds: state.uptime_secs(),
        providers,
    };

    Ok(ApiResponse::success(status).ok())
}

/// Probe metrics per provider and counters of the active policy
async fn metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let policy = state.policy();
    let report = MetricsReport {
        providers: state.monitor.get_all_metrics(),
        policy: policy.name(),
        routing: policy.metrics().snapshot(),
    };
    Ok(ApiResponse::success(report).ok())
}
