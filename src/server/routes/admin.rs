//! Administrative endpoints
//!
//! Provider inspection, on-demand probing and routing policy management.

use crate::config::RoutingPolicyConfig;
use crate::core::router::{POLICY_NAMES, PolicyMetricsSnapshot, RouterError, policy_config_for_name};
use crate::core::types::HealthRecord;
use crate::monitoring::ProviderMetrics;
use crate::monitoring::health::CycleSummary;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/providers", web::get().to(list_providers))
            .route("/providers/{name}/health", web::get().to(provider_health))
            .route("/providers/{name}/health-check", web::post().to(force_health_check))
            .route("/routing/policy", web::get().to(get_policy))
            .route("/routing/policy", web::put().to(update_policy)),
    );
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub models: Vec<String>,
    pub health: HealthRecord,
}

#[derive(Debug, Serialize)]
pub struct ProviderHealthReport {
    pub name: String,
    pub health: HealthRecord,
    pub metrics: ProviderMetrics,
}

#[derive(Debug, Serialize)]
pub struct HealthCheckReport {
    pub cycle: CycleSummary,
    pub provider: ProviderHealthReport,
}

#[derive(Debug, Serialize)]
pub struct PolicyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub available: [&'static str; 2],
    pub metrics: PolicyMetricsSnapshot,
}

/// Body of `PUT /admin/routing/policy`: a full policy or just its name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PolicyUpdate {
    Config(RoutingPolicyConfig),
    Name { name: String },
}

fn health_report(state: &AppState, name: &str) -> Result<ProviderHealthReport, GatewayError> {
    Ok(ProviderHealthReport {
        name: name.to_string(),
        health: state.monitor.get_health(name)?,
        metrics: state.monitor.get_metrics(name)?,
    })
}

async fn list_providers(state: web::Data<AppState>) -> HttpResponse {
    let providers: Vec<ProviderInfo> = state
        .providers
        .iter()
        .map(|p| ProviderInfo {
            name: p.name().to_string(),
            models: p.models().to_vec(),
            health: p.health(),
        })
        .collect();
    ApiResponse::success(providers).ok()
}

async fn provider_health(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    Ok(ApiResponse::success(health_report(&state, &name)?).ok())
}

/// Run a full probe cycle now and report the named provider
async fn force_health_check(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    if !state.providers.contains(&name) {
        return Err(GatewayError::ProviderNotFound(name.into_inner()));
    }
    info!(provider = %name, "health check requested");

    let cycle = state.monitor.force_check().await;
    let report = HealthCheckReport {
        cycle,
        provider: health_report(&state, &name)?,
    };
    Ok(ApiResponse::success(report).ok())
}

fn policy_info(state: &AppState) -> PolicyInfo {
    let policy = state.policy();
    PolicyInfo {
        name: policy.name(),
        description: policy.description(),
        available: POLICY_NAMES,
        metrics: policy.metrics().snapshot(),
    }
}

async fn get_policy(state: web::Data<AppState>) -> HttpResponse {
    ApiResponse::success(policy_info(&state)).ok()
}

async fn update_policy(
    state: web::Data<AppState>,
    body: web::Json<PolicyUpdate>,
) -> Result<HttpResponse, GatewayError> {
    let config = match body.into_inner() {
        PolicyUpdate::Config(config) => config,
        PolicyUpdate::Name { name } => policy_config_for_name(&name, &state.providers.names())
            .map_err(|e| match e {
                RouterError::UnknownPolicy(name) => GatewayError::validation(format!(
                    "unknown routing policy '{}', expected one of {:?}",
                    name, POLICY_NAMES
                )),
                other => other.into(),
            })?,
    };

    state.set_policy(&config)?;
    Ok(ApiResponse::success(policy_info(&state)).ok())
}
