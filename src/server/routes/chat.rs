//! Chat completions and dry-run routing

use crate::core::providers::ProviderError;
use crate::core::types::ChatRequest;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

pub const PROVIDER_HEADER: &str = "x-routewise-provider";
pub const ATTEMPTS_HEADER: &str = "x-routewise-attempts";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/chat/completions", web::post().to(chat_completions))
        .route("/v1/routing/decide", web::post().to(decide_route));
}

fn with_request_id(mut request: ChatRequest) -> ChatRequest {
    if request.request_id.is_none() {
        request.request_id = Some(Uuid::new_v4().to_string());
    }
    request
}

/// Route the request and execute it on the chosen provider
pub async fn chat_completions(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = with_request_id(request.into_inner());
    info!(
        model = %request.model,
        request_id = request.request_id.as_deref().unwrap_or_default(),
        "chat completion request"
    );

    if request.stream {
        return Err(ProviderError::not_implemented("gateway", "streaming").into());
    }

    let policy = state.policy();
    let outcome = state
        .dispatcher
        .dispatch(policy.as_ref(), &state.providers, &request)
        .await?;

    info!(
        provider = %outcome.decision.provider_name,
        attempts = outcome.attempts,
        latency_ms = outcome.latency.as_millis() as u64,
        "chat completion served"
    );

    let mut response = outcome.response;
    if response.request_id.is_none() {
        response.request_id = request.request_id.clone();
    }

    Ok(HttpResponse::Ok()
        .insert_header((PROVIDER_HEADER, outcome.decision.provider_name.as_str()))
        .insert_header((ATTEMPTS_HEADER, outcome.attempts.to_string()))
        .json(response))
}

/// Decide a route without executing it
pub async fn decide_route(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = with_request_id(request.into_inner());
    let decision = state.policy().decide_route(&request, &state.providers)?;

    Ok(ApiResponse::success_with_meta(
        decision,
        serde_json::json!({ "request_id": request.request_id }),
    )
    .ok())
}
