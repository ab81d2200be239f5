//! Model listing

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/v1/models", web::get().to(list_models));
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub provider: String,
    pub object: &'static str,
    /// Whether the provider passed its latest probe
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
    pub total: usize,
    pub providers: Vec<String>,
}

/// Every model of every registered provider, from configuration
pub async fn list_models(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let models: Vec<ModelInfo> = state
        .providers
        .iter()
        .flat_map(|provider| {
            let available = provider.is_healthy();
            provider.models().iter().map(move |model| ModelInfo {
                id: model.clone(),
                provider: provider.name().to_string(),
                object: "model",
                available,
            })
        })
        .collect();

    let response = ModelsResponse {
        total: models.len(),
        models,
        providers: state.providers.names(),
    };
    Ok(ApiResponse::success(response).ok())
}
