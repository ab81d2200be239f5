//! HTTP route modules
//!
//! - `health` - liveness and probe metrics
//! - `chat` - chat completions and dry-run routing
//! - `models` - model listing
//! - `admin` - provider inspection and routing policy management

pub mod admin;
pub mod chat;
pub mod health;
pub mod models;

use actix_web::{HttpResponse, web};

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// Create a successful response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(meta),
        }
    }

    /// 200 with this body
    pub fn ok(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(chat::configure_routes)
        .configure(models::configure_routes)
        .configure(admin::configure_routes);
}
