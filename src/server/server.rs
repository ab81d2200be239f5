//! HTTP server core implementation

use crate::config::ServerConfig;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                GatewayError::validation(format!("invalid request body: {}", err)).into()
            }))
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", concat!("routewise/", env!("CARGO_PKG_VERSION")))))
            .configure(routes::configure_routes)
    }

    /// Serve until the process receives a termination signal
    pub async fn start(self) -> Result<()> {
        self.serve(CancellationToken::new()).await
    }

    /// Serve until `shutdown` is cancelled or a termination signal arrives
    pub async fn serve(self, shutdown: CancellationToken) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .shutdown_timeout(self.config.shutdown_timeout);
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| format_bind_error(e, &bind_addr, port))?
            .run();
        let handle = server.handle();

        info!("HTTP server listening on {}", bind_addr);

        let stopper = tokio::spawn(async move {
            shutdown.cancelled().await;
            handle.stop(true).await;
        });

        let result = server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)));
        stopper.abort();
        result?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Graceful shutdown budget
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.config.shutdown_timeout)
    }
}

/// Turn a bind failure into an actionable message
pub(crate) fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
    if error.kind() == std::io::ErrorKind::AddrInUse {
        return GatewayError::server(format!(
            "port {} is already in use; stop the other process or set ROUTEWISE_SERVER_PORT",
            port
        ));
    }
    GatewayError::server(format!("failed to bind {}: {}", bind_addr, error))
}
