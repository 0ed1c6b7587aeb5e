use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use configuration::{Config, ServerSettings};
use database::{ConnectionProvider, DbRepository, PosStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod checkout;
pub mod error;
pub mod handlers;
pub mod telemetry;

#[cfg(test)]
mod test_support;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "POS System API";

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PosStore>,
}

/// Browser access is limited to the configured origins, with credentials.
fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin.");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Builds the application router around an already constructed state.
pub fn build_router(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/search_product", post(handlers::search_product))
        .route("/purchase", post(handlers::purchase))
        .with_state(state)
        .layer(cors_layer(settings))
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// The database is not contacted here; connections are opened per request.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    let provider = ConnectionProvider::new(config.database.clone());
    if !provider.settings().is_complete() {
        tracing::warn!("Database settings are incomplete; data endpoints will answer 503.");
    }
    let store: Arc<dyn PosStore> = Arc::new(DbRepository::new(provider));
    let app = build_router(Arc::new(AppState { store }), &config.server);

    tracing::info!("Web server started and listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
