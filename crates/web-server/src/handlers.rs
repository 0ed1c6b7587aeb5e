use crate::{checkout, error::AppError, AppState, SERVICE_NAME};
use axum::{body::Bytes, extract::State, Json};
use chrono::Local;
use core_types::{ProductSearchRequest, ProductSearchResponse, PurchaseRequest, PurchaseResponse};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// Whether the database settings look present. No connection is attempted.
    pub db_configured: bool,
}

/// Decodes a JSON request body whatever its `Content-Type` (registers do not
/// always send one). Bodies that are not valid JSON for `T` are a 422.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// # GET /
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        db_configured: state.store.is_configured(),
    })
}

/// # POST /search_product
/// Looks a product up by code. An unknown code is not an error: the response
/// simply carries `"product": null`.
pub async fn search_product(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ProductSearchResponse>, AppError> {
    let request: ProductSearchRequest = parse_body(&body)?;
    let code = request
        .normalized_code()
        .ok_or_else(|| AppError::BadRequest("A product code is required".to_string()))?;

    tracing::info!(code, "Searching product.");
    let product = state.store.find_product_by_code(code).await?;

    match &product {
        Some(found) => tracing::info!(code, name = %found.prd_name, "Product found."),
        None => tracing::info!(code, "No product matches the code."),
    }
    Ok(Json(ProductSearchResponse { product }))
}

/// # POST /purchase
pub async fn purchase(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PurchaseResponse>, AppError> {
    let request: PurchaseRequest = parse_body(&body)?;
    tracing::info!(items = request.items.len(), "Starting purchase.");

    let response = checkout::execute(state.store.as_ref(), &request).await?;
    Ok(Json(response))
}
