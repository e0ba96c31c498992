use crate::errors::AppError;
use crate::models::License;
use crate::services::LicenseService;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: LicenseService,
}

/// Builds the HTTP API over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/licenses", post(store_license).put(update_license))
        .route("/api/v1/licenses/verify", post(verify_license))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "dca-license-verify",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

fn validate_identity(license: &License) -> Result<(), AppError> {
    if license.first_name.trim().is_empty() || license.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "FirstName and LastName are required".to_string(),
        ));
    }
    if license.number <= 0 {
        return Err(AppError::BadRequest(
            "Number must be a positive license number".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/licenses
pub async fn store_license(
    State(state): State<Arc<AppState>>,
    Json(license): Json<License>,
) -> Result<(StatusCode, Json<License>), AppError> {
    validate_identity(&license)?;
    let stored = state.service.store_license(license).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /api/v1/licenses
pub async fn update_license(
    State(state): State<Arc<AppState>>,
    Json(license): Json<License>,
) -> Result<StatusCode, AppError> {
    validate_identity(&license)?;
    state.service.update_license(&license).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/licenses/verify
///
/// Failures still return the license as it stood after verification so the
/// caller sees which fields were recorded.
pub async fn verify_license(
    State(state): State<Arc<AppState>>,
    Json(mut license): Json<License>,
) -> Response {
    let result = match validate_identity(&license) {
        Ok(()) => state.service.verify_license(&mut license).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(license)).into_response(),
        Err(e) => {
            tracing::warn!("Verification of license {} failed: {}", license.number, e);
            (
                e.status_code(),
                Json(json!({
                    "error": e.to_string(),
                    "license": license,
                })),
            )
                .into_response()
        }
    }
}
