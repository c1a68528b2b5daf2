//! # HTTP API
//!
//! The single-page form and the JSON API over the core pipeline.
//!
//! ```text
//! GET  /              form with defaults
//! POST /              "Predict Strength" (form-urlencoded), re-renders the page
//! GET  /health        liveness + model status flag
//! GET  /api/fields    field bounds, defaults and steps
//! GET  /api/model     loaded model summary or load error
//! POST /api/features  MixForm JSON -> clamped input, features, warnings
//! POST /api/predict   MixForm JSON -> full assessment
//! ```
//!
//! Every request builds its own input and feature record; the only shared
//! object is the read-only [`ModelSlot`] behind an `Arc`.

mod auth;
mod handlers;
mod page;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use mixgauge_core::ModelSlot;
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use page::{render_page, render_rejection};

// =============================================================================
// STATE
// =============================================================================

/// Shared application state. Cloned per request; all fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelSlot>,
    api_key: Option<Arc<str>>,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(model: ModelSlot, api_key: Option<&str>, rate_limit: NonZeroU32) -> Self {
        Self {
            model: Arc::new(model),
            api_key: api_key.map(Arc::from),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate_limit))),
        }
    }

    /// Take one token from the prediction rate limiter.
    fn admit(&self) -> Result<(), ApiError> {
        self.limiter.check().map_err(|_| ApiError::RateLimited)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

pub(crate) const RATE_LIMITED_MESSAGE: &str = "Too many prediction requests, try again shortly";

/// Request-level failures, rendered as `{error, status}` JSON.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    RateLimited,
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid API key".to_string(),
            ),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/fields", get(handlers::fields))
        .route("/api/model", get(handlers::model_status))
        .route("/api/features", post(handlers::features))
        .route("/api/predict", post(handlers::predict))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/health", get(handlers::health))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
