//! Route handlers.

use super::page::{render_page, render_rejection};
use super::{ApiError, AppState, RATE_LIMITED_MESSAGE};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mixgauge_core::input::Adjustment;
use mixgauge_core::model::ModelInfo;
use mixgauge_core::{
    Assessment, FeatureRecord, FieldSpec, MixField, MixForm, Outcome, RawMixInput, Warning,
    derive, is_blocked, validate,
};
use serde::Serialize;

// =============================================================================
// RESPONSE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub input: RawMixInput,
    pub adjustments: Vec<Adjustment>,
    pub features: FeatureRecord,
    pub warnings: Vec<Warning>,
    pub blocked: bool,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub message: String,
}

// =============================================================================
// PAGE
// =============================================================================

/// `GET /`: the form with default values.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    render_page(&MixForm::default(), None, &state.model)
}

/// `POST /`: the "Predict Strength" trigger.
///
/// Unparseable fields are treated as missing and fall back to defaults.
/// A rate-limited submission re-renders the form with status `429`.
pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let mut form = MixForm::default();
    for (key, value) in pairs {
        if let Some(field) = MixField::from_key(&key) {
            form.set(field, value.trim().parse::<f64>().ok());
        }
    }

    if state.admit().is_err() {
        tracing::warn!("form submission rate limited");
        let page = render_rejection(&form, RATE_LIMITED_MESSAGE, &state.model);
        return (StatusCode::TOO_MANY_REQUESTS, page).into_response();
    }

    let assessment = Assessment::from_form(&form, state.model.as_ref());
    log_outcome(&assessment);
    render_page(&MixForm::from(assessment.input), Some(&assessment), &state.model).into_response()
}

// =============================================================================
// JSON API
// =============================================================================

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.model.is_ready(),
    })
}

/// `GET /api/fields`
pub async fn fields() -> Json<Vec<FieldSpec>> {
    Json(MixField::ALL.into_iter().map(MixField::spec).collect())
}

/// `GET /api/model`
pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse {
        loaded: state.model.is_ready(),
        model: state.model.model().map(|m| m.info()),
        error: state.model.load_error().map(|e| e.to_string()),
    })
}

/// `POST /api/features`: derivation and validation only, no model call.
pub async fn features(
    payload: Result<Json<MixForm>, JsonRejection>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let Json(form) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let input = form.collect();
    let warnings = validate(&input);
    Ok(Json(FeaturesResponse {
        input,
        adjustments: form.adjustments(),
        features: derive(&input),
        blocked: is_blocked(&warnings),
        warnings,
    }))
}

/// `POST /api/predict`
///
/// Always `200` once the request is admitted: blocked and failed predictions
/// are reported in the body's `outcome`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<MixForm>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(form) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.admit()?;

    let assessment = Assessment::from_form(&form, state.model.as_ref());
    log_outcome(&assessment);
    let message = assessment.message();
    Ok(Json(PredictResponse {
        assessment,
        message,
    }))
}

fn log_outcome(assessment: &Assessment) {
    match &assessment.outcome {
        Outcome::Predicted(strength) => {
            tracing::debug!(mpa = strength.mpa, warnings = assessment.warnings.len(), "prediction served");
        }
        Outcome::Blocked => tracing::debug!("prediction blocked by validation"),
        Outcome::Failed(err) => tracing::warn!(kind = err.kind(), "prediction failed: {err}"),
    }
}
