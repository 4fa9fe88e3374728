//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use polarity_core::{Error, Prediction, TokenWeight};
use polarity_explain::render_html;
use polarity_model::normalize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Maximum accepted input length in Unicode code points
const MAX_TEXT_CHARS: usize = 280;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/explain", post(explain))
        .route("/metrics", get(render_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Prediction or explanation request body
#[derive(Debug, Deserialize)]
struct TextRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct PredictionResponse {
    sentiment: String,
    confidence: f64,
    probability_positive: f64,
    probability_negative: f64,
}

impl From<Prediction> for PredictionResponse {
    fn from(p: Prediction) -> Self {
        Self {
            sentiment: p.sentiment.as_str().to_string(),
            confidence: p.confidence,
            probability_positive: p.probability_positive,
            probability_negative: p.probability_negative,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExplanationResponse {
    sentiment: String,
    explanation: Vec<TokenWeight>,
    html_explanation: String,
}

/// Root status endpoint; always 200, even in degraded mode.
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "model_loaded": state.model_loaded(),
    }))
}

/// Health check: 503 while the model is unavailable.
async fn health(State(state): State<AppState>) -> Result<Response, ApiError> {
    let model = state.model.as_ref().ok_or(ApiError::ModelUnavailable)?;
    Ok(Json(json!({
        "status": "healthy",
        "model": model.source(),
    }))
    .into_response())
}

/// Point prediction with calibrated confidence.
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let start = Instant::now();
    metrics::counter!("polarity_requests_total", "endpoint" => "predict").increment(1);

    validate_text(&req.text)?;
    let model = state.model.as_ref().ok_or(ApiError::ModelUnavailable)?;

    let prediction = model.predict(&req.text)?;
    debug!(
        sentiment = %prediction.sentiment,
        confidence = prediction.confidence,
        "prediction served"
    );

    metrics::histogram!("polarity_request_latency_us", "endpoint" => "predict")
        .record(start.elapsed().as_micros() as f64);

    Ok(Json(prediction.into()))
}

/// Local explanation: perturbs the normalized input, re-classifies the
/// variants through the model, and reports per-token attributions.
async fn explain(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ExplanationResponse>, ApiError> {
    let start = Instant::now();
    metrics::counter!("polarity_requests_total", "endpoint" => "explain").increment(1);

    validate_text(&req.text)?;
    let model = state.model.clone().ok_or(ApiError::ModelUnavailable)?;
    let explainer = state.explainer.clone();

    // The explainer re-classifies hundreds of variants; keep that work off
    // the async executor.
    let raw_text = req.text;
    let result = tokio::task::spawn_blocking(
        move || -> polarity_core::Result<(Prediction, Vec<TokenWeight>, String)> {
            let normalized = normalize(&raw_text);

            let tokens = explainer.explain_instance(&normalized, |texts| {
                texts
                    .iter()
                    .map(|t| model.probabilities_normalized(t))
                    .collect()
            })?;

            // Re-derive the label through the prediction path so the
            // reported sentiment always matches /predict for the same input.
            let prediction = model.predict(&raw_text)?;
            let html = render_html(prediction.sentiment, &tokens, &normalized);

            Ok((prediction, tokens, html))
        },
    )
    .await
    .map_err(|e| ApiError::Internal(format!("explanation task failed: {e}")))??;

    let (prediction, tokens, html) = result;
    info!(
        sentiment = %prediction.sentiment,
        tokens = tokens.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "explanation served"
    );

    metrics::histogram!("polarity_request_latency_us", "endpoint" => "explain")
        .record(start.elapsed().as_micros() as f64);

    Ok(Json(ExplanationResponse {
        sentiment: prediction.sentiment.as_str().to_string(),
        explanation: tokens,
        html_explanation: html,
    }))
}

/// Prometheus metrics render
async fn render_metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Enforce the 1..=280 code-point bound before anything reaches the core.
fn validate_text(text: &str) -> Result<(), ApiError> {
    let chars = text.chars().count();
    if chars == 0 {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(ApiError::Validation(format!(
            "text is {chars} characters, maximum is {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Error handling
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    ModelUnavailable,
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => ApiError::Validation(msg),
            Error::ModelUnavailable => ApiError::ModelUnavailable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            ApiError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "model_unavailable",
                "model artifacts are not loaded".to_string(),
            ),
            ApiError::Internal(msg) => {
                warn!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        metrics::counter!("polarity_errors_total", "type" => kind).increment(1);

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
