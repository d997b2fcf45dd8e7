//! HTTP API for the valuation engine
//!
//! Endpoints:
//! - GET  /health      - Health check
//! - POST /estimate    - Raw form → valuation with formatted breakdown
//! - POST /judge       - Raw form + listed price → judgment with message
//! - POST /predict     - Scoring contract (Arabic keys), served from the baseline
//! - POST /judge_price - Judgment contract (Arabic keys), served from local bands

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::judge::{parse_listed_price, validate_listed_price};
use crate::core::presentation::{
    factor_label, failure_notice, format_impact, format_price, judgment_color, judgment_message,
};
use crate::core::ValuationFacade;
use crate::error::ValuationError;
use crate::types::{
    FeatureField, JudgePriceRequest, JudgePriceResponse, Judgment, Locale, RawInput, ScoreResponse,
    ScoringPayload, Valuation, ValuationSource,
};

/// App state
pub struct AppState {
    pub facade: ValuationFacade,
    /// Used when a request does not name a locale
    pub default_locale: Locale,
}

/// Estimate request: the raw form plus an optional locale
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(flatten)]
    pub input: RawInput,
    #[serde(default)]
    pub lang: Option<Locale>,
}

/// One line of the factor breakdown
#[derive(Debug, Serialize)]
pub struct FactorView {
    pub name: String,
    pub label: String,
    pub impact_pct: f64,
    pub impact: String,
    pub low_confidence: bool,
}

/// Estimate response
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub estimate: f64,
    pub formatted_price: String,
    pub source: ValuationSource,
    pub factors: Vec<FactorView>,
    pub low_confidence: Vec<FeatureField>,
    pub computed_at: DateTime<Utc>,
}

/// Listed price as typed (text) or as a JSON number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListedPriceInput {
    Number(f64),
    Text(String),
}

impl ListedPriceInput {
    fn resolve(&self) -> Result<f64, ValuationError> {
        match self {
            ListedPriceInput::Number(v) => validate_listed_price(*v),
            ListedPriceInput::Text(s) => parse_listed_price(s),
        }
    }
}

/// Judge request
#[derive(Debug, Deserialize)]
pub struct JudgeRequest {
    #[serde(flatten)]
    pub input: RawInput,
    #[serde(default)]
    pub listed_price: Option<ListedPriceInput>,
    #[serde(default)]
    pub lang: Option<Locale>,
}

/// Judge response
#[derive(Debug, Serialize)]
pub struct JudgeResponse {
    pub judgment: Judgment,
    pub message: String,
    pub color: String,
    pub formatted_estimate: String,
    pub formatted_listed_price: String,
    pub computed_at: DateTime<Utc>,
}

/// Error body: a generic localized notice, never internal details
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub scoring_backend: Option<String>,
    pub judgment_enabled: bool,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Create the API router
pub fn create_router(facade: ValuationFacade, default_locale: Locale) -> Router {
    let state = Arc::new(AppState {
        facade,
        default_locale,
    });

    Router::new()
        .route("/health", get(health))
        .route("/estimate", post(estimate))
        .route("/judge", post(judge))
        .route("/predict", post(predict))
        .route("/judge_price", post(judge_price))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        scoring_backend: state.facade.backend_description(),
        judgment_enabled: state.facade.profile().judgment,
    })
}

/// Estimate a property value
async fn estimate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Json<EstimateResponse> {
    let locale = req.lang.unwrap_or(state.default_locale);
    let valuation = state.facade.estimate_for(&req.input).await;
    info!(estimate = valuation.estimate, source = %valuation.source, "estimate served");
    Json(estimate_response(&valuation, locale))
}

/// Judge a listed price
async fn judge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JudgeRequest>,
) -> Result<Json<JudgeResponse>, ApiError> {
    let locale = req.lang.unwrap_or(state.default_locale);

    let listed_price = req
        .listed_price
        .as_ref()
        .ok_or_else(|| ValuationError::InvalidListedPrice(String::new()))
        .and_then(ListedPriceInput::resolve)
        .map_err(|e| api_error(&e, locale))?;

    let judgment = state
        .facade
        .judge_for(&req.input, listed_price)
        .await
        .map_err(|e| api_error(&e, locale))?;

    info!(category = %judgment.category, deviation = judgment.deviation, "judgment served");

    Ok(Json(JudgeResponse {
        message: judgment_message(judgment.category, locale).to_string(),
        color: judgment_color(judgment.category).to_string(),
        formatted_estimate: format_price(judgment.estimate, locale),
        formatted_listed_price: format_price(judgment.listed_price, locale),
        judgment,
        computed_at: Utc::now(),
    }))
}

/// Scoring contract, answered by the local baseline
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScoringPayload>,
) -> Json<ScoreResponse> {
    let valuation = state.facade.baseline(&payload.to_features());
    Json(ScoreResponse::from_valuation(&valuation))
}

/// Judgment contract, answered by the local bands
async fn judge_price(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JudgePriceRequest>,
) -> Result<Json<JudgePriceResponse>, ApiError> {
    let locale = state.default_locale;
    let valuation = state.facade.baseline(&req.features.to_features());
    let judgment = state
        .facade
        .judge_valuation(req.listed_price, &valuation)
        .map_err(|e| api_error(&e, locale))?;
    Ok(Json(JudgePriceResponse {
        judgment_key: judgment.category.key().to_string(),
    }))
}

fn estimate_response(valuation: &Valuation, locale: Locale) -> EstimateResponse {
    EstimateResponse {
        estimate: valuation.estimate,
        formatted_price: format_price(valuation.estimate, locale),
        source: valuation.source,
        factors: valuation
            .factors
            .iter()
            .map(|f| FactorView {
                name: f.name.clone(),
                label: factor_label(&f.name, locale).to_string(),
                impact_pct: f.impact_pct,
                impact: format_impact(f.impact_pct),
                low_confidence: f.low_confidence,
            })
            .collect(),
        low_confidence: valuation.low_confidence.clone(),
        computed_at: Utc::now(),
    }
}

fn api_error(err: &ValuationError, locale: Locale) -> ApiError {
    warn!(error = %err, "request could not be completed");
    let status = match err {
        ValuationError::InvalidListedPrice(_) => StatusCode::BAD_REQUEST,
        ValuationError::DegenerateEstimate(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ValuationError::JudgmentDisabled => StatusCode::NOT_IMPLEMENTED,
    };
    (
        status,
        Json(ErrorResponse {
            error: failure_notice(err, locale).to_string(),
        }),
    )
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    facade: ValuationFacade,
    default_locale: Locale,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(facade, default_locale);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "valuation API listening");
    info!("  GET  /health      - Health check");
    info!("  POST /estimate    - Estimate from raw form");
    info!("  POST /judge       - Judge a listed price");
    info!("  POST /predict     - Scoring contract (baseline)");
    info!("  POST /judge_price - Judgment contract (local bands)");
    axum::serve(listener, router).await?;
    Ok(())
}
