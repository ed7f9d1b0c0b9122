//! Playlist conversion and generation handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use moodtune_core::{
    Activity, Criteria, Environment, MatchDiagnostic, PipelineError, Platform, ScoredTrack,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub playlist_url: String,
    pub target_platform: String,
    #[serde(default)]
    pub playlist_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub url: String,
    pub matched: usize,
    /// One entry per source track that could not be found on the target.
    pub unmatched: Vec<MatchDiagnostic>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub seed_playlist_url: String,
    pub seed_platform: String,
    pub target_platform: String,
    pub target_energy: f64,
    pub target_valence: f64,
    pub activity: Activity,
    pub environment: Environment,
    pub amount: usize,
    #[serde(default)]
    pub playlist_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub url: String,
    /// Selected tracks, closest to the target first.
    pub tracks: Vec<ScoredTrack>,
    /// Seed tracks ignored for lack of audio features.
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a pipeline failure to a status code and message.
fn error_response(e: PipelineError) -> ApiError {
    let status = match &e {
        PipelineError::UnrecognizedReference(_)
        | PipelineError::UnsupportedConversion { .. }
        | PipelineError::UnsupportedPlatform(_)
        | PipelineError::InvalidTrack { .. }
        | PipelineError::InvalidCriteria(_) => StatusCode::BAD_REQUEST,
        PipelineError::EmptyPlaylist(_)
        | PipelineError::NoMatchesFound { .. }
        | PipelineError::NoScorableTracks { .. } => StatusCode::NOT_FOUND,
        PipelineError::Platform(_) => StatusCode::BAD_GATEWAY,
        PipelineError::FeatureTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        warn!(kind = e.kind(), "Request failed: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn parse_platform(value: &str) -> Result<Platform, ApiError> {
    value.parse::<Platform>().map_err(error_response)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/convert
///
/// Copy a playlist to the other platform.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let target = parse_platform(&request.target_platform)?;

    info!(url = %request.playlist_url, target = %target, "Convert requested");

    let outcome = state
        .conversion()
        .convert_named(&request.playlist_url, target, request.playlist_name.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(ConvertResponse {
        url: outcome.url,
        matched: outcome.result.matched_count(),
        unmatched: outcome.result.diagnostics,
    }))
}

/// POST /api/v1/generate
///
/// Build a mood playlist from a seed playlist.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let seed_platform = parse_platform(&request.seed_platform)?;
    let target_platform = parse_platform(&request.target_platform)?;
    let criteria = Criteria {
        target_energy: request.target_energy,
        target_valence: request.target_valence,
        activity: request.activity,
        environment: request.environment,
        amount: request.amount,
    };

    info!(
        url = %request.seed_playlist_url,
        target = %target_platform,
        activity = %criteria.activity,
        environment = %criteria.environment,
        amount = criteria.amount,
        "Generate requested"
    );

    let outcome = state
        .generation()
        .generate_detailed(
            &request.seed_playlist_url,
            seed_platform,
            target_platform,
            &criteria,
            request.playlist_name.as_deref(),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(GenerateResponse {
        url: outcome.url,
        tracks: outcome.selected,
        skipped: outcome.skipped,
    }))
}
