use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::deck::hydrate::{hydrate, HydrateStatus};
use crate::deck::sample_jobs::default_jobs;
use crate::deck::session::{DeckSnapshot, InputResult};
use crate::errors::AppError;
use crate::gesture::InputEvent;
use crate::matching::ranking::{DEFAULT_MIN_COMPATIBILITY, DEFAULT_TOP_LIMIT};
use crate::models::{JobPosting, Profile, ScoredJob, SwipeDirection, SwipeRecord};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HydrateResponse {
    #[serde(flatten)]
    pub status: HydrateStatus,
    pub deck: DeckSnapshot,
}

#[derive(Deserialize)]
pub struct InitializeRequest {
    pub profile: Profile,
    /// Falls back to the default job set when absent.
    #[serde(default)]
    pub jobs: Option<Vec<JobPosting>>,
}

#[derive(Deserialize)]
pub struct RankedQuery {
    pub min_compatibility: Option<u8>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

#[derive(Serialize)]
pub struct SwipeResponse {
    pub accepted: bool,
    pub deck: DeckSnapshot,
}

#[derive(Serialize)]
pub struct InputResponse {
    #[serde(flatten)]
    pub result: InputResult,
    pub deck: DeckSnapshot,
}

/// POST /api/v1/deck/:user_id/hydrate
pub async fn handle_hydrate(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HydrateResponse>, AppError> {
    let session = state.decks.session(&user_id).await?;
    let status = hydrate(&session, state.config.completion_threshold).await?;
    Ok(Json(HydrateResponse {
        status,
        deck: session.snapshot().await,
    }))
}

/// POST /api/v1/deck/:user_id/initialize
pub async fn handle_initialize(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<InitializeRequest>,
) -> Result<Json<DeckSnapshot>, AppError> {
    req.profile.validate()?;
    let jobs = req.jobs.unwrap_or_else(|| default_jobs(Utc::now()));
    validate_jobs(&jobs)?;

    let session = state.decks.session(&user_id).await?;
    Ok(Json(session.initialize(jobs, req.profile).await?))
}

/// GET /api/v1/deck/:user_id
pub async fn handle_get_deck(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DeckSnapshot>, AppError> {
    let session = state.decks.lookup(&user_id).await?;
    Ok(Json(session.snapshot().await))
}

/// GET /api/v1/deck/:user_id/ranked
pub async fn handle_ranked(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RankedQuery>,
) -> Result<Json<Vec<ScoredJob>>, AppError> {
    let min = params.min_compatibility.unwrap_or(DEFAULT_MIN_COMPATIBILITY);
    if min > 100 {
        return Err(AppError::Validation(
            "min_compatibility must be between 0 and 100".to_string(),
        ));
    }
    let limit = params.limit.unwrap_or(DEFAULT_TOP_LIMIT);

    let session = state.decks.lookup(&user_id).await?;
    Ok(Json(session.ranked(min, limit).await))
}

/// POST /api/v1/deck/:user_id/swipe
pub async fn handle_swipe(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<SwipeRequest>,
) -> Result<Json<SwipeResponse>, AppError> {
    let session = state.decks.session(&user_id).await?;
    let accepted = session.swipe(req.direction).await?;
    Ok(Json(SwipeResponse {
        accepted,
        deck: session.snapshot().await,
    }))
}

/// POST /api/v1/deck/:user_id/input
pub async fn handle_input(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(event): Json<InputEvent>,
) -> Result<Json<InputResponse>, AppError> {
    let session = state.decks.session(&user_id).await?;
    let result = session.handle_input(event).await?;
    Ok(Json(InputResponse {
        result,
        deck: session.snapshot().await,
    }))
}

/// PUT /api/v1/deck/:user_id/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(profile): Json<Profile>,
) -> Result<Json<DeckSnapshot>, AppError> {
    profile.validate()?;
    let session = state.decks.session(&user_id).await?;
    Ok(Json(session.update_profile(profile).await?))
}

/// DELETE /api/v1/deck/:user_id
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let session = state.decks.session(&user_id).await?;
    session.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/deck/:user_id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SwipeRecord>>, AppError> {
    let session = state.decks.lookup(&user_id).await?;
    Ok(Json(session.history().await))
}

fn validate_jobs(jobs: &[JobPosting]) -> Result<(), AppError> {
    let mut seen = std::collections::HashSet::new();
    for job in jobs {
        if job.id.trim().is_empty() {
            return Err(AppError::Validation("every job needs an id".to_string()));
        }
        if !seen.insert(job.id.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate job id '{}'",
                job.id
            )));
        }
    }
    Ok(())
}
