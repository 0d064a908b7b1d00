use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::ranking::MatchTier;
use crate::matching::scorer::{compatibility_breakdown, CompatibilityBreakdown};
use crate::matching::CompatibilityWeights;
use crate::models::{JobPosting, Profile};

#[derive(Deserialize)]
pub struct CompatibilityRequest {
    pub profile: Profile,
    pub job: JobPosting,
    #[serde(default)]
    pub weights: Option<CompatibilityWeights>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResponse {
    #[serde(flatten)]
    pub breakdown: CompatibilityBreakdown,
    pub tier: MatchTier,
    pub label: &'static str,
}

/// POST /api/v1/compatibility
pub async fn handle_compatibility(
    Json(req): Json<CompatibilityRequest>,
) -> Result<Json<CompatibilityResponse>, AppError> {
    let weights = req.weights.unwrap_or_default();
    validate_weights(&weights)?;

    let breakdown = compatibility_breakdown(&req.profile, &req.job, &weights, Utc::now());
    let tier = MatchTier::from_score(breakdown.score);
    Ok(Json(CompatibilityResponse {
        breakdown,
        tier,
        label: tier.label(),
    }))
}

fn validate_weights(weights: &CompatibilityWeights) -> Result<(), AppError> {
    let all = [
        weights.skill_overlap,
        weights.location_fit,
        weights.seniority_delta,
        weights.recency_bonus,
    ];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(AppError::Validation(
            "weights must be finite and non-negative".to_string(),
        ));
    }
    if weights.sum() <= 0.0 {
        return Err(AppError::Validation(
            "at least one weight must be positive".to_string(),
        ));
    }
    Ok(())
}
