//! Hydration: rebuild a deck from the persisted profile.
//!
//! A stored profile at or above the completion threshold gets a fresh deck of
//! the default jobs. Anything less is replaced by the placeholder profile and
//! the deck stays unpopulated; the status says why. A stored placeholder
//! counts as no profile at all.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::deck::sample_jobs::default_jobs;
use crate::deck::session::DeckSession;
use crate::errors::AppError;
use crate::models::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HydrateStatus {
    Ready { cards: usize },
    ProfileMissing,
    ProfileIncomplete { completion: u8, threshold: u8 },
}

pub async fn hydrate(session: &Arc<DeckSession>, threshold: u8) -> Result<HydrateStatus, AppError> {
    let status = match session.profile().await {
        None => HydrateStatus::ProfileMissing,
        Some(profile) if profile.is_placeholder() => HydrateStatus::ProfileMissing,
        Some(profile) if profile.meets_completion(threshold) => {
            let snapshot = session.initialize(default_jobs(Utc::now()), profile).await?;
            return Ok(HydrateStatus::Ready {
                cards: snapshot.total_cards,
            });
        }
        Some(profile) => HydrateStatus::ProfileIncomplete {
            completion: profile.completion,
            threshold,
        },
    };

    info!(user_id = %session.user_id(), ?status, "deck not populated");
    session.replace_profile(Profile::empty()).await?;
    Ok(status)
}
