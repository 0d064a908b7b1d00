//! Deck sessions: the async owner of one user's deck.
//!
//! The pure reducer in `machine` decides every transition. A session serializes
//! events behind a mutex, carries out the effects (callbacks, delayed advance)
//! and saves the persisted slice at the lifecycle points that change it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::Config;
use crate::deck::callbacks::{dispatch, SwipeCallbacks};
use crate::deck::machine::{reduce, DeckEffect, DeckEvent, DeckPhase, DeckState, Transition};
use crate::errors::AppError;
use crate::gesture::{GestureConfig, InputEvent, InputOutcome, InputRouter};
use crate::matching::ranking::{filter_by_compatibility, top_matching};
use crate::matching::CompatibilityScorer;
use crate::models::{JobPosting, Profile, ScoredJob, SwipeDirection, SwipeRecord};
use crate::persistence::{DeckStore, PersistedDeck};

/// Read-only view of a deck for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSnapshot {
    pub user_id: String,
    pub phase: DeckPhase,
    pub current_card: Option<ScoredJob>,
    pub remaining_cards: usize,
    pub total_cards: usize,
    pub cursor: usize,
    pub history_length: usize,
    pub profile: Option<Profile>,
}

/// What a routed input event did to the deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputResult {
    pub outcome: InputOutcome,
    /// Set only when the outcome resolved a swipe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

pub struct DeckSession {
    user_id: String,
    state: Mutex<DeckState>,
    input: Mutex<InputRouter>,
    scorer: Arc<dyn CompatibilityScorer>,
    callbacks: Arc<dyn SwipeCallbacks>,
    store: Arc<dyn DeckStore>,
    animation_delay: Duration,
}

impl DeckSession {
    pub fn new(
        user_id: impl Into<String>,
        restored: Option<PersistedDeck>,
        scorer: Arc<dyn CompatibilityScorer>,
        callbacks: Arc<dyn SwipeCallbacks>,
        store: Arc<dyn DeckStore>,
        animation_delay: Duration,
        gesture: GestureConfig,
    ) -> Self {
        let restored = restored.unwrap_or_default();
        Self {
            user_id: user_id.into(),
            state: Mutex::new(DeckState::restored(restored.profile, restored.swipe_history)),
            input: Mutex::new(InputRouter::new(gesture)),
            scorer,
            callbacks,
            store,
            animation_delay,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Scores `jobs` against `profile` and starts a fresh deck at the first card.
    pub async fn initialize(
        self: &Arc<Self>,
        jobs: Vec<JobPosting>,
        profile: Profile,
    ) -> Result<DeckSnapshot, AppError> {
        let count = jobs.len();
        self.apply(DeckEvent::Initialize {
            jobs,
            profile,
            at: Utc::now(),
        })
        .await?;
        info!(user_id = %self.user_id, cards = count, "deck initialized");
        Ok(self.snapshot().await)
    }

    /// Returns whether the swipe was accepted. Swipes on an empty deck or
    /// during the animation window are ignored.
    pub async fn swipe(self: &Arc<Self>, direction: SwipeDirection) -> Result<bool, AppError> {
        let effect = self
            .apply(DeckEvent::Swipe {
                direction,
                at: Utc::now(),
            })
            .await?;
        Ok(effect.is_some())
    }

    pub async fn update_profile(self: &Arc<Self>, profile: Profile) -> Result<DeckSnapshot, AppError> {
        self.apply(DeckEvent::UpdateProfile {
            profile,
            at: Utc::now(),
        })
        .await?;
        Ok(self.snapshot().await)
    }

    /// Swaps the stored profile without re-scoring the cards already dealt.
    pub async fn replace_profile(self: &Arc<Self>, profile: Profile) -> Result<(), AppError> {
        self.apply(DeckEvent::ReplaceProfile { profile }).await?;
        Ok(())
    }

    /// Clears cards, cursor and history. In-flight gestures are dropped too.
    pub async fn reset(self: &Arc<Self>) -> Result<(), AppError> {
        self.apply(DeckEvent::Reset).await?;
        self.input.lock().await.clear();
        info!(user_id = %self.user_id, "deck reset");
        Ok(())
    }

    /// Feeds a raw input event through the gesture layer and swipes when a
    /// direction resolves.
    pub async fn handle_input(self: &Arc<Self>, event: InputEvent) -> Result<InputResult, AppError> {
        let outcome = {
            let mut input = self.input.lock().await;
            let outcome = input.handle(event);
            debug!(user_id = %self.user_id, active = input.active_sequences(), ?outcome, "input routed");
            outcome
        };
        let accepted = match outcome {
            InputOutcome::Swipe { direction } => Some(self.swipe(direction).await?),
            _ => None,
        };
        Ok(InputResult { outcome, accepted })
    }

    pub async fn snapshot(&self) -> DeckSnapshot {
        let state = self.state.lock().await;
        DeckSnapshot {
            user_id: self.user_id.clone(),
            phase: state.phase(),
            current_card: state.current_card().cloned(),
            remaining_cards: state.remaining_cards(),
            total_cards: state.cards.len(),
            cursor: state.cursor,
            history_length: state.history.len(),
            profile: state.profile.clone(),
        }
    }

    pub async fn history(&self) -> Vec<SwipeRecord> {
        self.state.lock().await.history.clone()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.state.lock().await.profile.clone()
    }

    /// Cards not yet swiped, at or above `min_compatibility`, best first.
    pub async fn ranked(&self, min_compatibility: u8, limit: usize) -> Vec<ScoredJob> {
        let state = self.state.lock().await;
        let eligible = filter_by_compatibility(state.upcoming(), min_compatibility);
        top_matching(&eligible, limit)
    }

    /// Reduces `event`, saves the result, and only then commits it and runs
    /// its effects. A failed save leaves the deck exactly as it was.
    async fn apply(self: &Arc<Self>, event: DeckEvent) -> Result<Option<DeckEffect>, AppError> {
        let is_swipe = matches!(event, DeckEvent::Swipe { .. });
        let mut state = self.state.lock().await;

        let Transition { state: next, effect } =
            reduce(state.clone(), event, self.scorer.as_ref());

        // rejected swipes change nothing worth saving
        if !is_swipe || effect.is_some() {
            let persisted = PersistedDeck {
                profile: next.profile.clone(),
                swipe_history: next.history.clone(),
            };
            self.store.save(&self.user_id, &persisted).await?;
        }
        *state = next;

        if let Some(DeckEffect::SwipeAccepted {
            job,
            direction,
            record,
            generation,
        }) = &effect
        {
            debug!(user_id = %self.user_id, job_id = %record.job_id, action = ?record.action, "swipe accepted");
            dispatch(
                Arc::clone(&self.callbacks),
                self.user_id.clone(),
                *direction,
                job.clone(),
            );
            self.schedule_advance(*generation);
        }

        Ok(effect)
    }

    fn schedule_advance(self: &Arc<Self>, generation: u64) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(session.animation_delay).await;
            let mut state = session.state.lock().await;
            let advanced = reduce(
                std::mem::take(&mut *state),
                DeckEvent::Advance { generation },
                session.scorer.as_ref(),
            );
            *state = advanced.state;
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DeckRegistry: one session per user, created on first use
// ────────────────────────────────────────────────────────────────────────────

struct Entry {
    session: Arc<DeckSession>,
    last_used: AtomicU64,
}

pub struct DeckRegistry {
    sessions: RwLock<HashMap<String, Entry>>,
    /// Monotonic use counter; the entry with the smallest stamp is evicted first.
    clock: AtomicU64,
    max_sessions: usize,
    scorer: Arc<dyn CompatibilityScorer>,
    callbacks: Arc<dyn SwipeCallbacks>,
    store: Arc<dyn DeckStore>,
    animation_delay: Duration,
    gesture: GestureConfig,
}

impl DeckRegistry {
    pub fn new(
        config: &Config,
        scorer: Arc<dyn CompatibilityScorer>,
        callbacks: Arc<dyn SwipeCallbacks>,
        store: Arc<dyn DeckStore>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            max_sessions: config.max_sessions.max(1),
            scorer,
            callbacks,
            store,
            animation_delay: config.animation_delay,
            gesture: config.gesture,
        }
    }

    /// Returns the user's session, restoring profile and history from the
    /// store the first time the user is seen. When the registry is full the
    /// least recently used session is dropped; its persisted slice survives.
    pub async fn session(&self, user_id: &str) -> Result<Arc<DeckSession>, AppError> {
        if let Some(session) = self.registered(user_id).await {
            return Ok(session);
        }

        let restored = self.restore(user_id).await?;

        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(user_id) && sessions.len() >= self.max_sessions {
            self.evict_least_recent(&mut sessions);
        }
        // another request may have created it while we were loading
        let entry = sessions.entry(user_id.to_string()).or_insert_with(|| Entry {
            session: Arc::new(restored),
            last_used: AtomicU64::new(0),
        });
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Ok(Arc::clone(&entry.session))
    }

    /// Read-only access: the registered session when there is one, otherwise a
    /// detached session restored from the store that is never registered.
    pub async fn lookup(&self, user_id: &str) -> Result<Arc<DeckSession>, AppError> {
        match self.registered(user_id).await {
            Some(session) => Ok(session),
            None => Ok(Arc::new(self.restore(user_id).await?)),
        }
    }

    async fn registered(&self, user_id: &str) -> Option<Arc<DeckSession>> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(user_id)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(Arc::clone(&entry.session))
    }

    async fn restore(&self, user_id: &str) -> Result<DeckSession, AppError> {
        let restored = self.store.load(user_id).await?;
        Ok(DeckSession::new(
            user_id,
            restored,
            Arc::clone(&self.scorer),
            Arc::clone(&self.callbacks),
            Arc::clone(&self.store),
            self.animation_delay,
            self.gesture,
        ))
    }

    fn evict_least_recent(&self, sessions: &mut HashMap<String, Entry>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
            .map(|(user_id, _)| user_id.clone());
        if let Some(user_id) = oldest {
            sessions.remove(&user_id);
            debug!(%user_id, "evicted idle deck session");
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }
}
