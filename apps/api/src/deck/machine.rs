//! Deck State Machine: pure `(state, event) → state` reducer for the swipe deck.
//!
//! # Phases
//! - `Uninitialized`: never initialized, or reset.
//! - `Ready`: a card is under the cursor and no swipe is in flight.
//! - `Animating`: a swipe was accepted; further swipes are no-ops until `Advance`.
//! - `Empty`: cursor ≥ number of cards.
//!
//! # Delayed advance
//! An accepted swipe emits `DeckEffect::SwipeAccepted` carrying the deck's
//! generation. The owner schedules `DeckEvent::Advance { generation }` after the
//! animation delay. `Initialize` and `Reset` bump the generation, so advances
//! scheduled for a discarded deck are ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::matching::CompatibilityScorer;
use crate::models::{JobPosting, Profile, ScoredJob, SwipeDirection, SwipeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckPhase {
    Uninitialized,
    Ready,
    Animating,
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckState {
    pub profile: Option<Profile>,
    pub cards: Vec<ScoredJob>,
    pub cursor: usize,
    pub animating: bool,
    pub history: Vec<SwipeRecord>,
    pub generation: u64,
    initialized: bool,
}

#[derive(Debug, Clone)]
pub enum DeckEvent {
    Initialize {
        jobs: Vec<JobPosting>,
        profile: Profile,
        at: DateTime<Utc>,
    },
    Swipe {
        direction: SwipeDirection,
        at: DateTime<Utc>,
    },
    Advance {
        generation: u64,
    },
    UpdateProfile {
        profile: Profile,
        at: DateTime<Utc>,
    },
    /// Swaps the profile without touching cards or their scores.
    ReplaceProfile {
        profile: Profile,
    },
    Reset,
}

/// Work the owner must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEffect {
    /// Notify the direction's callback with `job`, then schedule
    /// `Advance { generation }` after the animation delay.
    SwipeAccepted {
        job: ScoredJob,
        direction: SwipeDirection,
        record: SwipeRecord,
        generation: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: DeckState,
    pub effect: Option<DeckEffect>,
}

impl Transition {
    fn quiet(state: DeckState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

impl DeckState {
    /// Restores a deck from persisted profile and history. Cards are not
    /// persisted; the deck stays uninitialized until `Initialize`.
    pub fn restored(profile: Option<Profile>, history: Vec<SwipeRecord>) -> Self {
        Self {
            profile,
            history,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> DeckPhase {
        if !self.initialized {
            DeckPhase::Uninitialized
        } else if self.animating {
            DeckPhase::Animating
        } else if self.is_empty() {
            DeckPhase::Empty
        } else {
            DeckPhase::Ready
        }
    }

    pub fn current_card(&self) -> Option<&ScoredJob> {
        self.cards.get(self.cursor)
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len().saturating_sub(self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    /// Cards from the cursor onward, in deck order.
    pub fn upcoming(&self) -> &[ScoredJob] {
        self.cards.get(self.cursor..).unwrap_or(&[])
    }
}

fn score_all(
    jobs: Vec<JobPosting>,
    profile: &Profile,
    scorer: &dyn CompatibilityScorer,
    at: DateTime<Utc>,
) -> Vec<ScoredJob> {
    jobs.into_iter()
        .map(|job| {
            let compatibility = scorer.score(profile, &job, at);
            ScoredJob { job, compatibility }
        })
        .collect()
}

/// Applies one event. Invalid events leave the state unchanged.
pub fn reduce(
    mut state: DeckState,
    event: DeckEvent,
    scorer: &dyn CompatibilityScorer,
) -> Transition {
    match event {
        DeckEvent::Initialize { jobs, profile, at } => {
            state.cards = score_all(jobs, &profile, scorer, at);
            state.profile = Some(profile);
            state.cursor = 0;
            state.animating = false;
            state.generation += 1;
            state.initialized = true;
            Transition::quiet(state)
        }

        DeckEvent::Swipe { direction, at } => {
            if state.animating {
                debug!(?direction, "swipe ignored: animation in flight");
                return Transition::quiet(state);
            }
            let Some(job) = state.current_card().cloned() else {
                debug!(?direction, "swipe ignored: deck is empty");
                return Transition::quiet(state);
            };

            let record = SwipeRecord {
                job_id: job.id().to_string(),
                action: direction.action(),
                timestamp: at,
            };
            state.history.push(record.clone());
            state.animating = true;

            let effect = DeckEffect::SwipeAccepted {
                job,
                direction,
                record,
                generation: state.generation,
            };
            Transition {
                state,
                effect: Some(effect),
            }
        }

        DeckEvent::Advance { generation } => {
            if generation != state.generation {
                debug!(
                    stale = generation,
                    current = state.generation,
                    "advance ignored: stale generation"
                );
                return Transition::quiet(state);
            }
            if !state.animating {
                return Transition::quiet(state);
            }
            state.cursor = (state.cursor + 1).min(state.cards.len());
            state.animating = false;
            Transition::quiet(state)
        }

        DeckEvent::UpdateProfile { profile, at } => {
            for card in &mut state.cards {
                card.compatibility = scorer.score(&profile, &card.job, at);
            }
            state.profile = Some(profile);
            Transition::quiet(state)
        }

        DeckEvent::ReplaceProfile { profile } => {
            state.profile = Some(profile);
            Transition::quiet(state)
        }

        DeckEvent::Reset => {
            state.cards.clear();
            state.cursor = 0;
            state.animating = false;
            state.history.clear();
            state.generation += 1;
            state.initialized = false;
            Transition::quiet(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::WeightedCompatibilityScorer;
    use crate::models::job::sample_job;
    use crate::models::profile::sample_profile;
    use crate::models::SwipeAction;

    fn jobs(n: usize) -> Vec<JobPosting> {
        (0..n)
            .map(|i| {
                let mut job = sample_job();
                job.id = format!("job-{i}");
                job
            })
            .collect()
    }

    fn scorer() -> WeightedCompatibilityScorer {
        WeightedCompatibilityScorer::default()
    }

    fn apply(state: DeckState, event: DeckEvent) -> Transition {
        reduce(state, event, &scorer())
    }

    fn initialized(n: usize) -> DeckState {
        apply(
            DeckState::default(),
            DeckEvent::Initialize {
                jobs: jobs(n),
                profile: sample_profile(),
                at: Utc::now(),
            },
        )
        .state
    }

    fn swipe(state: DeckState, direction: SwipeDirection) -> Transition {
        apply(
            state,
            DeckEvent::Swipe {
                direction,
                at: Utc::now(),
            },
        )
    }

    fn advance(state: DeckState) -> DeckState {
        let generation = state.generation;
        apply(state, DeckEvent::Advance { generation }).state
    }

    #[test]
    fn test_new_deck_is_uninitialized_and_empty() {
        let state = DeckState::default();
        assert_eq!(state.phase(), DeckPhase::Uninitialized);
        assert!(state.is_empty());
        assert!(state.current_card().is_none());
        assert_eq!(state.remaining_cards(), 0);
    }

    #[test]
    fn test_initialize_scores_and_keeps_order() {
        let mut input = jobs(3);
        input[1].tags = vec!["Python".to_string()];
        let state = apply(
            DeckState::default(),
            DeckEvent::Initialize {
                jobs: input,
                profile: sample_profile(),
                at: Utc::now(),
            },
        )
        .state;

        let ids: Vec<_> = state.cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["job-0", "job-1", "job-2"]);
        assert!(state.cards[0].compatibility > state.cards[1].compatibility);
        assert_eq!(state.phase(), DeckPhase::Ready);
        assert_eq!(state.cursor, 0);
        assert!(state.profile.is_some());
    }

    #[test]
    fn test_swipe_records_history_and_locks() {
        let state = initialized(2);
        let t = swipe(state, SwipeDirection::Up);

        assert_eq!(t.state.history.len(), 1);
        assert_eq!(t.state.history[0].job_id, "job-0");
        assert_eq!(t.state.history[0].action, SwipeAction::Save);
        assert!(t.state.animating);
        assert_eq!(t.state.phase(), DeckPhase::Animating);
        // cursor only moves on advance
        assert_eq!(t.state.cursor, 0);

        match t.effect {
            Some(DeckEffect::SwipeAccepted {
                job,
                direction,
                generation,
                ..
            }) => {
                assert_eq!(job.id(), "job-0");
                assert_eq!(direction, SwipeDirection::Up);
                assert_eq!(generation, t.state.generation);
            }
            other => panic!("expected SwipeAccepted, got {other:?}"),
        }
    }

    #[test]
    fn test_swipe_while_animating_is_noop() {
        let state = swipe(initialized(2), SwipeDirection::Right).state;
        let before = state.clone();
        let t = swipe(state, SwipeDirection::Left);
        assert!(t.effect.is_none());
        assert_eq!(t.state, before);
    }

    #[test]
    fn test_swipe_on_empty_deck_is_noop() {
        let state = initialized(0);
        let before = state.clone();
        let t = swipe(state, SwipeDirection::Right);
        assert!(t.effect.is_none());
        assert_eq!(t.state, before);
        assert!(t.state.history.is_empty());

        let t = swipe(DeckState::default(), SwipeDirection::Right);
        assert!(t.effect.is_none());
        assert!(t.state.history.is_empty());
    }

    #[test]
    fn test_n_swipes_empty_an_n_card_deck() {
        let n = 4;
        let mut state = initialized(n);
        for _ in 0..n {
            state = advance(swipe(state, SwipeDirection::Left).state);
        }
        assert!(state.is_empty());
        assert!(state.current_card().is_none());
        assert_eq!(state.remaining_cards(), 0);
        assert_eq!(state.phase(), DeckPhase::Empty);
        assert_eq!(state.history.len(), n);
        assert!(state.cursor <= state.cards.len());
    }

    #[test]
    fn test_stale_advance_is_ignored_after_reset() {
        let t = swipe(initialized(3), SwipeDirection::Right);
        let stale = t.state.generation;
        let state = apply(t.state, DeckEvent::Reset).state;
        let state = apply(
            state,
            DeckEvent::Initialize {
                jobs: jobs(3),
                profile: sample_profile(),
                at: Utc::now(),
            },
        )
        .state;

        let state = apply(state, DeckEvent::Advance { generation: stale }).state;
        assert_eq!(state.cursor, 0);
        assert_eq!(state.phase(), DeckPhase::Ready);
    }

    #[test]
    fn test_advance_without_swipe_is_noop() {
        let state = initialized(2);
        let state = advance(state);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_update_profile_rescores_in_place() {
        let mut state = initialized(3);
        state = advance(swipe(state, SwipeDirection::Left).state);
        let before: Vec<_> = state.cards.iter().map(|c| c.compatibility).collect();

        let mut profile = sample_profile();
        profile.skills = vec!["Cobol".to_string()];
        profile.location = "Nowhere".to_string();
        profile.years = 30.0;
        let state = apply(
            state,
            DeckEvent::UpdateProfile {
                profile: profile.clone(),
                at: Utc::now(),
            },
        )
        .state;

        let ids: Vec<_> = state.cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["job-0", "job-1", "job-2"]);
        assert_eq!(state.cursor, 1);
        for (card, old) in state.cards.iter().zip(before) {
            assert_ne!(card.compatibility, old);
        }
        assert_eq!(state.profile, Some(profile));
    }

    #[test]
    fn test_update_profile_on_uninitialized_deck_stores_profile() {
        let state = apply(
            DeckState::default(),
            DeckEvent::UpdateProfile {
                profile: sample_profile(),
                at: Utc::now(),
            },
        )
        .state;
        assert!(state.profile.is_some());
        assert_eq!(state.phase(), DeckPhase::Uninitialized);
    }

    #[test]
    fn test_replace_profile_keeps_scores() {
        let state = initialized(2);
        let before: Vec<_> = state.cards.iter().map(|c| c.compatibility).collect();

        let state = apply(
            state,
            DeckEvent::ReplaceProfile {
                profile: Profile::empty(),
            },
        )
        .state;

        let after: Vec<_> = state.cards.iter().map(|c| c.compatibility).collect();
        assert_eq!(after, before);
        assert_eq!(state.profile, Some(Profile::empty()));
    }

    #[test]
    fn test_reset_clears_everything_but_profile() {
        let state = swipe(initialized(3), SwipeDirection::Right).state;
        let generation = state.generation;
        let state = apply(state, DeckEvent::Reset).state;
        assert!(state.cards.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.cursor, 0);
        assert!(!state.animating);
        assert_eq!(state.generation, generation + 1);
        assert!(state.profile.is_some());
        assert_eq!(state.phase(), DeckPhase::Uninitialized);
    }

    #[test]
    fn test_restored_state_keeps_history() {
        let record = SwipeRecord {
            job_id: "job-9".to_string(),
            action: SwipeAction::Skip,
            timestamp: Utc::now(),
        };
        let state = DeckState::restored(Some(sample_profile()), vec![record.clone()]);
        assert_eq!(state.history, vec![record]);
        assert_eq!(state.phase(), DeckPhase::Uninitialized);
    }

    #[test]
    fn test_upcoming_starts_at_cursor() {
        let state = advance(swipe(initialized(3), SwipeDirection::Down).state);
        let ids: Vec<_> = state.upcoming().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["job-1", "job-2"]);
    }
}
