//! Read-only ranking over scored cards. Never reorders the deck itself.

use serde::{Deserialize, Serialize};

use crate::models::ScoredJob;

pub const DEFAULT_MIN_COMPATIBILITY: u8 = 30;
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Human-facing label for a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Perfect,
    Great,
    Good,
    Fair,
    Possible,
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => MatchTier::Perfect,
            80..=89 => MatchTier::Great,
            70..=79 => MatchTier::Good,
            60..=69 => MatchTier::Fair,
            40..=59 => MatchTier::Possible,
            _ => MatchTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Perfect => "Perfect Match",
            MatchTier::Great => "Great Match",
            MatchTier::Good => "Good Match",
            MatchTier::Fair => "Fair Match",
            MatchTier::Possible => "Possible Match",
            MatchTier::Low => "Low Match",
        }
    }
}

/// Highest compatibility first; ties keep their deck order.
pub fn sort_by_compatibility(cards: &[ScoredJob]) -> Vec<ScoredJob> {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
    sorted
}

pub fn filter_by_compatibility(cards: &[ScoredJob], min_compatibility: u8) -> Vec<ScoredJob> {
    cards
        .iter()
        .filter(|c| c.compatibility >= min_compatibility)
        .cloned()
        .collect()
}

pub fn top_matching(cards: &[ScoredJob], limit: usize) -> Vec<ScoredJob> {
    let mut sorted = sort_by_compatibility(cards);
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;

    fn card(id: &str, compatibility: u8) -> ScoredJob {
        let mut job = sample_job();
        job.id = id.to_string();
        ScoredJob { job, compatibility }
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let cards = vec![card("a", 40), card("b", 90), card("c", 40), card("d", 70)];
        let ids: Vec<_> = sort_by_compatibility(&cards)
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_leaves_input_untouched() {
        let cards = vec![card("a", 10), card("b", 90)];
        let _ = sort_by_compatibility(&cards);
        assert_eq!(cards[0].id(), "a");
    }

    #[test]
    fn test_filter_uses_inclusive_minimum() {
        let cards = vec![card("a", 29), card("b", 30), card("c", 31)];
        let kept = filter_by_compatibility(&cards, DEFAULT_MIN_COMPATIBILITY);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].id(), "b");
    }

    #[test]
    fn test_top_matching_truncates() {
        let cards: Vec<_> = (0..15).map(|i| card(&format!("job-{i}"), i * 5)).collect();
        let top = top_matching(&cards, DEFAULT_TOP_LIMIT);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].compatibility, 70);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MatchTier::from_score(100), MatchTier::Perfect);
        assert_eq!(MatchTier::from_score(90), MatchTier::Perfect);
        assert_eq!(MatchTier::from_score(89), MatchTier::Great);
        assert_eq!(MatchTier::from_score(70), MatchTier::Good);
        assert_eq!(MatchTier::from_score(60), MatchTier::Fair);
        assert_eq!(MatchTier::from_score(40), MatchTier::Possible);
        assert_eq!(MatchTier::from_score(39), MatchTier::Low);
        assert_eq!(MatchTier::Great.label(), "Great Match");
    }
}
