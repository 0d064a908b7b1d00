//! Compatibility Scorer: deterministic profile ↔ job fit from weighted sub-scores.
//!
//! Every sub-score is on a 0 – 100 scale. The final score is the weighted sum,
//! clamped to [0, 100] and rounded. Missing or empty inputs degrade the relevant
//! sub-score to 0; nothing here fails.
//!
//! `AppState` holds an `Arc<dyn CompatibilityScorer>`, so the deck never depends on
//! a concrete scoring backend.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::synonyms::{are_synonyms, infer_seniority, SeniorityLevel};
use crate::matching::weights::CompatibilityWeights;
use crate::models::{JobPosting, Profile};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// All sub-scores behind a compatibility value, for transparency in the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityBreakdown {
    pub skill_overlap: f64,
    pub location_fit: f64,
    pub seniority_match: f64,
    pub recency_bonus: f64,
    pub expected_level: SeniorityLevel,
    pub score: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a job against a profile as of `now`. Implementations must be pure.
pub trait CompatibilityScorer: Send + Sync {
    fn score(&self, profile: &Profile, job: &JobPosting, now: DateTime<Utc>) -> u8;
}

/// Default scorer: weighted skill, location, seniority and recency sub-scores.
#[derive(Debug, Clone, Default)]
pub struct WeightedCompatibilityScorer {
    pub weights: CompatibilityWeights,
}

impl WeightedCompatibilityScorer {
    pub fn new(weights: CompatibilityWeights) -> Self {
        Self { weights }
    }
}

impl CompatibilityScorer for WeightedCompatibilityScorer {
    fn score(&self, profile: &Profile, job: &JobPosting, now: DateTime<Utc>) -> u8 {
        calculate_compatibility(profile, job, &self.weights, now)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn calculate_compatibility(
    profile: &Profile,
    job: &JobPosting,
    weights: &CompatibilityWeights,
    now: DateTime<Utc>,
) -> u8 {
    compatibility_breakdown(profile, job, weights, now).score
}

pub fn compatibility_breakdown(
    profile: &Profile,
    job: &JobPosting,
    weights: &CompatibilityWeights,
    now: DateTime<Utc>,
) -> CompatibilityBreakdown {
    let skill_overlap = skill_overlap(&profile.skills, &job.tags);
    let location_fit = location_fit(&profile.location, &job.location, &job.tags);
    let expected_level = infer_seniority(&job.tags);
    let seniority_match = seniority_match(profile.years, expected_level);
    let recency_bonus = recency_bonus(job.created_at, now);

    let total = skill_overlap * weights.skill_overlap
        + location_fit * weights.location_fit
        + seniority_match * weights.seniority_delta
        + recency_bonus * weights.recency_bonus;

    CompatibilityBreakdown {
        skill_overlap,
        location_fit,
        seniority_match,
        recency_bonus,
        expected_level,
        score: finalize(total),
    }
}

fn finalize(total: f64) -> u8 {
    if total.is_nan() {
        return 0;
    }
    total.clamp(0.0, 100.0).round() as u8
}

fn normalize(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Share of profile skills that match at least one tag, over the longer list.
pub fn skill_overlap(skills: &[String], tags: &[String]) -> f64 {
    if skills.is_empty() || tags.is_empty() {
        return 0.0;
    }

    let skills_norm = normalize(skills);
    let tags_norm = normalize(tags);

    let matches = skills_norm
        .iter()
        .filter(|skill| {
            tags_norm.iter().any(|tag| {
                tag.contains(skill.as_str()) || skill.contains(tag.as_str()) || are_synonyms(skill, tag)
            })
        })
        .count();

    matches as f64 / skills.len().max(tags.len()) as f64 * 100.0
}

fn segment(location: &str, index: usize) -> Option<String> {
    location
        .split(',')
        .nth(index)
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

fn last_segment(location: &str) -> Option<String> {
    location
        .rsplit(',')
        .next()
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

fn segments_match(a: Option<String>, b: Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn is_remote(term: &str) -> bool {
    term.contains("remote") || term.contains("anywhere")
}

/// Tiered location fit, first applicable tier wins.
pub fn location_fit(profile_location: &str, job_location: &str, job_tags: &[String]) -> f64 {
    let profile_lower = profile_location.trim().to_lowercase();
    let job_lower = job_location.trim().to_lowercase();

    if profile_lower == job_lower {
        return 100.0;
    }

    if is_remote(&job_lower) || job_tags.iter().any(|t| t.to_lowercase().contains("remote")) {
        return 80.0;
    }

    if segments_match(segment(profile_location, 0), segment(job_location, 0)) {
        return 90.0;
    }

    if segments_match(segment(profile_location, 1), segment(job_location, 1)) {
        return 70.0;
    }

    if segments_match(last_segment(profile_location), last_segment(job_location)) {
        return 50.0;
    }

    0.0
}

/// 100 inside the level's range; −20 per year short, −10 per year over; floor 0.
pub fn seniority_match(years: f64, level: SeniorityLevel) -> f64 {
    let (min, max) = level.years_range();

    if years.is_nan() {
        return 0.0;
    }
    if years < min {
        (100.0 - (min - years) * 20.0).max(0.0)
    } else if years > max {
        (100.0 - (years - max) * 10.0).max(0.0)
    } else {
        100.0
    }
}

/// Tiered decay by whole days since posting.
pub fn recency_bonus(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - created_at).num_days().max(0);

    match age_days {
        0..=1 => 100.0,
        2..=7 => 80.0,
        8..=30 => 60.0,
        31..=90 => 40.0,
        _ => 20.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;
    use crate::models::profile::sample_profile;
    use chrono::Duration;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn score(profile: &Profile, job: &JobPosting) -> u8 {
        calculate_compatibility(profile, job, &CompatibilityWeights::default(), job.created_at)
    }

    #[test]
    fn test_matching_skills_and_location_scores_high() {
        let compatibility = score(&sample_profile(), &sample_job());
        assert!(compatibility > 70, "Expected >70, got {compatibility}");
    }

    #[test]
    fn test_remote_job_still_scores_above_half() {
        let mut job = sample_job();
        job.location = "Remote".to_string();
        let compatibility = score(&sample_profile(), &job);
        assert!(compatibility > 50, "Expected >50, got {compatibility}");
    }

    #[test]
    fn test_mismatched_skills_scores_below_half() {
        let mut job = sample_job();
        job.tags = strings(&["Python", "Django", "PostgreSQL"]);
        let compatibility = score(&sample_profile(), &job);
        assert!(compatibility < 50, "Expected <50, got {compatibility}");
    }

    #[test]
    fn test_score_is_bounded_for_extreme_weights() {
        let weights = CompatibilityWeights {
            skill_overlap: 5.0,
            location_fit: 5.0,
            seniority_delta: 5.0,
            recency_bonus: 5.0,
        };
        let job = sample_job();
        assert_eq!(
            calculate_compatibility(&sample_profile(), &job, &weights, job.created_at),
            100
        );

        let negative = CompatibilityWeights {
            skill_overlap: -1.0,
            ..CompatibilityWeights::default()
        };
        assert_eq!(
            calculate_compatibility(&sample_profile(), &job, &negative, job.created_at),
            0
        );
    }

    #[test]
    fn test_same_inputs_same_output() {
        let profile = sample_profile();
        let job = sample_job();
        let now = job.created_at + Duration::days(3);
        let w = CompatibilityWeights::default();
        assert_eq!(
            calculate_compatibility(&profile, &job, &w, now),
            calculate_compatibility(&profile, &job, &w, now)
        );
    }

    #[test]
    fn test_breakdown_matches_scenario_a() {
        let job = sample_job();
        let b = compatibility_breakdown(
            &sample_profile(),
            &job,
            &CompatibilityWeights::default(),
            job.created_at,
        );
        // react + typescript match, node.js does not: 2 / max(3, 3)
        assert!((b.skill_overlap - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(b.location_fit, 100.0);
        assert_eq!(b.expected_level, SeniorityLevel::Mid);
        assert_eq!(b.seniority_match, 100.0);
        assert_eq!(b.recency_bonus, 100.0);
        assert_eq!(b.score, 80);
    }

    #[test]
    fn test_skill_overlap_empty_lists_are_zero() {
        assert_eq!(skill_overlap(&[], &strings(&["rust"])), 0.0);
        assert_eq!(skill_overlap(&strings(&["rust"]), &[]), 0.0);
    }

    #[test]
    fn test_skill_overlap_disjoint_is_zero() {
        let skills = strings(&["React", "TypeScript", "Node.js"]);
        let tags = strings(&["Python", "Django", "PostgreSQL"]);
        assert_eq!(skill_overlap(&skills, &tags), 0.0);
    }

    #[test]
    fn test_skill_overlap_uses_synonyms() {
        let skills = strings(&["SQL"]);
        let tags = strings(&["Postgres"]);
        assert_eq!(skill_overlap(&skills, &tags), 100.0);
    }

    #[test]
    fn test_skill_overlap_substring_and_normalization() {
        let skills = strings(&["  react "]);
        let tags = strings(&["React Native", "Redux"]);
        // 1 match / max(1, 2)
        assert_eq!(skill_overlap(&skills, &tags), 50.0);
    }

    #[test]
    fn test_skill_overlap_ignores_blank_entries() {
        let skills = strings(&["", "Go"]);
        let tags = strings(&["Python"]);
        assert_eq!(skill_overlap(&skills, &tags), 0.0);
    }

    #[test]
    fn test_location_identical_is_100() {
        assert_eq!(location_fit("Austin, TX", "austin, tx", &[]), 100.0);
    }

    #[test]
    fn test_location_remote_is_80() {
        assert_eq!(location_fit("Berlin, Germany", "Remote (US)", &[]), 80.0);
        assert_eq!(location_fit("Berlin", "Work from anywhere", &[]), 80.0);
    }

    #[test]
    fn test_location_remote_tag_is_at_least_80() {
        let tags = strings(&["Rust", "Remote-first"]);
        assert!(location_fit("Tokyo, Japan", "Chicago, IL", &tags) >= 80.0);
    }

    #[test]
    fn test_location_city_state_country_tiers() {
        assert_eq!(
            location_fit("Portland, OR", "Portland, ME", &[]),
            90.0
        );
        assert_eq!(
            location_fit("Oakland, CA, USA", "San Jose, CA, USA", &[]),
            70.0
        );
        assert_eq!(
            location_fit("Austin, TX, USA", "Boston, MA, USA", &[]),
            50.0
        );
        assert_eq!(location_fit("Paris, France", "Lyon, Rhone", &[]), 0.0);
    }

    #[test]
    fn test_location_empty_segments_never_match() {
        assert_eq!(location_fit("", "Denver, CO", &[]), 0.0);
    }

    #[test]
    fn test_seniority_inside_range() {
        assert_eq!(seniority_match(3.0, SeniorityLevel::Mid), 100.0);
        assert_eq!(seniority_match(2.0, SeniorityLevel::Mid), 100.0);
        assert_eq!(seniority_match(7.0, SeniorityLevel::Mid), 100.0);
    }

    #[test]
    fn test_seniority_below_range_loses_20_per_year() {
        assert_eq!(seniority_match(3.0, SeniorityLevel::Senior), 60.0);
        assert_eq!(seniority_match(0.0, SeniorityLevel::Executive), 0.0);
    }

    #[test]
    fn test_seniority_above_range_loses_10_per_year() {
        assert_eq!(seniority_match(6.0, SeniorityLevel::Junior), 70.0);
        assert_eq!(seniority_match(40.0, SeniorityLevel::Junior), 0.0);
    }

    #[test]
    fn test_recency_tiers() {
        let now = Utc::now();
        assert_eq!(recency_bonus(now, now), 100.0);
        assert_eq!(recency_bonus(now - Duration::days(1), now), 100.0);
        assert_eq!(recency_bonus(now - Duration::days(5), now), 80.0);
        assert_eq!(recency_bonus(now - Duration::days(30), now), 60.0);
        assert_eq!(recency_bonus(now - Duration::days(90), now), 40.0);
        assert_eq!(recency_bonus(now - Duration::days(91), now), 20.0);
    }

    #[test]
    fn test_recency_future_posting_counts_as_new() {
        let now = Utc::now();
        assert_eq!(recency_bonus(now + Duration::days(10), now), 100.0);
    }

    #[test]
    fn test_weighted_scorer_uses_its_weights() {
        let job = sample_job();
        let scorer = WeightedCompatibilityScorer::new(CompatibilityWeights {
            skill_overlap: 0.0,
            location_fit: 1.0,
            seniority_delta: 0.0,
            recency_bonus: 0.0,
        });
        assert_eq!(scorer.score(&sample_profile(), &job, job.created_at), 100);
    }
}
