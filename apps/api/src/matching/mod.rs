// Compatibility scoring between a candidate profile and a job posting.
// Pure and deterministic: no I/O, no clock reads; callers pass `now`.

pub mod handlers;
pub mod ranking;
pub mod scorer;
pub mod synonyms;
pub mod weights;

pub use scorer::{CompatibilityScorer, WeightedCompatibilityScorer};
pub use weights::CompatibilityWeights;
