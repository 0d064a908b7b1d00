use serde::{Deserialize, Serialize};

/// Relative weight of each sub-score in the final compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityWeights {
    pub skill_overlap: f64,
    pub location_fit: f64,
    pub seniority_delta: f64,
    pub recency_bonus: f64,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.6,
            location_fit: 0.2,
            seniority_delta: 0.1,
            recency_bonus: 0.1,
        }
    }
}

impl CompatibilityWeights {
    pub fn sum(&self) -> f64 {
        self.skill_overlap + self.location_fit + self.seniority_delta + self.recency_bonus
    }
}
