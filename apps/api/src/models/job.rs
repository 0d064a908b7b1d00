use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// A job posting as listed on the board. Carries no score of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub logo_url: String,
    pub salary_range: SalaryRange,
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A posting paired with its compatibility against the deck's profile.
///
/// `compatibility` is only ever written by the scorer; clients cannot set it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub compatibility: u8,
}

impl ScoredJob {
    pub fn id(&self) -> &str {
        &self.job.id
    }
}

#[cfg(test)]
pub(crate) fn sample_job() -> JobPosting {
    JobPosting {
        id: "job-1".to_string(),
        title: "Frontend Developer".to_string(),
        company: "TechCorp".to_string(),
        logo_url: "https://example.com/logo.png".to_string(),
        salary_range: SalaryRange {
            min: 100_000,
            max: 150_000,
            currency: "USD".to_string(),
        },
        location: "San Francisco, CA".to_string(),
        tags: vec!["React".to_string(), "TypeScript".to_string(), "CSS".to_string()],
        description: "Frontend developer position".to_string(),
        video_url: None,
        created_at: Utc::now(),
    }
}
