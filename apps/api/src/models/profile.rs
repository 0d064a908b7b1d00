use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Maximum years of experience accepted on a profile.
const MAX_YEARS: f64 = 50.0;

/// Id of the placeholder stored when a user has no usable profile.
pub const PLACEHOLDER_ID: &str = "user-default";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "30d")]
    Within30Days,
    #[serde(rename = "60d")]
    Within60Days,
}

/// A candidate profile as supplied by the profile editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub skills: Vec<String>,
    pub years: f64,
    pub location: String,
    pub desired_salary: u32,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    /// Profile completion percentage, 0 – 100.
    pub completion: u8,
}

impl Profile {
    /// The placeholder profile substituted when no usable profile is stored.
    pub fn empty() -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            name: String::new(),
            title: String::new(),
            skills: vec![],
            years: 0.0,
            location: String::new(),
            desired_salary: 0,
            availability: Availability::Immediate,
            resume_url: None,
            completion: 0,
        }
    }

    /// Validates the fields the profile editor marks as required.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.id.trim().is_empty() {
            problems.push("id is required");
        }
        if self.name.trim().is_empty() {
            problems.push("name is required");
        }
        if self.title.trim().is_empty() {
            problems.push("job title is required");
        }
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            problems.push("at least one skill is required");
        }
        if !self.years.is_finite() || !(0.0..=MAX_YEARS).contains(&self.years) {
            problems.push("years must be between 0 and 50");
        }
        if self.location.trim().is_empty() {
            problems.push("location is required");
        }
        if self.completion > 100 {
            problems.push("completion must be between 0 and 100");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }

    pub fn meets_completion(&self, threshold: u8) -> bool {
        self.completion >= threshold
    }

    /// True for the stand-in written by hydration, not a real user profile.
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> Profile {
    Profile {
        id: "user-1".to_string(),
        name: "John Doe".to_string(),
        title: "Software Engineer".to_string(),
        skills: vec![
            "React".to_string(),
            "TypeScript".to_string(),
            "Node.js".to_string(),
        ],
        years: 3.0,
        location: "San Francisco, CA".to_string(),
        desired_salary: 120_000,
        availability: Availability::Immediate,
        resume_url: None,
        completion: 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_profile_is_valid() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_empty_profile_fails_validation() {
        let err = Profile::empty().validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name is required"), "{msg}");
        assert!(msg.contains("at least one skill"), "{msg}");
    }

    #[test]
    fn test_placeholder_is_recognized() {
        assert!(Profile::empty().is_placeholder());
        assert!(!sample_profile().is_placeholder());
    }

    #[test]
    fn test_years_out_of_range_rejected() {
        let mut profile = sample_profile();
        profile.years = 51.0;
        assert!(profile.validate().is_err());
        profile.years = -1.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_availability_wire_names() {
        let json = serde_json::to_string(&Availability::Within30Days).unwrap();
        assert_eq!(json, r#""30d""#);
        let parsed: Availability = serde_json::from_str(r#""60d""#).unwrap();
        assert_eq!(parsed, Availability::Within60Days);
    }

    #[test]
    fn test_profile_deserializes_camel_case() {
        let json = r#"{
            "id": "u-7",
            "name": "Ada",
            "title": "Engineer",
            "skills": ["Rust"],
            "years": 4.5,
            "location": "Remote",
            "desiredSalary": 90000,
            "availability": "immediate",
            "completion": 80
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.desired_salary, 90_000);
        assert!(profile.resume_url.is_none());
        assert!(profile.meets_completion(50));
        assert!(!profile.meets_completion(81));
    }
}
