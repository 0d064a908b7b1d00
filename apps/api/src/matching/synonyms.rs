//! Static lookup tables for skill synonyms and seniority keywords.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Canonical skill → set of terms treated as the same skill.
///
/// Only canonical↔synonym pairs match; two synonyms of the same canonical term
/// do not match each other.
static SKILL_SYNONYMS: LazyLock<HashMap<&'static str, HashSet<&'static str>>> =
    LazyLock::new(|| {
        let table: &[(&str, &[&str])] = &[
            ("javascript", &["js", "es6", "es2015", "node.js", "nodejs"]),
            ("typescript", &["ts", "typescript"]),
            ("react", &["reactjs", "react.js"]),
            ("vue", &["vuejs", "vue.js"]),
            ("angular", &["angularjs", "angular.js"]),
            ("python", &["py", "python3"]),
            ("java", &["java8", "java11", "spring"]),
            ("c#", &["csharp", "dotnet", ".net"]),
            ("php", &["php7", "php8"]),
            ("ruby", &["ruby on rails", "rails"]),
            ("go", &["golang"]),
            ("rust", &["rustlang"]),
            ("swift", &["swiftui"]),
            ("kotlin", &["android"]),
            ("sql", &["mysql", "postgresql", "postgres", "sqlite"]),
            ("nosql", &["mongodb", "cassandra", "redis"]),
            ("aws", &["amazon web services", "ec2", "s3", "lambda"]),
            ("azure", &["microsoft azure"]),
            ("gcp", &["google cloud", "google cloud platform"]),
            ("docker", &["containers", "containerization"]),
            ("kubernetes", &["k8s", "kube"]),
            ("git", &["github", "gitlab", "bitbucket"]),
            (
                "ci/cd",
                &[
                    "continuous integration",
                    "continuous deployment",
                    "jenkins",
                    "github actions",
                ],
            ),
            ("agile", &["scrum", "kanban", "sprint"]),
            ("tdd", &["test driven development", "unit testing"]),
            ("api", &["rest", "graphql", "microservices"]),
            ("mobile", &["ios", "android", "react native", "flutter"]),
            (
                "ui/ux",
                &[
                    "user interface",
                    "user experience",
                    "figma",
                    "sketch",
                    "adobe xd",
                ],
            ),
            (
                "data",
                &["analytics", "big data", "machine learning", "ai", "ml"],
            ),
        ];

        table
            .iter()
            .map(|(canonical, synonyms)| (*canonical, synonyms.iter().copied().collect()))
            .collect()
    });

/// True when the two normalized terms are equal or paired in the synonym table.
pub fn are_synonyms(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let paired = |canonical: &str, other: &str| {
        SKILL_SYNONYMS
            .get(canonical)
            .is_some_and(|synonyms| synonyms.contains(other))
    };
    paired(a, b) || paired(b, a)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    Junior,
    Mid,
    Senior,
    Executive,
}

impl SeniorityLevel {
    /// Inclusive years-of-experience range expected at this level.
    pub fn years_range(self) -> (f64, f64) {
        match self {
            SeniorityLevel::Junior => (0.0, 3.0),
            SeniorityLevel::Mid => (2.0, 7.0),
            SeniorityLevel::Senior => (5.0, 15.0),
            SeniorityLevel::Executive => (10.0, 25.0),
        }
    }
}

/// Keyword buckets, scanned in order. The first bucket with a hit wins.
const SENIORITY_KEYWORDS: &[(SeniorityLevel, &[&str])] = &[
    (
        SeniorityLevel::Junior,
        &["junior", "entry", "associate", "trainee", "intern"],
    ),
    (
        SeniorityLevel::Mid,
        &["mid", "intermediate", "regular", "standard"],
    ),
    (
        SeniorityLevel::Senior,
        &["senior", "lead", "principal", "staff", "architect"],
    ),
    (
        SeniorityLevel::Executive,
        &["executive", "director", "vp", "vice president", "cto", "ceo"],
    ),
];

/// Infers the level a posting expects from its tags. Defaults to `Mid`.
pub fn infer_seniority(tags: &[String]) -> SeniorityLevel {
    let normalized: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();

    SENIORITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            normalized
                .iter()
                .any(|tag| keywords.iter().any(|kw| tag.contains(kw)))
        })
        .map(|(level, _)| *level)
        .unwrap_or(SeniorityLevel::Mid)
}
