use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::gesture::GestureConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, swipe callbacks only log.
    pub database_url: Option<String>,
    /// When unset, decks persist in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub animation_delay: Duration,
    pub completion_threshold: u8,
    pub gesture: GestureConfig,
    /// Deck sessions kept in memory before the least recently used is dropped.
    pub max_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            redis_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            animation_delay: Duration::from_millis(300),
            completion_threshold: 50,
            gesture: GestureConfig::default(),
            max_sessions: 10_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let gesture = GestureConfig {
            velocity_threshold: parse_env(
                "GESTURE_VELOCITY_THRESHOLD",
                defaults.gesture.velocity_threshold,
            )?,
            distance_threshold: parse_env(
                "GESTURE_DISTANCE_THRESHOLD",
                defaults.gesture.distance_threshold,
            )?,
            max_swipe_time_ms: parse_env(
                "GESTURE_MAX_SWIPE_TIME_MS",
                defaults.gesture.max_swipe_time_ms,
            )?,
        };

        let completion_threshold: u8 =
            parse_env("PROFILE_COMPLETION_THRESHOLD", defaults.completion_threshold)?;
        if completion_threshold > 100 {
            anyhow::bail!("PROFILE_COMPLETION_THRESHOLD must be between 0 and 100");
        }

        let max_sessions: usize = parse_env("MAX_DECK_SESSIONS", defaults.max_sessions)?;
        if max_sessions == 0 {
            anyhow::bail!("MAX_DECK_SESSIONS must be at least 1");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            animation_delay: Duration::from_millis(parse_env(
                "SWIPE_ANIMATION_MS",
                defaults.animation_delay.as_millis() as u64,
            )?),
            completion_threshold,
            gesture,
            max_sessions,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
