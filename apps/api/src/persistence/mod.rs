//! Deck persistence: only the profile and swipe history survive restarts.
//!
//! Cards, cursor and animation state are never stored; they are rebuilt by
//! hydration. Saves are explicit calls made by the deck session at defined
//! lifecycle points, never implicit on every mutation.

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Profile, SwipeRecord};

pub use memory::MemoryDeckStore;
pub use redis_store::RedisDeckStore;

/// The persisted slice of a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDeck {
    pub profile: Option<Profile>,
    #[serde(default)]
    pub swipe_history: Vec<SwipeRecord>,
}

#[async_trait]
pub trait DeckStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<PersistedDeck>, AppError>;
    async fn save(&self, user_id: &str, deck: &PersistedDeck) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(PersistedDeck::default()).unwrap();
        assert!(json["profile"].is_null());
        assert!(json["swipeHistory"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_history_defaults_to_empty() {
        let deck: PersistedDeck = serde_json::from_str(r#"{"profile": null}"#).unwrap();
        assert!(deck.swipe_history.is_empty());
    }
}
