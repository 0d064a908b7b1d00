use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::persistence::{DeckStore, PersistedDeck};

/// Process-local store. Used when `REDIS_URL` is unset; state is lost on exit.
#[derive(Default)]
pub struct MemoryDeckStore {
    decks: RwLock<HashMap<String, PersistedDeck>>,
}

impl MemoryDeckStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeckStore for MemoryDeckStore {
    async fn load(&self, user_id: &str) -> Result<Option<PersistedDeck>, AppError> {
        Ok(self.decks.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, deck: &PersistedDeck) -> Result<(), AppError> {
        self.decks
            .write()
            .await
            .insert(user_id.to_string(), deck.clone());
        Ok(())
    }
}
