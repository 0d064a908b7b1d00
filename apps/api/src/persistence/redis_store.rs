use anyhow::Result;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::persistence::{DeckStore, PersistedDeck};

const KEY_PREFIX: &str = "swipe-deck";

/// Stores each user's persisted deck as one JSON string under `swipe-deck:{user_id}`.
#[derive(Clone)]
pub struct RedisDeckStore {
    conn: MultiplexedConnection,
}

impl RedisDeckStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis deck store connected");
        Ok(Self { conn })
    }

    fn key(user_id: &str) -> String {
        format!("{KEY_PREFIX}:{user_id}")
    }
}

#[async_trait]
impl DeckStore for RedisDeckStore {
    async fn load(&self, user_id: &str) -> Result<Option<PersistedDeck>, AppError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::key(user_id)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => {
                debug!(%user_id, "no persisted deck");
                Ok(None)
            }
        }
    }

    async fn save(&self, user_id: &str, deck: &PersistedDeck) -> Result<(), AppError> {
        let json = serde_json::to_string(deck)?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(Self::key(user_id), json).await?;
        debug!(%user_id, history = deck.swipe_history.len(), "persisted deck saved");
        Ok(())
    }
}
