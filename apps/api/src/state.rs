use std::sync::Arc;

use crate::config::Config;
use crate::deck::DeckRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// One deck session per user, restored from the deck store on first use.
    /// Holds the pluggable scorer, swipe callbacks and deck store.
    pub decks: Arc<DeckRegistry>,
}
