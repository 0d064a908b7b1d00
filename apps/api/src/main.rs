mod config;
mod db;
mod deck;
mod errors;
mod gesture;
mod matching;
mod models;
mod persistence;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::deck::{DeckRegistry, LoggingCallbacks, PgSwipeCallbacks, SwipeCallbacks};
use crate::matching::WeightedCompatibilityScorer;
use crate::persistence::{DeckStore, MemoryDeckStore, RedisDeckStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobSwipe API v{}", env!("CARGO_PKG_VERSION"));

    // Deck store: Redis when configured, otherwise process memory
    let store: Arc<dyn DeckStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisDeckStore::connect(url).await?),
        None => {
            warn!("REDIS_URL not set, decks will not survive a restart");
            Arc::new(MemoryDeckStore::new())
        }
    };

    // Swipe callbacks: record outcomes in Postgres when configured, otherwise log
    let callbacks: Arc<dyn SwipeCallbacks> = match &config.database_url {
        Some(url) => Arc::new(PgSwipeCallbacks::new(create_pool(url).await?)),
        None => {
            info!("DATABASE_URL not set, swipe callbacks will only log");
            Arc::new(LoggingCallbacks)
        }
    };

    let scorer = Arc::new(WeightedCompatibilityScorer::default());
    info!(
        "Deck settings: animation {:?}, completion threshold {}%",
        config.animation_delay, config.completion_threshold
    );

    // Build app state
    let decks = DeckRegistry::new(&config, scorer, callbacks, store);
    let state = AppState {
        config: config.clone(),
        decks: Arc::new(decks),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
