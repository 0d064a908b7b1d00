pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::deck::handlers;
use crate::matching::handlers::handle_compatibility;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Compatibility API
        .route("/api/v1/compatibility", post(handle_compatibility))
        // Deck API
        .route(
            "/api/v1/deck/:user_id",
            get(handlers::handle_get_deck).delete(handlers::handle_reset),
        )
        .route("/api/v1/deck/:user_id/hydrate", post(handlers::handle_hydrate))
        .route(
            "/api/v1/deck/:user_id/initialize",
            post(handlers::handle_initialize),
        )
        .route("/api/v1/deck/:user_id/ranked", get(handlers::handle_ranked))
        .route("/api/v1/deck/:user_id/swipe", post(handlers::handle_swipe))
        .route("/api/v1/deck/:user_id/input", post(handlers::handle_input))
        .route(
            "/api/v1/deck/:user_id/profile",
            put(handlers::handle_update_profile),
        )
        .route("/api/v1/deck/:user_id/history", get(handlers::handle_history))
        .with_state(state)
}
