//! Route definitions for the MarketDesk HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(watchlist_routes())
        .merge(entity_config_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Notification CRUD, read state, bulk send
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(handlers::notification::create))
        .route("/notifications/bulk", post(handlers::notification::send_bulk))
        .route("/notifications/{id}", delete(handlers::notification::delete))
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/users/{user_id}/notifications",
            get(handlers::notification::list_for_user),
        )
        .route(
            "/users/{user_id}/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/users/{user_id}/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
}

/// Per-user watchlists
fn watchlist_routes() -> Router<AppState> {
    Router::new()
        .route("/watchlist", post(handlers::watchlist::add))
        .route(
            "/users/{user_id}/watchlist",
            get(handlers::watchlist::list_for_user),
        )
        .route(
            "/users/{user_id}/watchlist/{symbol}",
            get(handlers::watchlist::contains).delete(handlers::watchlist::remove),
        )
        .route(
            "/users/{user_id}/watchlist/{symbol}/notes",
            put(handlers::watchlist::update_notes),
        )
}

/// Entity configuration listing
fn entity_config_routes() -> Router<AppState> {
    Router::new().route("/entity-configs", get(handlers::entity_config::list_configs))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
