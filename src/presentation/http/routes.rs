//! Route Configuration
//!
//! Configures all HTTP routes for the API. Everything except `/health` sits
//! behind the bearer token gate.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint (open)
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes(state.clone()))
        .with_state(state)
}

/// API routes (require authentication)
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/servers", server_routes())
        .nest("/channels", channel_routes())
        .nest("/messages", message_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::user::upsert_user))
        .route("/{user_id}", get(handlers::user::get_user))
}

/// Server routes (listing, creation, invites, join flow, audit logs, channels)
fn server_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::server::get_servers).post(handlers::server::create_server),
        )
        .route("/join", post(handlers::server::join_server))
        .route("/{server_id}/invite", post(handlers::server::create_invite))
        .route("/{server_id}/logs", get(handlers::server::get_server_logs))
        .route(
            "/{server_id}/channels",
            get(handlers::channel::get_channels).post(handlers::channel::create_channel),
        )
}

/// Channel routes (messages live under their channel)
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{channel_id}/messages",
            get(handlers::message::get_messages).post(handlers::message::create_message),
        )
        .route(
            "/{channel_id}/messages/{message_id}",
            delete(handlers::message::delete_message),
        )
}

/// Message routes (reactions live under their message)
fn message_routes() -> Router<AppState> {
    Router::new().route(
        "/{message_id}/reactions",
        get(handlers::reaction::get_reactions)
            .post(handlers::reaction::add_reaction)
            .delete(handlers::reaction::remove_reaction),
    )
}
