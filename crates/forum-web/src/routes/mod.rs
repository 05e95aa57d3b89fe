//! Route definitions
//!
//! Page routes use the session layer; health checks are mounted separately
//! so they never touch the session store.

use axum::{routing::{get, post}, Router};

use crate::handlers::{auth, health, home, membership, posts, threads, topics};
use crate::state::AppState;

/// Create the page router (excluding health, which skips the session layer)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .merge(topic_routes())
        .merge(post_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Account routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", get(auth::sign_up_page).post(auth::sign_up))
        .route("/log-in", post(auth::log_in))
        .route("/log-out", get(auth::log_out))
        .route("/upgrade", post(membership::upgrade))
}

/// Topic routes
fn topic_routes() -> Router<AppState> {
    Router::new()
        .route("/topics/create", get(topics::create_topic_page).post(topics::create_topic))
        .route("/topic/delete/:id", post(topics::delete_topic))
        .route("/chat/:id", get(threads::thread))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post/create", post(posts::create_post))
        .route("/post/delete/:id", post(posts::delete_post))
}
