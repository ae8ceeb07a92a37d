//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    blogs_handler, callback_handler, delete_handler, drafts_handler, health_handler,
    index_handler, login_handler, logout_handler, publish_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Cookie session settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Sliding inactivity window
    pub ttl_days: i64,
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ttl_days: 7,
            secure: false,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            ttl_days: config.session_ttl_days,
            secure: config.session_secure_cookie,
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, session: SessionOptions) -> Router {
    let state = AppState {
        deps: Arc::new(deps),
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(session.ttl_days)));

    Router::new()
        .route("/health", get(health_handler))
        // Sign-in
        .route("/", get(index_handler))
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/logout", get(logout_handler))
        // Blogs and drafts
        .route("/blogs", get(blogs_handler))
        .route("/posts/:blog_id", get(drafts_handler))
        .route("/publish/:blog_id/:post_id", post(publish_handler))
        .route("/delete/:blog_id/:post_id", post(delete_handler))
        .layer(session_layer)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
