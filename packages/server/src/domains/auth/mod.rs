//! Auth domain - Google sign-in and session-scoped credentials
//!
//! Responsibilities:
//! - OAuth2 authorization-code flow with PKCE against Google
//! - Keeping the user's tokens in their session
//! - Refreshing expired access tokens before any remote call

pub mod actions;
pub mod models;
pub mod oauth;
pub mod token_store;

pub use actions::{gateway_failure, require_credentials};
pub use oauth::{GoogleOAuth, BLOGGER_SCOPE};
pub use token_store::{PendingLogin, SessionTokenStore};
