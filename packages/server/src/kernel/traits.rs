// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The publish workflow and credential checks are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseBlogGateway, BaseAnnouncer)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::announcements::models::{MediaHandle, StatusId};
use crate::domains::auth::models::Credentials;
use crate::domains::blogs::models::{Blog, Draft, PublishResult};
use crate::kernel::errors::{AnnounceError, GatewayError, IdentityError};

// =============================================================================
// Token Store Trait (session-scoped credentials)
// =============================================================================

#[async_trait]
pub trait BaseTokenStore: Send + Sync {
    /// Credentials of the current session, if signed in
    async fn get(&self) -> Result<Option<Credentials>>;

    /// Replace the session's credentials (last write wins)
    async fn set(&self, credentials: Credentials) -> Result<()>;

    /// Forget the session's credentials
    async fn clear(&self) -> Result<()>;
}

// =============================================================================
// Identity Provider Trait (OAuth2 authorization-code flow)
// =============================================================================

/// Everything `/login` needs to send the user to the consent screen.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Build a consent-screen URL with fresh CSRF state and PKCE challenge
    fn authorization_request(&self) -> AuthorizationRequest;

    /// Exchange an authorization code for tokens
    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> std::result::Result<Credentials, IdentityError>;

    /// Obtain a new access token from a refresh token
    async fn refresh(&self, refresh_token: &str) -> std::result::Result<Credentials, IdentityError>;
}

// =============================================================================
// Blog Content Gateway Trait (blog hosting API)
// =============================================================================

#[async_trait]
pub trait BaseBlogGateway: Send + Sync {
    /// Blogs owned by the signed-in user (empty if none)
    async fn list_blogs(&self, credentials: &Credentials)
        -> std::result::Result<Vec<Blog>, GatewayError>;

    /// Draft posts of a blog, at most `max_results` (capped at 50)
    async fn list_drafts(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        max_results: u32,
    ) -> std::result::Result<Vec<Draft>, GatewayError>;

    /// One post with its full body
    async fn get_post(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> std::result::Result<Draft, GatewayError>;

    /// Transition a post to live
    async fn publish(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> std::result::Result<PublishResult, GatewayError>;

    /// Delete a post
    async fn delete(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> std::result::Result<(), GatewayError>;
}

// =============================================================================
// Announcer Trait (microblogging API)
// =============================================================================

#[async_trait]
pub trait BaseAnnouncer: Send + Sync {
    /// Fetch the image at `url` and upload it as attachable media
    async fn upload_image(
        &self,
        url: &str,
        mime_type: &str,
    ) -> std::result::Result<MediaHandle, AnnounceError>;

    /// Post a status update, optionally with uploaded media
    async fn post_status(
        &self,
        text: &str,
        media: Option<&MediaHandle>,
    ) -> std::result::Result<StatusId, AnnounceError>;
}
