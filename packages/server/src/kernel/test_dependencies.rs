// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Every mock records its calls so tests can assert on ordering and on the
// absence of remote traffic.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::errors::{AnnounceError, GatewayCause, GatewayError, GatewayOperation, IdentityError};
use super::{
    AuthorizationRequest, BaseAnnouncer, BaseBlogGateway, BaseIdentityProvider, BaseTokenStore,
    ServerDeps,
};
use crate::common::utils::extract_first_image;
use crate::domains::announcements::models::{MediaHandle, StatusId};
use crate::domains::auth::models::Credentials;
use crate::domains::blogs::models::{Blog, Draft, PublishResult};

// =============================================================================
// Mock Blog Gateway
// =============================================================================

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub operation: GatewayOperation,
    pub blog_id: Option<String>,
    pub post_id: Option<String>,
    pub access_token: String,
}

#[derive(Debug, Clone)]
struct StoredPost {
    blog_id: String,
    draft: Draft,
    live: bool,
}

pub struct MockBlogGateway {
    blogs: Arc<Mutex<Vec<Blog>>>,
    posts: Arc<Mutex<Vec<StoredPost>>>,
    failures: Arc<Mutex<Vec<(GatewayOperation, GatewayCause)>>>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MockBlogGateway {
    pub fn new() -> Self {
        Self {
            blogs: Arc::new(Mutex::new(Vec::new())),
            posts: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_blog(self, id: &str, name: &str) -> Self {
        self.blogs.lock().unwrap().push(Blog {
            id: id.to_string(),
            name: name.to_string(),
            url: Some(format!("https://{id}.blogspot.example")),
        });
        self
    }

    pub fn with_draft(self, blog_id: &str, post_id: &str, title: &str, content_html: &str) -> Self {
        self.posts.lock().unwrap().push(StoredPost {
            blog_id: blog_id.to_string(),
            draft: Draft {
                id: post_id.to_string(),
                title: title.to_string(),
                content_html: content_html.to_string(),
            },
            live: false,
        });
        self
    }

    /// Make every call of `operation` fail with `cause`
    pub fn failing(self, operation: GatewayOperation, cause: GatewayCause) -> Self {
        self.failures.lock().unwrap().push((operation, cause));
        self
    }

    /// URL the mock assigns to a published post
    pub fn post_url(blog_id: &str, post_id: &str) -> String {
        format!("https://{blog_id}.blogspot.example/{post_id}.html")
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn operations(&self) -> Vec<GatewayOperation> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.operation)
            .collect()
    }

    /// Ids of posts still in draft state for a blog
    pub fn draft_ids(&self, blog_id: &str) -> Vec<String> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.blog_id == blog_id && !p.live)
            .map(|p| p.draft.id.clone())
            .collect()
    }

    fn record(
        &self,
        operation: GatewayOperation,
        credentials: &Credentials,
        blog_id: Option<&str>,
        post_id: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall {
            operation,
            blog_id: blog_id.map(String::from),
            post_id: post_id.map(String::from),
            access_token: credentials.access_token.clone(),
        });

        let failures = self.failures.lock().unwrap();
        match failures.iter().find(|(op, _)| *op == operation) {
            Some((_, cause)) => Err(GatewayError::new(operation, cause.clone())),
            None => Ok(()),
        }
    }

    fn not_found(operation: GatewayOperation) -> GatewayError {
        GatewayError::new(
            operation,
            GatewayCause::Api {
                status: 404,
                message: "Not Found".to_string(),
            },
        )
    }
}

impl Default for MockBlogGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBlogGateway for MockBlogGateway {
    async fn list_blogs(&self, credentials: &Credentials) -> Result<Vec<Blog>, GatewayError> {
        self.record(GatewayOperation::ListBlogs, credentials, None, None)?;
        Ok(self.blogs.lock().unwrap().clone())
    }

    async fn list_drafts(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        max_results: u32,
    ) -> Result<Vec<Draft>, GatewayError> {
        self.record(GatewayOperation::ListDrafts, credentials, Some(blog_id), None)?;

        let limit = max_results.clamp(1, blogger_client::MAX_PAGE_SIZE) as usize;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.blog_id == blog_id && !p.live)
            .take(limit)
            .map(|p| p.draft.clone())
            .collect())
    }

    async fn get_post(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<Draft, GatewayError> {
        self.record(GatewayOperation::GetPost, credentials, Some(blog_id), Some(post_id))?;

        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.blog_id == blog_id && p.draft.id == post_id)
            .map(|p| p.draft.clone())
            .ok_or_else(|| Self::not_found(GatewayOperation::GetPost))
    }

    async fn publish(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<PublishResult, GatewayError> {
        self.record(GatewayOperation::Publish, credentials, Some(blog_id), Some(post_id))?;

        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.blog_id == blog_id && p.draft.id == post_id)
            .ok_or_else(|| Self::not_found(GatewayOperation::Publish))?;
        post.live = true;

        Ok(PublishResult {
            post_url: Self::post_url(blog_id, post_id),
            title: post.draft.title.clone(),
            first_image_url: extract_first_image(&post.draft.content_html),
        })
    }

    async fn delete(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<(), GatewayError> {
        self.record(GatewayOperation::Delete, credentials, Some(blog_id), Some(post_id))?;

        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| !(p.blog_id == blog_id && p.draft.id == post_id));
        if posts.len() == before {
            return Err(Self::not_found(GatewayOperation::Delete));
        }
        Ok(())
    }
}

// =============================================================================
// Mock Announcer
// =============================================================================

/// Recorded announcer call, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncerCall {
    UploadImage { url: String, mime_type: String },
    PostStatus { text: String, media: Option<String> },
}

pub struct MockAnnouncer {
    upload_error: Arc<Mutex<Option<AnnounceError>>>,
    post_error: Arc<Mutex<Option<AnnounceError>>>,
    calls: Arc<Mutex<Vec<AnnouncerCall>>>,
}

impl MockAnnouncer {
    pub fn new() -> Self {
        Self {
            upload_error: Arc::new(Mutex::new(None)),
            post_error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reject every status as already posted
    pub fn rejecting_duplicates(self) -> Self {
        *self.post_error.lock().unwrap() = Some(AnnounceError::Duplicate(
            "Status is a duplicate.".to_string(),
        ));
        self
    }

    pub fn failing_posts(self, reason: &str) -> Self {
        *self.post_error.lock().unwrap() = Some(AnnounceError::Failed(reason.to_string()));
        self
    }

    pub fn failing_uploads(self, reason: &str) -> Self {
        *self.upload_error.lock().unwrap() = Some(AnnounceError::Failed(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<AnnouncerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                AnnouncerCall::UploadImage { url, mime_type } => {
                    Some((url.clone(), mime_type.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<(String, Option<String>)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                AnnouncerCall::PostStatus { text, media } => Some((text.clone(), media.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAnnouncer for MockAnnouncer {
    async fn upload_image(&self, url: &str, mime_type: &str) -> Result<MediaHandle, AnnounceError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(AnnouncerCall::UploadImage {
            url: url.to_string(),
            mime_type: mime_type.to_string(),
        });

        match self.upload_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(MediaHandle(format!("media-{}", calls.len()))),
        }
    }

    async fn post_status(
        &self,
        text: &str,
        media: Option<&MediaHandle>,
    ) -> Result<StatusId, AnnounceError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(AnnouncerCall::PostStatus {
            text: text.to_string(),
            media: media.map(|m| m.0.clone()),
        });

        match self.post_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(StatusId(format!("status-{}", calls.len()))),
        }
    }
}

// =============================================================================
// Mock Identity Provider
// =============================================================================

pub struct MockIdentityProvider {
    reject_refresh: bool,
    exchanges: Arc<Mutex<Vec<String>>>,
    refreshes: Arc<Mutex<Vec<String>>>,
}

impl MockIdentityProvider {
    pub const STATE: &'static str = "mock-state";
    pub const VERIFIER: &'static str = "mock-verifier";
    /// Codes equal to this are rejected by the token endpoint
    pub const BAD_CODE: &'static str = "bad-code";

    pub fn new() -> Self {
        Self {
            reject_refresh: false,
            exchanges: Arc::new(Mutex::new(Vec::new())),
            refreshes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting_refresh(mut self) -> Self {
        self.reject_refresh = true;
        self
    }

    pub fn exchanges(&self) -> Vec<String> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn refreshes(&self) -> Vec<String> {
        self.refreshes.lock().unwrap().clone()
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    fn authorization_request(&self) -> AuthorizationRequest {
        AuthorizationRequest {
            url: format!("https://accounts.example/auth?state={}", Self::STATE),
            csrf_state: Self::STATE.to_string(),
            pkce_verifier: Self::VERIFIER.to_string(),
        }
    }

    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<Credentials, IdentityError> {
        self.exchanges.lock().unwrap().push(code.to_string());

        if code == Self::BAD_CODE || pkce_verifier != Self::VERIFIER {
            return Err(IdentityError::Rejected("invalid_grant".to_string()));
        }
        Ok(Credentials::new(
            format!("access-{code}"),
            Some("refresh-token".to_string()),
            Some(std::time::Duration::from_secs(3600)),
        ))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, IdentityError> {
        self.refreshes.lock().unwrap().push(refresh_token.to_string());

        if self.reject_refresh {
            return Err(IdentityError::Rejected("invalid_grant".to_string()));
        }
        Ok(Credentials::new(
            "refreshed-access",
            None,
            Some(std::time::Duration::from_secs(3600)),
        ))
    }
}

// =============================================================================
// In-memory Token Store
// =============================================================================

#[derive(Default)]
pub struct MemoryTokenStore {
    credentials: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }

    pub fn current(&self) -> Option<Credentials> {
        self.credentials.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseTokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<Credentials>> {
        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn set(&self, credentials: Credentials) -> Result<()> {
        *self.credentials.lock().unwrap() = Some(credentials);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks wired together, with handles kept for assertions
pub struct TestDependencies {
    pub identity: Arc<MockIdentityProvider>,
    pub blogs: Arc<MockBlogGateway>,
    pub announcer: Option<Arc<MockAnnouncer>>,
}

impl TestDependencies {
    pub fn new(blogs: MockBlogGateway) -> Self {
        Self {
            identity: Arc::new(MockIdentityProvider::new()),
            blogs: Arc::new(blogs),
            announcer: Some(Arc::new(MockAnnouncer::new())),
        }
    }

    pub fn with_announcer(mut self, announcer: MockAnnouncer) -> Self {
        self.announcer = Some(Arc::new(announcer));
        self
    }

    pub fn without_announcer(mut self) -> Self {
        self.announcer = None;
        self
    }

    pub fn with_identity(mut self, identity: MockIdentityProvider) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.identity.clone(),
            self.blogs.clone(),
            self.announcer
                .clone()
                .map(|a| a as Arc<dyn BaseAnnouncer>),
            blogger_client::MAX_PAGE_SIZE,
        )
    }

    pub fn announcer(&self) -> &MockAnnouncer {
        self.announcer
            .as_deref()
            .expect("test dependencies have no announcer")
    }
}

/// Credentials valid for the next hour
pub fn valid_credentials() -> Credentials {
    Credentials::new(
        "valid-access",
        Some("refresh-token".to_string()),
        Some(std::time::Duration::from_secs(3600)),
    )
}

/// Credentials already past their deadline
pub fn expired_credentials(refresh_token: Option<&str>) -> Credentials {
    Credentials {
        access_token: "stale-access".to_string(),
        refresh_token: refresh_token.map(String::from),
        expires_at: Some(chrono::Utc::now() - chrono::Duration::minutes(5)),
    }
}
