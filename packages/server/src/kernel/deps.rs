//! Server dependencies for routes and workflows (using traits for testability)
//!
//! This module provides the dependency container shared by every request,
//! plus the adapters that put the pure API clients behind the kernel traits.
//! Adapters hold only a connection pool and static configuration; the
//! authenticated client is built per call from the caller's credentials.

use async_trait::async_trait;
use blogger_client::{BloggerClient, BloggerError, ListPostsParams};
use std::sync::Arc;
use std::time::Duration;
use twitter_client::{TwitterClient, TwitterCredentials, TwitterError};

use crate::config::{Config, TwitterConfig};
use crate::domains::announcements::models::{MediaHandle, StatusId};
use crate::domains::auth::models::Credentials;
use crate::domains::auth::GoogleOAuth;
use crate::domains::blogs::models::{Blog, Draft, PublishResult};
use crate::kernel::errors::{
    AnnounceError, GatewayCause, GatewayError, GatewayOperation,
};
use crate::kernel::{BaseAnnouncer, BaseBlogGateway, BaseIdentityProvider};

/// Shared HTTP connection pool with a bounded per-request timeout.
pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

// =============================================================================
// Blogger Adapter (implements BaseBlogGateway trait)
// =============================================================================

pub struct BloggerGateway {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl BloggerGateway {
    pub fn new(http: reqwest::Client, base_url: Option<String>) -> Self {
        Self { http, base_url }
    }

    fn client(&self, credentials: &Credentials) -> BloggerClient {
        let client =
            BloggerClient::with_http_client(self.http.clone(), credentials.access_token.clone());
        match &self.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        }
    }
}

fn gateway_error(operation: GatewayOperation, err: BloggerError) -> GatewayError {
    let cause = match err {
        BloggerError::Timeout => GatewayCause::Timeout,
        BloggerError::Network(message) => GatewayCause::Network(message),
        BloggerError::Api { status, .. } if status == 401 || status == 403 => {
            GatewayCause::Unauthorized(status)
        }
        BloggerError::Api { status, message } => GatewayCause::Api { status, message },
        BloggerError::InvalidUrl(message) => GatewayCause::Api {
            status: 400,
            message,
        },
        BloggerError::Parse(message) => GatewayCause::MalformedResponse(message),
    };
    GatewayError::new(operation, cause)
}

#[async_trait]
impl BaseBlogGateway for BloggerGateway {
    async fn list_blogs(&self, credentials: &Credentials) -> Result<Vec<Blog>, GatewayError> {
        let blogs = self
            .client(credentials)
            .list_blogs()
            .await
            .map_err(|e| gateway_error(GatewayOperation::ListBlogs, e))?;

        Ok(blogs.into_iter().map(Blog::from).collect())
    }

    async fn list_drafts(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        max_results: u32,
    ) -> Result<Vec<Draft>, GatewayError> {
        let list = self
            .client(credentials)
            .list_posts(blog_id, &ListPostsParams::drafts(max_results))
            .await
            .map_err(|e| gateway_error(GatewayOperation::ListDrafts, e))?;

        Ok(list.items.into_iter().map(Draft::from).collect())
    }

    async fn get_post(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<Draft, GatewayError> {
        self.client(credentials)
            .get_post(blog_id, post_id)
            .await
            .map(Draft::from)
            .map_err(|e| gateway_error(GatewayOperation::GetPost, e))
    }

    async fn publish(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<PublishResult, GatewayError> {
        let post = self
            .client(credentials)
            .publish_post(blog_id, post_id)
            .await
            .map_err(|e| gateway_error(GatewayOperation::Publish, e))?;

        PublishResult::from_post(post).ok_or_else(|| {
            GatewayError::new(
                GatewayOperation::Publish,
                GatewayCause::MalformedResponse("published post has no url".to_string()),
            )
        })
    }

    async fn delete(
        &self,
        credentials: &Credentials,
        blog_id: &str,
        post_id: &str,
    ) -> Result<(), GatewayError> {
        self.client(credentials)
            .delete_post(blog_id, post_id)
            .await
            .map_err(|e| gateway_error(GatewayOperation::Delete, e))
    }
}

// =============================================================================
// Twitter Adapter (implements BaseAnnouncer trait)
// =============================================================================

pub struct TwitterAnnouncer {
    http: reqwest::Client,
    config: TwitterConfig,
    api_base_url: Option<String>,
    upload_base_url: Option<String>,
}

impl TwitterAnnouncer {
    pub fn new(
        http: reqwest::Client,
        config: TwitterConfig,
        api_base_url: Option<String>,
        upload_base_url: Option<String>,
    ) -> Self {
        Self {
            http,
            config,
            api_base_url,
            upload_base_url,
        }
    }

    fn client(&self) -> TwitterClient {
        let credentials = TwitterCredentials {
            consumer_key: self.config.api_key.clone(),
            consumer_secret: self.config.api_secret.clone(),
            access_token: self.config.access_token.clone(),
            access_secret: self.config.access_secret.clone(),
        };
        let client = TwitterClient::with_http_client(self.http.clone(), credentials);
        if self.api_base_url.is_none() && self.upload_base_url.is_none() {
            return client;
        }
        client.with_base_urls(
            self.api_base_url
                .clone()
                .unwrap_or_else(|| twitter_client::API_BASE_URL.to_string()),
            self.upload_base_url
                .clone()
                .unwrap_or_else(|| twitter_client::UPLOAD_BASE_URL.to_string()),
        )
    }
}

fn announce_error(err: TwitterError) -> AnnounceError {
    match err {
        TwitterError::Duplicate(message) => AnnounceError::Duplicate(message),
        TwitterError::Timeout => AnnounceError::Failed("request timed out".to_string()),
        other => AnnounceError::Failed(other.to_string()),
    }
}

#[async_trait]
impl BaseAnnouncer for TwitterAnnouncer {
    async fn upload_image(&self, url: &str, mime_type: &str) -> Result<MediaHandle, AnnounceError> {
        self.client()
            .upload_media_from_url(url, mime_type)
            .await
            .map(|upload| MediaHandle(upload.media_id_string))
            .map_err(announce_error)
    }

    async fn post_status(
        &self,
        text: &str,
        media: Option<&MediaHandle>,
    ) -> Result<StatusId, AnnounceError> {
        let media_ids: Vec<String> = media.map(|m| m.0.clone()).into_iter().collect();
        self.client()
            .create_tweet(text, &media_ids)
            .await
            .map(|tweet| StatusId(tweet.id))
            .map_err(announce_error)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to routes and workflows (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub blogs: Arc<dyn BaseBlogGateway>,
    /// `None` when no announcer credentials are configured
    pub announcer: Option<Arc<dyn BaseAnnouncer>>,
    /// Page size for draft listings (1..=50)
    pub drafts_page_size: u32,
}

impl ServerDeps {
    pub fn new(
        identity: Arc<dyn BaseIdentityProvider>,
        blogs: Arc<dyn BaseBlogGateway>,
        announcer: Option<Arc<dyn BaseAnnouncer>>,
        drafts_page_size: u32,
    ) -> Self {
        Self {
            identity,
            blogs,
            announcer,
            drafts_page_size,
        }
    }

    /// Wire the production adapters from validated configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = build_http_client(config.remote_call_timeout)?;

        let identity = Arc::new(GoogleOAuth::new(
            config.google.clone(),
            config.remote_call_timeout,
        )?);
        let blogs = Arc::new(BloggerGateway::new(
            http.clone(),
            config.blogger_api_base_url.clone(),
        ));
        let announcer = config.twitter.clone().map(|twitter| {
            Arc::new(TwitterAnnouncer::new(
                http.clone(),
                twitter,
                config.twitter_api_base_url.clone(),
                config.twitter_upload_base_url.clone(),
            )) as Arc<dyn BaseAnnouncer>
        });

        Ok(Self::new(identity, blogs, announcer, config.drafts_page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blogger_auth_failures_map_to_unauthorized() {
        let err = gateway_error(
            GatewayOperation::ListBlogs,
            BloggerError::Api {
                status: 401,
                message: "Invalid Credentials".into(),
            },
        );
        assert_eq!(err.cause, GatewayCause::Unauthorized(401));
        assert_eq!(err.operation, GatewayOperation::ListBlogs);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn blogger_not_found_stays_api_error() {
        let err = gateway_error(
            GatewayOperation::Publish,
            BloggerError::Api {
                status: 404,
                message: "Not Found".into(),
            },
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn blogger_timeout_maps_to_timeout() {
        let err = gateway_error(GatewayOperation::GetPost, BloggerError::Timeout);
        assert_eq!(err.cause, GatewayCause::Timeout);
    }

    #[test]
    fn twitter_duplicate_is_preserved() {
        let err = announce_error(TwitterError::Duplicate("Status is a duplicate.".into()));
        assert_eq!(err, AnnounceError::Duplicate("Status is a duplicate.".into()));
    }

    #[test]
    fn twitter_other_errors_become_failures() {
        let err = announce_error(TwitterError::Api {
            status: 500,
            message: "oops".into(),
        });
        assert!(matches!(err, AnnounceError::Failed(ref m) if m.contains("oops")));
    }
}
