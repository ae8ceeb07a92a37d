//! Pure Blogger v3 REST API client.
//!
//! A minimal client for the Blogger API. Covers the calls needed to manage
//! drafts: listing the user's blogs, listing and fetching posts, publishing
//! and deleting posts. The client is bound to a single OAuth access token, so
//! build one per authenticated request.
//!
//! # Example
//!
//! ```rust,ignore
//! use blogger_client::{BloggerClient, ListPostsParams};
//!
//! let client = BloggerClient::new(access_token);
//!
//! for blog in client.list_blogs().await? {
//!     let drafts = client.list_posts(&blog.id, &ListPostsParams::drafts(50)).await?;
//!     println!("{}: {} drafts", blog.name, drafts.items.len());
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{BloggerError, Result};
pub use types::{Blog, BlogList, ListPostsParams, Post, PostList, PostStatus, PostView};

use serde::de::DeserializeOwned;

pub const BASE_URL: &str = "https://www.googleapis.com/blogger/v3";

/// Upper bound Blogger accepts for `maxResults` on `posts.list`.
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Clone)]
pub struct BloggerClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl BloggerClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), token)
    }

    /// Reuse an existing connection pool (and its timeout settings).
    pub fn with_http_client(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (proxies, testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the blogs owned by the token's user (`blogs.listByUser`, `userId=self`).
    pub async fn list_blogs(&self) -> Result<Vec<Blog>> {
        let url = self.endpoint(&["users", "self", "blogs"])?;
        let resp = self.client.get(url).bearer_auth(&self.token).send().await?;

        let list: BlogList = Self::parse(resp).await?;
        tracing::debug!(count = list.items.len(), "Listed blogs");
        Ok(list.items)
    }

    /// List posts of a blog (`posts.list`). `max_results` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn list_posts(&self, blog_id: &str, params: &ListPostsParams) -> Result<PostList> {
        let mut params = params.clone();
        params.max_results = params.max_results.clamp(1, MAX_PAGE_SIZE);

        let url = self.endpoint(&["blogs", blog_id, "posts"])?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(&params.to_query())
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Fetch a single post with its full body (`posts.get`, author view so drafts resolve).
    pub async fn get_post(&self, blog_id: &str, post_id: &str) -> Result<Post> {
        let url = self.endpoint(&["blogs", blog_id, "posts", post_id])?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(&[("view", PostView::Author.as_str())])
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Transition a post to live (`posts.publish`).
    ///
    /// Blogger answers a publish of an already-live post with the post itself,
    /// so repeating the call is a no-op.
    pub async fn publish_post(&self, blog_id: &str, post_id: &str) -> Result<Post> {
        let url = self.endpoint(&["blogs", blog_id, "posts", post_id, "publish"])?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Delete a post (`posts.delete`).
    pub async fn delete_post(&self, blog_id: &str, post_id: &str) -> Result<()> {
        let url = self.endpoint(&["blogs", blog_id, "posts", post_id])?;
        let resp = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check(resp).await.map(|_| ())
    }

    /// Resource URL under the base URL. Each segment is percent-encoded, so an
    /// id can never add path segments or a query string.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(BloggerError::InvalidUrl(format!("invalid path segment {bad:?}")));
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| BloggerError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| BloggerError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BloggerError::from_response(status.as_u16(), &body));
        }
        Ok(resp)
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let resp = Self::check(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| BloggerError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BloggerClient::new("token").with_base_url("http://localhost:9000/v3/");
        assert_eq!(client.base_url(), "http://localhost:9000/v3");
    }

    #[test]
    fn ids_are_escaped_as_single_segments() {
        let client = BloggerClient::new("token").with_base_url("http://localhost:9000/v3");
        let url = client
            .endpoint(&["blogs", "b1/../x?key=1", "posts", "p#1"])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:9000/v3/blogs/b1%2F..%2Fx%3Fkey=1/posts/p%231"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().unwrap().count(), 5);
    }

    #[test]
    fn dot_and_empty_ids_are_rejected() {
        let client = BloggerClient::new("token");
        for id in ["", ".", ".."] {
            let err = client.endpoint(&["blogs", id, "posts"]).unwrap_err();
            assert!(matches!(err, BloggerError::InvalidUrl(_)), "{id:?} gave {err:?}");
        }
    }

    #[test]
    fn default_base_url_is_blogger_v3() {
        let client = BloggerClient::new("token");
        assert_eq!(client.base_url(), BASE_URL);
    }
}
