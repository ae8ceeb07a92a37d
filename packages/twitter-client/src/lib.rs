//! Pure Twitter REST API client.
//!
//! Posts status updates (`POST /2/tweets`) and uploads images
//! (`POST /1.1/media/upload.json`), signing each request with OAuth 1.0a
//! user-context credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_client::{TwitterClient, TwitterCredentials};
//!
//! let client = TwitterClient::new(credentials);
//!
//! let media = client.upload_media_from_url("https://example.org/a.jpg", "image/jpeg").await?;
//! let tweet = client.create_tweet("Hello\nhttps://example.org", &[media.media_id_string]).await?;
//! ```

pub mod error;
pub mod oauth1;
pub mod types;

pub use error::{Result, TwitterError};
pub use oauth1::TwitterCredentials;
pub use types::{ApiResponse, CreateTweetRequest, MediaUpload, Tweet, TweetMedia};

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

pub const API_BASE_URL: &str = "https://api.twitter.com";
pub const UPLOAD_BASE_URL: &str = "https://upload.twitter.com";

/// Largest image the simple media upload accepts.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
    credentials: TwitterCredentials,
    api_base_url: String,
    upload_base_url: String,
}

impl TwitterClient {
    pub fn new(credentials: TwitterCredentials) -> Self {
        Self::with_http_client(reqwest::Client::new(), credentials)
    }

    /// Reuse an existing connection pool (and its timeout settings).
    pub fn with_http_client(client: reqwest::Client, credentials: TwitterCredentials) -> Self {
        Self {
            client,
            credentials,
            api_base_url: API_BASE_URL.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
        }
    }

    /// Set custom base URLs (proxies, testing).
    pub fn with_base_urls(mut self, api: impl Into<String>, upload: impl Into<String>) -> Self {
        self.api_base_url = api.into().trim_end_matches('/').to_string();
        self.upload_base_url = upload.into().trim_end_matches('/').to_string();
        self
    }

    /// Post a status update, optionally with attached media ids.
    pub async fn create_tweet(&self, text: &str, media_ids: &[String]) -> Result<Tweet> {
        let url = format!("{}/2/tweets", self.api_base_url);
        let auth = oauth1::authorization_header("POST", &url, &[], &self.credentials);

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&CreateTweetRequest::new(text, media_ids))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::from_response(status.as_u16(), &body));
        }

        let api_resp: ApiResponse<Tweet> = resp.json().await?;
        tracing::debug!(tweet_id = %api_resp.data.id, "Tweet created");
        Ok(api_resp.data)
    }

    /// Upload raw image bytes (simple, non-chunked upload).
    pub async fn upload_media(&self, bytes: Vec<u8>, mime_type: &str) -> Result<MediaUpload> {
        let url = format!("{}/1.1/media/upload.json", self.upload_base_url);
        let auth = oauth1::authorization_header("POST", &url, &[], &self.credentials);

        let part = Part::bytes(bytes)
            .file_name("media")
            .mime_str(mime_type)
            .map_err(|e| TwitterError::Media(format!("invalid mime type {mime_type}: {e}")))?;
        let form = Form::new().part("media", part);

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::from_response(status.as_u16(), &body));
        }

        let upload: MediaUpload = resp.json().await?;
        tracing::debug!(media_id = %upload.media_id_string, "Media uploaded");
        Ok(upload)
    }

    /// Download an image and upload it. Images over [`MAX_IMAGE_BYTES`] are
    /// refused without being read in full.
    pub async fn upload_media_from_url(&self, url: &str, mime_type: &str) -> Result<MediaUpload> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TwitterError::Media(format!(
                "fetching {url} returned {status}"
            )));
        }

        let bytes = read_limited(resp, MAX_IMAGE_BYTES).await?;
        self.upload_media(bytes, mime_type).await
    }
}

/// Read a response body, stopping as soon as it grows past `limit` bytes.
async fn read_limited(mut resp: reqwest::Response, limit: usize) -> Result<Vec<u8>> {
    let url = resp.url().clone();

    if let Some(len) = resp.content_length() {
        if len > limit as u64 {
            return Err(TwitterError::Media(format!(
                "{url} is {len} bytes, over the {limit} byte limit"
            )));
        }
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if bytes.len() + chunk.len() > limit {
            return Err(TwitterError::Media(format!(
                "{url} is over the {limit} byte limit"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(TwitterError::Media(format!("{url} returned an empty body")));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: Vec<u8>) -> reqwest::Response {
        reqwest::Response::from(http::Response::new(body))
    }

    #[tokio::test]
    async fn small_image_is_read_whole() {
        let bytes = read_limited(response(vec![7; 1024]), 4096).await.unwrap();
        assert_eq!(bytes.len(), 1024);
    }

    #[tokio::test]
    async fn oversized_image_is_refused() {
        let err = read_limited(response(vec![0; 4097]), 4096)
            .await
            .unwrap_err();
        assert!(
            matches!(err, TwitterError::Media(ref m) if m.contains("4096 byte limit")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn image_at_the_limit_is_accepted() {
        let bytes = read_limited(response(vec![1; 4096]), 4096).await.unwrap();
        assert_eq!(bytes.len(), 4096);
    }

    #[tokio::test]
    async fn empty_body_is_refused() {
        let err = read_limited(response(Vec::new()), 4096).await.unwrap_err();
        assert!(matches!(err, TwitterError::Media(ref m) if m.contains("empty body")));
    }
}
