use serde::{Deserialize, Serialize};

/// Body for `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetMedia {
    pub media_ids: Vec<String>,
}

impl CreateTweetRequest {
    pub fn new(text: impl Into<String>, media_ids: &[String]) -> Self {
        Self {
            text: text.into(),
            media: (!media_ids.is_empty()).then(|| TweetMedia {
                media_ids: media_ids.to_vec(),
            }),
        }
    }
}

/// Wrapper for v2 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// A created tweet.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

/// Response of `POST /1.1/media/upload.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUpload {
    pub media_id_string: String,
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_tweet_omits_media() {
        let body = serde_json::to_value(CreateTweetRequest::new("Hello", &[])).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "Hello" }));
    }

    #[test]
    fn media_ids_are_nested() {
        let body =
            serde_json::to_value(CreateTweetRequest::new("Hello", &["42".to_string()])).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "text": "Hello", "media": { "media_ids": ["42"] } })
        );
    }
}
