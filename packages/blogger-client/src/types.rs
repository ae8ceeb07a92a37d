use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post status filter for `posts.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Live,
    Scheduled,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Live => "live",
            PostStatus::Scheduled => "scheduled",
        }
    }
}

/// Access level for post reads. Drafts are only visible with `AUTHOR` or `ADMIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostView {
    Reader,
    Author,
    Admin,
}

impl PostView {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostView::Reader => "READER",
            PostView::Author => "AUTHOR",
            PostView::Admin => "ADMIN",
        }
    }
}

/// Query parameters for `posts.list`.
#[derive(Debug, Clone)]
pub struct ListPostsParams {
    pub status: PostStatus,
    pub max_results: u32,
    pub fetch_bodies: bool,
    pub view: PostView,
    pub page_token: Option<String>,
}

impl ListPostsParams {
    /// Drafts with bodies, as seen by the author.
    pub fn drafts(max_results: u32) -> Self {
        Self {
            status: PostStatus::Draft,
            max_results,
            fetch_bodies: true,
            view: PostView::Author,
            page_token: None,
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("status", self.status.as_str().to_string()),
            ("maxResults", self.max_results.to_string()),
            ("fetchBodies", self.fetch_bodies.to_string()),
            ("view", self.view.as_str().to_string()),
        ];
        if let Some(token) = &self.page_token {
            query.push(("pageToken", token.clone()));
        }
        query
    }
}

/// A blog owned by the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct Blog {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// A blog post resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub url: Option<String>,
    pub status: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// Wrapper for `blogs.listByUser` responses. `items` is omitted when empty.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogList {
    #[serde(default)]
    pub items: Vec<Blog>,
}

/// Wrapper for `posts.list` responses. `items` is omitted when empty.
#[derive(Debug, Clone, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub items: Vec<Post>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_post_list_has_no_items() {
        let list: PostList =
            serde_json::from_str(r#"{"kind":"blogger#postList"}"#).unwrap();
        assert!(list.items.is_empty());
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn draft_query_requests_author_view() {
        let query = ListPostsParams::drafts(25).to_query();
        assert!(query.contains(&("status", "draft".to_string())));
        assert!(query.contains(&("maxResults", "25".to_string())));
        assert!(query.contains(&("view", "AUTHOR".to_string())));
        assert!(query.contains(&("fetchBodies", "true".to_string())));
    }

    #[test]
    fn post_without_title_deserializes() {
        let post: Post = serde_json::from_str(
            r#"{"id":"p1","content":"<p>hi</p>","status":"DRAFT"}"#,
        )
        .unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "");
        assert!(post.url.is_none());
    }
}
