use serde::Serialize;

use crate::common::utils::extract_first_image;

/// A blog owned by the signed-in user. Not cached; fetched per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blog {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

impl From<blogger_client::Blog> for Blog {
    fn from(blog: blogger_client::Blog) -> Self {
        Self {
            id: blog.id,
            name: blog.name,
            url: blog.url,
        }
    }
}

/// Snapshot of an unpublished post as returned by one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub content_html: String,
}

impl Draft {
    pub fn first_image_url(&self) -> Option<String> {
        extract_first_image(&self.content_html)
    }

    /// Projection rendered by the drafts listing.
    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content_html.clone(),
            first_image: self.first_image_url(),
        }
    }
}

impl From<blogger_client::Post> for Draft {
    fn from(post: blogger_client::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content_html: post.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub first_image: Option<String>,
}

/// Outcome of a successful publish. `post_url` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub post_url: String,
    pub title: String,
    pub first_image_url: Option<String>,
}

impl PublishResult {
    /// Build from the published resource; `None` when the response has no URL.
    pub fn from_post(post: blogger_client::Post) -> Option<Self> {
        let post_url = post.url.filter(|u| !u.trim().is_empty())?;
        let first_image_url = extract_first_image(&post.content);

        Some(Self {
            post_url,
            title: post.title,
            first_image_url,
        })
    }

    /// Fill gaps from the draft the publish started from.
    pub fn or_draft(self, draft: &Draft) -> Self {
        Self {
            title: if self.title.is_empty() {
                draft.title.clone()
            } else {
                self.title
            },
            first_image_url: self.first_image_url.or_else(|| draft.first_image_url()),
            post_url: self.post_url,
        }
    }
}
