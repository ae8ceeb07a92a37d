use serde::Serialize;

use crate::common::utils::guess_image_mime;
use crate::domains::blogs::models::PublishResult;

/// Remote id of an uploaded image, attachable to one status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(pub String);

/// Remote id of a posted status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusId(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementImage {
    pub url: String,
    pub mime_type: String,
}

/// Status update text plus the optional image to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub image: Option<AnnouncementImage>,
}

impl Announcement {
    /// `"{title}\n{post_url}"`, with the post's first image if it has one.
    pub fn compose(published: &PublishResult) -> Self {
        Self {
            text: format!("{}\n{}", published.title, published.post_url),
            image: published.first_image_url.as_ref().map(|url| AnnouncementImage {
                url: url.clone(),
                mime_type: guess_image_mime(url),
            }),
        }
    }
}

/// Result of the best-effort announce step. Never a workflow failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum AnnouncementOutcome {
    Sent,
    SentWithMedia,
    SkippedDuplicate,
    Failed(String),
}

impl AnnouncementOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementOutcome::Sent => "sent",
            AnnouncementOutcome::SentWithMedia => "sent_with_media",
            AnnouncementOutcome::SkippedDuplicate => "skipped_duplicate",
            AnnouncementOutcome::Failed(_) => "failed",
        }
    }

    /// Secondary notice shown next to the publish confirmation.
    pub fn notice(&self) -> String {
        match self {
            AnnouncementOutcome::Sent => "Tweet posted.".to_string(),
            AnnouncementOutcome::SentWithMedia => "Tweet posted with image.".to_string(),
            AnnouncementOutcome::SkippedDuplicate => {
                "Tweet skipped: it was already posted.".to_string()
            }
            AnnouncementOutcome::Failed(reason) => format!("Tweet not posted: {reason}"),
        }
    }
}
