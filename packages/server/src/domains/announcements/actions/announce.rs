//! Announce action

use tracing::{info, warn};

use crate::domains::announcements::models::{Announcement, AnnouncementOutcome};
use crate::kernel::{AnnounceError, BaseAnnouncer};

/// Post an announcement, classifying every failure instead of returning it.
///
/// A failed image upload downgrades to a text-only status.
pub async fn announce(
    announcer: Option<&dyn BaseAnnouncer>,
    announcement: &Announcement,
) -> AnnouncementOutcome {
    let Some(announcer) = announcer else {
        warn!("Announcer not configured, skipping announcement");
        return AnnouncementOutcome::Failed("announcer not configured".to_string());
    };

    let media = match &announcement.image {
        Some(image) => match announcer.upload_image(&image.url, &image.mime_type).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(image_url = %image.url, error = %e, "Image upload failed, posting text only");
                None
            }
        },
        None => None,
    };

    match announcer.post_status(&announcement.text, media.as_ref()).await {
        Ok(status) if media.is_some() => {
            info!(status_id = %status.0, "Announcement posted with image");
            AnnouncementOutcome::SentWithMedia
        }
        Ok(status) => {
            info!(status_id = %status.0, "Announcement posted");
            AnnouncementOutcome::Sent
        }
        Err(AnnounceError::Duplicate(message)) => {
            info!(%message, "Announcement already posted, skipping");
            AnnouncementOutcome::SkippedDuplicate
        }
        Err(AnnounceError::Failed(reason)) => {
            warn!(%reason, "Announcement failed");
            AnnouncementOutcome::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::announcements::models::AnnouncementImage;
    use crate::kernel::test_dependencies::{AnnouncerCall, MockAnnouncer};

    fn text_only() -> Announcement {
        Announcement {
            text: "Hello\nhttp://blog.example/p1".into(),
            image: None,
        }
    }

    fn with_image() -> Announcement {
        Announcement {
            text: "Pic\nhttp://blog.example/p2".into(),
            image: Some(AnnouncementImage {
                url: "http://x/y.jpg".into(),
                mime_type: "image/jpeg".into(),
            }),
        }
    }

    #[tokio::test]
    async fn text_only_is_sent() {
        let announcer = MockAnnouncer::new();
        let outcome = announce(Some(&announcer), &text_only()).await;

        assert_eq!(outcome, AnnouncementOutcome::Sent);
        assert!(announcer.uploads().is_empty());
        assert_eq!(announcer.statuses().len(), 1);
    }

    #[tokio::test]
    async fn image_is_uploaded_before_status() {
        let announcer = MockAnnouncer::new();
        let outcome = announce(Some(&announcer), &with_image()).await;

        assert_eq!(outcome, AnnouncementOutcome::SentWithMedia);
        let calls = announcer.calls();
        assert_eq!(
            calls[0],
            AnnouncerCall::UploadImage {
                url: "http://x/y.jpg".into(),
                mime_type: "image/jpeg".into(),
            }
        );
        assert!(matches!(
            &calls[1],
            AnnouncerCall::PostStatus { media: Some(id), .. } if id == "media-1"
        ));
    }

    #[tokio::test]
    async fn duplicate_is_skipped() {
        let announcer = MockAnnouncer::new().rejecting_duplicates();
        let outcome = announce(Some(&announcer), &text_only()).await;
        assert_eq!(outcome, AnnouncementOutcome::SkippedDuplicate);
    }

    #[tokio::test]
    async fn other_errors_are_reported_as_failed() {
        let announcer = MockAnnouncer::new().failing_posts("rate limited");
        let outcome = announce(Some(&announcer), &text_only()).await;
        assert_eq!(outcome, AnnouncementOutcome::Failed("rate limited".into()));
    }

    #[tokio::test]
    async fn upload_failure_falls_back_to_text() {
        let announcer = MockAnnouncer::new().failing_uploads("fetch failed");
        let outcome = announce(Some(&announcer), &with_image()).await;

        assert_eq!(outcome, AnnouncementOutcome::Sent);
        assert_eq!(announcer.statuses()[0].1, None);
    }

    #[tokio::test]
    async fn missing_announcer_fails_without_calls() {
        let outcome = announce(None, &text_only()).await;
        assert_eq!(
            outcome,
            AnnouncementOutcome::Failed("announcer not configured".into())
        );
    }
}
