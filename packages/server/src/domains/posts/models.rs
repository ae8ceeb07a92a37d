use serde::Serialize;
use std::fmt;

use crate::domains::announcements::models::AnnouncementOutcome;
use crate::domains::blogs::models::PublishResult;

/// Where the publish pipeline is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStage {
    Idle,
    FetchingDraft,
    Publishing,
    ComposingAnnouncement,
    Announcing,
    Done,
}

impl PublishStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStage::Idle => "idle",
            PublishStage::FetchingDraft => "fetching_draft",
            PublishStage::Publishing => "publishing",
            PublishStage::ComposingAnnouncement => "composing_announcement",
            PublishStage::Announcing => "announcing",
            PublishStage::Done => "done",
        }
    }
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completed publish returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub published: PublishResult,
    /// `None` when the caller did not ask to announce.
    pub announcement: Option<AnnouncementOutcome>,
}

impl PublishReport {
    /// Secondary notice about the announcement, if one was attempted.
    pub fn notice(&self) -> Option<String> {
        self.announcement.as_ref().map(AnnouncementOutcome::notice)
    }
}
