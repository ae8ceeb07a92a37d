//! Announcements domain - best-effort status updates for published posts

pub mod actions;
pub mod models;

pub use actions::announce;
pub use models::{Announcement, AnnouncementImage, AnnouncementOutcome, MediaHandle, StatusId};
