//! Blogs domain - read-only views of the user's blogs and drafts

pub mod actions;
pub mod models;

pub use actions::{list_blogs, list_drafts};
pub use models::{Blog, Draft, DraftSummary, PublishResult};
