//! Posts domain - publishing drafts and deleting posts
//!
//! Publishing is a short pipeline of fallible steps:
//!   fetch draft → publish → compose announcement → announce
//!
//! Only the first two steps can abort the workflow. The announcement is
//! best-effort and its outcome is reported alongside the published post.

pub mod actions;
pub mod models;

pub use actions::{delete_post, publish_draft};
pub use models::{PublishReport, PublishStage};
