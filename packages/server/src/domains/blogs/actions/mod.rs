//! Blogs domain actions

mod list_blogs;
mod list_drafts;

pub use list_blogs::list_blogs;
pub use list_drafts::list_drafts;
