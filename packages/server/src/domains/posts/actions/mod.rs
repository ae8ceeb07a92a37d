//! Posts domain actions

mod delete_post;
mod publish_draft;

pub use delete_post::delete_post;
pub use publish_draft::publish_draft;
