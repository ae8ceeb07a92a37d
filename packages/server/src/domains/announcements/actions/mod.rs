//! Announcements domain actions

mod announce;

pub use announce::announce;
