// Business domains
pub mod announcements;
pub mod auth;
pub mod blogs;
pub mod posts;
