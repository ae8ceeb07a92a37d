// blogcast - publish Blogger drafts and announce them on Twitter
//
// Users sign in with Google; their OAuth tokens live in the session only.
// Publishing runs a short pipeline (fetch draft, publish, announce) where
// only the blog steps can abort and the announcement is best-effort.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
