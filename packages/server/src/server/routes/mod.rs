// HTTP routes
pub mod auth;
pub mod blogs;
pub mod health;
pub mod posts;

pub use auth::*;
pub use blogs::*;
pub use health::*;
pub use posts::*;
