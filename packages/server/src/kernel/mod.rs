//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod errors;
pub mod test_dependencies;
pub mod traits;

pub use deps::{build_http_client, BloggerGateway, ServerDeps, TwitterAnnouncer};
pub use errors::{AnnounceError, GatewayCause, GatewayError, GatewayOperation, IdentityError};
pub use test_dependencies::TestDependencies;
pub use traits::*;
