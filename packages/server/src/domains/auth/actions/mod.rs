//! Auth domain actions - business logic functions

mod gateway_failure;
mod require_credentials;

pub use gateway_failure::gateway_failure;
pub use require_credentials::require_credentials;
