mod credentials;

pub use credentials::{Credentials, EXPIRY_MARGIN_SECS};
