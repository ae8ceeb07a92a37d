//! Errors raised by the infrastructure traits.

use std::fmt;

use thiserror::Error;

/// Blog hosting operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOperation {
    ListBlogs,
    ListDrafts,
    GetPost,
    Publish,
    Delete,
}

impl GatewayOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayOperation::ListBlogs => "list_blogs",
            GatewayOperation::ListDrafts => "list_drafts",
            GatewayOperation::GetPost => "get_post",
            GatewayOperation::Publish => "publish",
            GatewayOperation::Delete => "delete",
        }
    }

    /// Message shown to the user when this operation fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayOperation::ListBlogs => "Error fetching blogs. Please try again later.",
            GatewayOperation::ListDrafts => "Error fetching posts. Please try again later.",
            GatewayOperation::GetPost => "Error fetching post. Please try again later.",
            GatewayOperation::Publish => "Error publishing post. Please try again later.",
            GatewayOperation::Delete => "Error deleting post. Please try again later.",
        }
    }
}

impl fmt::Display for GatewayOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a blog hosting call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayCause {
    #[error("timed out")]
    Timeout,

    #[error("unauthorized ({0})")]
    Unauthorized(u16),

    #[error("remote error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Any failure from the blog hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {cause}")]
pub struct GatewayError {
    pub operation: GatewayOperation,
    pub cause: GatewayCause,
}

impl GatewayError {
    pub fn new(operation: GatewayOperation, cause: GatewayCause) -> Self {
        Self { operation, cause }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.cause, GatewayCause::Api { status: 404, .. })
    }

    /// The remote side rejected the access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.cause, GatewayCause::Unauthorized(_))
    }
}

/// Failure from the microblogging API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnounceError {
    /// The exact status text was already posted.
    #[error("duplicate content: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Failed(String),
}

/// Failure from the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider misconfigured: {0}")]
    Config(String),

    #[error("token request rejected: {0}")]
    Rejected(String),

    #[error("token request failed: {0}")]
    Transport(String),
}
