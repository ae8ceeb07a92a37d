use thiserror::Error;

use crate::domains::posts::models::PublishStage;
use crate::kernel::GatewayError;

/// Failures of a user-facing workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No usable credentials; the caller must sign in again.
    #[error("Authentication required")]
    Unauthenticated,

    /// The publish pipeline stopped before the post went live.
    #[error("Publish aborted while {stage}: {source}")]
    Aborted {
        stage: PublishStage,
        source: GatewayError,
    },

    /// A single gateway call outside the publish pipeline failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Token store error: {0}")]
    TokenStore(#[from] anyhow::Error),
}

impl WorkflowError {
    /// The gateway failure behind this error, if any
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            WorkflowError::Aborted { source, .. } => Some(source),
            WorkflowError::Gateway(source) => Some(source),
            _ => None,
        }
    }
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;
