//! Gateway failure handling shared by every signed-in action

use tracing::warn;

use crate::common::WorkflowError;
use crate::kernel::{BaseTokenStore, GatewayError};

/// Turn a failed blog hosting call into a workflow error.
///
/// A rejected access token is unusable for the rest of the session, so the
/// credentials are cleared and the caller gets `Unauthenticated`. Any other
/// failure goes through `wrap`.
pub async fn gateway_failure(
    store: &dyn BaseTokenStore,
    error: GatewayError,
    wrap: impl FnOnce(GatewayError) -> WorkflowError,
) -> WorkflowError {
    if !error.is_unauthorized() {
        return wrap(error);
    }

    warn!(operation = %error.operation, error = %error, "Access token rejected, signing out");
    match store.clear().await {
        Ok(()) => WorkflowError::Unauthenticated,
        Err(e) => WorkflowError::TokenStore(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{valid_credentials, MemoryTokenStore};
    use crate::kernel::{GatewayCause, GatewayOperation};

    #[tokio::test]
    async fn rejected_token_clears_session() {
        let store = MemoryTokenStore::with_credentials(valid_credentials());
        let error = GatewayError::new(GatewayOperation::ListBlogs, GatewayCause::Unauthorized(401));

        let err = gateway_failure(&store, error, WorkflowError::Gateway).await;
        assert!(matches!(err, WorkflowError::Unauthenticated));
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn other_failures_keep_session() {
        let store = MemoryTokenStore::with_credentials(valid_credentials());
        let error = GatewayError::new(GatewayOperation::ListBlogs, GatewayCause::Timeout);

        let err = gateway_failure(&store, error, WorkflowError::Gateway).await;
        assert!(matches!(err, WorkflowError::Gateway(ref e) if e.cause == GatewayCause::Timeout));
        assert!(store.current().is_some());
    }
}
