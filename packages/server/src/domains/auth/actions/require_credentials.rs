//! Require credentials action

use tracing::{debug, info, warn};

use crate::common::{WorkflowError, WorkflowResult};
use crate::domains::auth::models::Credentials;
use crate::kernel::{BaseIdentityProvider, BaseTokenStore};

/// Return usable credentials for the current session.
///
/// Expired credentials are refreshed and written back. When there is nothing
/// to refresh with, or the provider rejects the refresh, the session is
/// cleared and the caller must sign in again.
pub async fn require_credentials(
    store: &dyn BaseTokenStore,
    identity: &dyn BaseIdentityProvider,
) -> WorkflowResult<Credentials> {
    let Some(credentials) = store.get().await? else {
        debug!("No credentials in session");
        return Err(WorkflowError::Unauthenticated);
    };

    if !credentials.is_expired() {
        return Ok(credentials);
    }

    let Some(refresh_token) = credentials.refresh_token.clone() else {
        debug!("Credentials expired without refresh token");
        store.clear().await?;
        return Err(WorkflowError::Unauthenticated);
    };

    match identity.refresh(&refresh_token).await {
        Ok(refreshed) => {
            let refreshed = credentials.merge_refreshed(refreshed);
            store.set(refreshed.clone()).await?;
            info!(expires_at = ?refreshed.expires_at, "Refreshed access token");
            Ok(refreshed)
        }
        Err(e) => {
            warn!(error = %e, "Token refresh failed, signing out");
            store.clear().await?;
            Err(WorkflowError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{
        expired_credentials, valid_credentials, MemoryTokenStore, MockIdentityProvider,
    };

    #[tokio::test]
    async fn absent_credentials_are_unauthenticated() {
        let store = MemoryTokenStore::new();
        let identity = MockIdentityProvider::new();

        let result = require_credentials(&store, &identity).await;
        assert!(matches!(result, Err(WorkflowError::Unauthenticated)));
        assert!(identity.refreshes().is_empty());
    }

    #[tokio::test]
    async fn valid_credentials_pass_through() {
        let store = MemoryTokenStore::with_credentials(valid_credentials());
        let identity = MockIdentityProvider::new();

        let creds = require_credentials(&store, &identity).await.unwrap();
        assert_eq!(creds.access_token, "valid-access");
        assert!(identity.refreshes().is_empty());
    }

    #[tokio::test]
    async fn expired_credentials_are_refreshed_and_stored() {
        let store = MemoryTokenStore::with_credentials(expired_credentials(Some("refresh-1")));
        let identity = MockIdentityProvider::new();

        let creds = require_credentials(&store, &identity).await.unwrap();
        assert_eq!(creds.access_token, "refreshed-access");
        assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(identity.refreshes(), vec!["refresh-1".to_string()]);
        assert_eq!(store.current(), Some(creds));
    }

    #[tokio::test]
    async fn expired_without_refresh_token_clears_session() {
        let store = MemoryTokenStore::with_credentials(expired_credentials(None));
        let identity = MockIdentityProvider::new();

        let result = require_credentials(&store, &identity).await;
        assert!(matches!(result, Err(WorkflowError::Unauthenticated)));
        assert!(store.current().is_none());
        assert!(identity.refreshes().is_empty());
    }

    #[tokio::test]
    async fn rejected_refresh_clears_session() {
        let store = MemoryTokenStore::with_credentials(expired_credentials(Some("revoked")));
        let identity = MockIdentityProvider::new().rejecting_refresh();

        let result = require_credentials(&store, &identity).await;
        assert!(matches!(result, Err(WorkflowError::Unauthenticated)));
        assert!(store.current().is_none());
    }
}
