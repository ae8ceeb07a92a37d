use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::domains::auth::models::Credentials;
use crate::kernel::BaseTokenStore;

pub const CREDENTIALS_KEY: &str = "credentials";
pub const PENDING_LOGIN_KEY: &str = "pending_login";

/// CSRF state and PKCE verifier kept between `/login` and `/callback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub csrf_state: String,
    pub pkce_verifier: String,
}

/// Token store backed by the caller's HTTP session.
#[derive(Clone)]
pub struct SessionTokenStore {
    session: Session,
}

impl SessionTokenStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub async fn begin_login(&self, pending: PendingLogin) -> Result<()> {
        self.session.insert(PENDING_LOGIN_KEY, pending).await?;
        Ok(())
    }

    /// Remove and return the pending login; a callback can use it once.
    pub async fn take_pending_login(&self) -> Result<Option<PendingLogin>> {
        Ok(self.session.remove::<PendingLogin>(PENDING_LOGIN_KEY).await?)
    }

    /// New session id after sign-in, against fixation.
    pub async fn cycle_id(&self) -> Result<()> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Drop the whole session (logout).
    pub async fn flush(&self) -> Result<()> {
        self.session.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl BaseTokenStore for SessionTokenStore {
    async fn get(&self) -> Result<Option<Credentials>> {
        Ok(self.session.get::<Credentials>(CREDENTIALS_KEY).await?)
    }

    async fn set(&self, credentials: Credentials) -> Result<()> {
        self.session.insert(CREDENTIALS_KEY, credentials).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.session.remove::<Credentials>(CREDENTIALS_KEY).await?;
        Ok(())
    }
}
