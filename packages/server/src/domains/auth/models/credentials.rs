use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Credentials are treated as expired this long before the provider's deadline.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth2 tokens for the signed-in user, stored in their session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// `None` when the provider did not report a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<std::time::Duration>,
    ) -> Self {
        let expires_at = expires_in
            .and_then(|d| Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Refresh responses usually omit the refresh token; keep the one we had.
    pub fn merge_refreshed(self, refreshed: Credentials) -> Credentials {
        Credentials {
            refresh_token: refreshed.refresh_token.or(self.refresh_token),
            ..refreshed
        }
    }
}

// Tokens never reach logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiring_at(expires_at: Option<DateTime<Utc>>) -> Credentials {
        Credentials {
            access_token: "access".into(),
            refresh_token: Some("refresh".into()),
            expires_at,
        }
    }

    #[test]
    fn fresh_credentials_are_valid() {
        let now = Utc::now();
        let creds = expiring_at(Some(now + Duration::hours(1)));
        assert!(!creds.is_expired_at(now));
    }

    #[test]
    fn credentials_inside_margin_are_expired() {
        let now = Utc::now();
        let creds = expiring_at(Some(now + Duration::seconds(EXPIRY_MARGIN_SECS - 1)));
        assert!(creds.is_expired_at(now));
    }

    #[test]
    fn credentials_without_lifetime_never_expire_locally() {
        let creds = expiring_at(None);
        assert!(!creds.is_expired_at(Utc::now() + Duration::days(365)));
    }

    #[test]
    fn new_computes_deadline_from_lifetime() {
        let creds = Credentials::new("a", None, Some(std::time::Duration::from_secs(3600)));
        let remaining = creds.expires_at.unwrap() - Utc::now();
        assert!(remaining > Duration::minutes(59));
        assert!(!creds.is_expired());
    }

    #[test]
    fn merge_keeps_previous_refresh_token() {
        let old = expiring_at(None);
        let refreshed = Credentials::new("new-access", None, None);

        let merged = old.merge_refreshed(refreshed);
        assert_eq!(merged.access_token, "new-access");
        assert_eq!(merged.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn debug_redacts_tokens() {
        let rendered = format!("{:?}", expiring_at(None));
        assert!(!rendered.contains("access\""));
        assert!(rendered.contains("<redacted>"));
    }
}
