//! # Google OAuth 2.0 identity provider
//!
//! Authorization Code flow with PKCE against Google's endpoints, requesting
//! offline access to the Blogger API.
//!
//! ## Flow
//!
//! 1. **[`authorization_request`](GoogleOAuth::authorization_request)** builds the
//!    consent URL with a random CSRF state and PKCE challenge. The caller keeps the
//!    state and verifier in the user's session until the callback.
//! 2. **[`exchange_code`](GoogleOAuth::exchange_code)** trades the callback code plus
//!    verifier for access and refresh tokens.
//! 3. **[`refresh`](GoogleOAuth::refresh)** obtains a new access token once the old
//!    one has expired.

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, RefreshToken, RequestTokenError, Scope,
    TokenResponse, TokenUrl,
};
use std::time::Duration;

use crate::config::GoogleConfig;
use crate::domains::auth::models::Credentials;
use crate::kernel::{AuthorizationRequest, BaseIdentityProvider, IdentityError};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Full read/write access to the user's blogs.
pub const BLOGGER_SCOPE: &str = "https://www.googleapis.com/auth/blogger";

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handler.
pub struct GoogleOAuth {
    client: ConfiguredClient,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(config: GoogleConfig, timeout: Duration) -> Result<Self, IdentityError> {
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string())
            .map_err(|e| IdentityError::Config(e.to_string()))?;
        let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
            .map_err(|e| IdentityError::Config(e.to_string()))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| IdentityError::Config(format!("invalid redirect uri: {e}")))?;

        let client = BasicClient::new(ClientId::new(config.client_id))
            .set_client_secret(ClientSecret::new(config.client_secret))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);

        // Token endpoints must not be followed through redirects
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Config(e.to_string()))?;

        Ok(Self { client, http })
    }
}

fn credentials_from(token: &oauth2::basic::BasicTokenResponse) -> Credentials {
    Credentials::new(
        token.access_token().secret().clone(),
        token.refresh_token().map(|t| t.secret().clone()),
        token.expires_in(),
    )
}

fn identity_error<RE, T>(err: RequestTokenError<RE, T>) -> IdentityError
where
    RE: std::error::Error + 'static,
    T: oauth2::ErrorResponse + 'static,
{
    match err {
        RequestTokenError::ServerResponse(response) => IdentityError::Rejected(response.to_string()),
        other => IdentityError::Transport(other.to_string()),
    }
}

#[async_trait]
impl BaseIdentityProvider for GoogleOAuth {
    fn authorization_request(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(BLOGGER_SCOPE.to_string()))
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent")
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
    ) -> Result<Credentials, IdentityError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(identity_error)?;

        Ok(credentials_from(&token))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, IdentityError> {
        let token = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&self.http)
            .await
            .map_err(identity_error)?;

        Ok(credentials_from(&token))
    }
}
