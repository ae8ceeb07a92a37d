//! Sign-in routes: index, login, OAuth callback, logout.

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::domains::auth::{PendingLogin, SessionTokenStore};
use crate::kernel::BaseTokenStore;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Serialize)]
pub struct IndexResponse {
    authenticated: bool,
    login_url: &'static str,
}

/// Signed-in users go straight to their blogs.
pub async fn index_handler(session: Session) -> ApiResult<Response> {
    let store = SessionTokenStore::new(session);

    if store.get().await?.is_some() {
        return Ok(Redirect::to("/blogs").into_response());
    }

    Ok(Json(IndexResponse {
        authenticated: false,
        login_url: "/login",
    })
    .into_response())
}

/// Start the authorization-code flow.
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    session: Session,
) -> ApiResult<Redirect> {
    let request = state.deps.identity.authorization_request();

    SessionTokenStore::new(session)
        .begin_login(PendingLogin {
            csrf_state: request.csrf_state,
            pkce_verifier: request.pkce_verifier,
        })
        .await?;

    Ok(Redirect::to(&request.url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Finish the authorization-code flow and store the user's tokens.
pub async fn callback_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<CallbackParams>,
    session: Session,
) -> ApiResult<Redirect> {
    let store = SessionTokenStore::new(session);

    let Some(code) = params.code else {
        if let Some(error) = params.error {
            warn!(%error, "Consent was not granted");
        }
        return Ok(Redirect::to("/"));
    };

    let pending = store.take_pending_login().await?;
    let pending = match (pending, params.state) {
        (Some(pending), Some(returned)) if pending.csrf_state == returned => pending,
        _ => {
            warn!("OAuth callback with missing or mismatched state");
            return Err(ApiError::BadRequest("Invalid OAuth state"));
        }
    };

    let credentials = state
        .deps
        .identity
        .exchange_code(&code, &pending.pkce_verifier)
        .await
        .map_err(|e| {
            warn!(error = %e, "Token exchange failed");
            ApiError::AuthenticationFailed
        })?;

    store.set(credentials).await?;
    store.cycle_id().await?;
    info!("User signed in");

    Ok(Redirect::to("/blogs"))
}

/// Forget the session entirely.
pub async fn logout_handler(session: Session) -> ApiResult<Redirect> {
    SessionTokenStore::new(session).flush().await?;
    info!("User signed out");
    Ok(Redirect::to("/"))
}
