use axum::{
    extract::{Extension, Path},
    Json,
};
use tower_sessions::Session;

use crate::domains::auth::SessionTokenStore;
use crate::domains::blogs::{self, Blog, DraftSummary};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

pub async fn blogs_handler(
    Extension(state): Extension<AppState>,
    session: Session,
) -> ApiResult<Json<Vec<Blog>>> {
    let store = SessionTokenStore::new(session);
    let blogs = blogs::list_blogs(&store, &state.deps).await?;
    Ok(Json(blogs))
}

pub async fn drafts_handler(
    Extension(state): Extension<AppState>,
    Path(blog_id): Path<String>,
    session: Session,
) -> ApiResult<Json<Vec<DraftSummary>>> {
    let store = SessionTokenStore::new(session);
    let drafts = blogs::list_drafts(&store, &state.deps, &blog_id).await?;
    Ok(Json(drafts))
}
