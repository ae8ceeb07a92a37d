use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::domains::auth::SessionTokenStore;
use crate::domains::posts::{self, PublishReport};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct PublishParams {
    #[serde(default)]
    pub announce: bool,
}

#[derive(Serialize)]
pub struct PublishResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub report: PublishReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub async fn publish_handler(
    Extension(state): Extension<AppState>,
    Path((blog_id, post_id)): Path<(String, String)>,
    Query(params): Query<PublishParams>,
    session: Session,
) -> ApiResult<Json<PublishResponse>> {
    let store = SessionTokenStore::new(session);
    let report =
        posts::publish_draft(&store, &state.deps, &blog_id, &post_id, params.announce).await?;

    Ok(Json(PublishResponse {
        message: "Post published successfully.",
        notice: report.notice(),
        report,
    }))
}

pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    Path((blog_id, post_id)): Path<(String, String)>,
    session: Session,
) -> ApiResult<Json<DeleteResponse>> {
    let store = SessionTokenStore::new(session);
    posts::delete_post(&store, &state.deps, &blog_id, &post_id).await?;
    Ok(Json(DeleteResponse { deleted: true }))
}
