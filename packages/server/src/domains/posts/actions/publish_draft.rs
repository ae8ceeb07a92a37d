//! Publish draft action
//!
//! Runs the publish pipeline for one post. Each remote step returns a typed
//! `Result`, so a failure short-circuits with the stage it happened in and
//! nothing after it runs. In particular the announcer is never called unless
//! the post is live.

use tracing::{debug, error, info, instrument};

use crate::common::{WorkflowError, WorkflowResult};
use crate::domains::announcements::announce;
use crate::domains::announcements::models::Announcement;
use crate::domains::auth::{gateway_failure, require_credentials};
use crate::domains::posts::models::{PublishReport, PublishStage};
use crate::kernel::{BaseTokenStore, GatewayError, ServerDeps};

fn abort(stage: PublishStage, source: GatewayError) -> WorkflowError {
    error!(stage = %stage, error = %source, "Publish aborted");
    WorkflowError::Aborted { stage, source }
}

/// Publish a draft and, when asked, announce it.
#[instrument(skip(store, deps), fields(stage = tracing::field::Empty))]
pub async fn publish_draft(
    store: &dyn BaseTokenStore,
    deps: &ServerDeps,
    blog_id: &str,
    post_id: &str,
    announce_post: bool,
) -> WorkflowResult<PublishReport> {
    let span = tracing::Span::current();
    let mut stage = PublishStage::Idle;
    span.record("stage", stage.as_str());

    let credentials = require_credentials(store, deps.identity.as_ref()).await?;

    stage = PublishStage::FetchingDraft;
    span.record("stage", stage.as_str());
    let draft = match deps.blogs.get_post(&credentials, blog_id, post_id).await {
        Ok(draft) => draft,
        Err(e) => return Err(gateway_failure(store, e, |e| abort(stage, e)).await),
    };
    debug!(title = %draft.title, "Fetched draft");

    stage = PublishStage::Publishing;
    span.record("stage", stage.as_str());
    let published = match deps.blogs.publish(&credentials, blog_id, post_id).await {
        Ok(published) => published.or_draft(&draft),
        Err(e) => return Err(gateway_failure(store, e, |e| abort(stage, e)).await),
    };
    info!(post_url = %published.post_url, "Post published");

    if !announce_post {
        span.record("stage", PublishStage::Done.as_str());
        return Ok(PublishReport {
            published,
            announcement: None,
        });
    }

    stage = PublishStage::ComposingAnnouncement;
    span.record("stage", stage.as_str());
    let announcement = Announcement::compose(&published);

    stage = PublishStage::Announcing;
    span.record("stage", stage.as_str());
    let outcome = announce(deps.announcer.as_deref(), &announcement).await;
    info!(outcome = outcome.as_str(), "Announcement finished");

    span.record("stage", PublishStage::Done.as_str());
    Ok(PublishReport {
        published,
        announcement: Some(outcome),
    })
}
