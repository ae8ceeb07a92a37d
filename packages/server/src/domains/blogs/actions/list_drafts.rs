use tracing::{error, info};

use crate::common::{WorkflowError, WorkflowResult};
use crate::domains::auth::{gateway_failure, require_credentials};
use crate::domains::blogs::models::DraftSummary;
use crate::kernel::{BaseTokenStore, ServerDeps};

/// Draft posts of one blog, newest page only.
pub async fn list_drafts(
    store: &dyn BaseTokenStore,
    deps: &ServerDeps,
    blog_id: &str,
) -> WorkflowResult<Vec<DraftSummary>> {
    let credentials = require_credentials(store, deps.identity.as_ref()).await?;

    let drafts = match deps
        .blogs
        .list_drafts(&credentials, blog_id, deps.drafts_page_size)
        .await
    {
        Ok(drafts) => drafts,
        Err(e) => {
            error!(blog_id, error = %e, "Failed to list drafts");
            return Err(gateway_failure(store, e, WorkflowError::Gateway).await);
        }
    };

    info!(blog_id, count = drafts.len(), "Listed drafts");
    Ok(drafts.iter().map(|d| d.summary()).collect())
}
