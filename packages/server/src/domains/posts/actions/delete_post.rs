use tracing::{error, info};

use crate::common::{WorkflowError, WorkflowResult};
use crate::domains::auth::{gateway_failure, require_credentials};
use crate::kernel::{BaseTokenStore, ServerDeps};

/// Delete a post. A missing post is reported, not ignored.
pub async fn delete_post(
    store: &dyn BaseTokenStore,
    deps: &ServerDeps,
    blog_id: &str,
    post_id: &str,
) -> WorkflowResult<()> {
    let credentials = require_credentials(store, deps.identity.as_ref()).await?;

    if let Err(e) = deps.blogs.delete(&credentials, blog_id, post_id).await {
        error!(blog_id, post_id, error = %e, "Failed to delete post");
        return Err(gateway_failure(store, e, WorkflowError::Gateway).await);
    }

    info!(blog_id, post_id, "Post deleted");
    Ok(())
}
