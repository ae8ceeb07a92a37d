use tracing::{error, info};

use crate::common::{WorkflowError, WorkflowResult};
use crate::domains::auth::{gateway_failure, require_credentials};
use crate::domains::blogs::models::Blog;
use crate::kernel::{BaseTokenStore, ServerDeps};

/// Blogs owned by the signed-in user.
pub async fn list_blogs(store: &dyn BaseTokenStore, deps: &ServerDeps) -> WorkflowResult<Vec<Blog>> {
    let credentials = require_credentials(store, deps.identity.as_ref()).await?;

    let blogs = match deps.blogs.list_blogs(&credentials).await {
        Ok(blogs) => blogs,
        Err(e) => {
            error!(error = %e, "Failed to list blogs");
            return Err(gateway_failure(store, e, WorkflowError::Gateway).await);
        }
    };

    info!(count = blogs.len(), "Listed blogs");
    Ok(blogs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{valid_credentials, MemoryTokenStore, MockBlogGateway};
    use crate::kernel::{GatewayCause, GatewayOperation, TestDependencies};

    #[tokio::test]
    async fn returns_owned_blogs() {
        let test = TestDependencies::new(
            MockBlogGateway::new()
                .with_blog("b1", "First")
                .with_blog("b2", "Second"),
        );
        let store = MemoryTokenStore::with_credentials(valid_credentials());

        let blogs = list_blogs(&store, &test.server_deps()).await.unwrap();
        let names: Vec<_> = blogs.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn no_blogs_is_an_empty_list() {
        let test = TestDependencies::new(MockBlogGateway::new());
        let store = MemoryTokenStore::with_credentials(valid_credentials());

        assert!(list_blogs(&store, &test.server_deps()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_is_reported() {
        let test = TestDependencies::new(
            MockBlogGateway::new().failing(GatewayOperation::ListBlogs, GatewayCause::Timeout),
        );
        let store = MemoryTokenStore::with_credentials(valid_credentials());

        let err = list_blogs(&store, &test.server_deps()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Gateway(ref e) if e.cause == GatewayCause::Timeout));
        assert!(store.current().is_some());
    }

    #[tokio::test]
    async fn rejected_token_signs_out() {
        let test = TestDependencies::new(
            MockBlogGateway::new()
                .with_blog("b1", "First")
                .failing(GatewayOperation::ListBlogs, GatewayCause::Unauthorized(401)),
        );
        let store = MemoryTokenStore::with_credentials(valid_credentials());

        let err = list_blogs(&store, &test.server_deps()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthenticated));
        assert!(store.current().is_none());
    }
}
