use super::{entity::RemoteComment, errors::RemoteError};
use crate::domain::blog::entity::Blog;
use async_trait::async_trait;

/// Capability set every comment backend client provides.
///
/// Each call is an independent request and completes exactly once, either
/// with the server's view of the comment(s) or with a [`RemoteError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentServiceRemote: Send + Sync {
    /// Fetch the comments of a blog.
    async fn get_comments_for_blog(&self, blog: &Blog) -> Result<Vec<RemoteComment>, RemoteError>;

    /// Publish a new comment. The returned comment carries the assigned id.
    async fn create_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError>;

    /// Update the content of an existing comment.
    async fn update_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError>;

    /// Update the status of an existing comment.
    async fn moderate_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError>;

    /// Short name used in logs and health output.
    fn backend_name(&self) -> &'static str;
}
