use super::dto::{
    BulkModerationFailure, BulkModerationRequest, BulkModerationResponse, CreateCommentRequest,
    ListCommentsQuery, UpdateCommentRequest,
};
use crate::domain::{
    blog::entity::Blog,
    comment::{
        entity::{CommentStatus, RemoteComment},
        errors::RemoteError,
        remote::CommentServiceRemote,
    },
    shared::pagination::{PaginatedResponse, PaginationRequest},
};
use futures_util::stream::{self, StreamExt};
use std::{collections::HashSet, sync::Arc};
use validator::Validate;

pub struct CommentsUseCase {
    remote: Arc<dyn CommentServiceRemote>,
    bulk_limit: usize,
    bulk_concurrency: usize,
}

impl CommentsUseCase {
    pub fn new(
        remote: Arc<dyn CommentServiceRemote>,
        bulk_limit: usize,
        bulk_concurrency: usize,
    ) -> Self {
        Self {
            remote,
            bulk_limit: bulk_limit.max(1),
            bulk_concurrency: bulk_concurrency.max(1),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.remote.backend_name()
    }

    /// Fetches every comment of the blog, then filters, orders (newest first)
    /// and pages locally.
    pub async fn list_comments(
        &self,
        blog: &Blog,
        query: ListCommentsQuery,
    ) -> Result<PaginatedResponse<RemoteComment>, RemoteError> {
        let mut comments = self.remote.get_comments_for_blog(blog).await?;
        if let Some(status) = query.status {
            comments.retain(|c| c.status == status);
        }
        comments.sort_by(|a, b| b.date.cmp(&a.date).then(b.comment_id.cmp(&a.comment_id)));

        let defaults = PaginationRequest::default();
        let page = PaginationRequest {
            limit: query.limit.unwrap_or(defaults.limit),
            offset: query.offset.unwrap_or(defaults.offset),
        };
        tracing::debug!(site = %blog.site_id, total = comments.len(), "Listed comments");
        Ok(PaginatedResponse::from_items(comments, &page))
    }

    pub async fn create_comment(
        &self,
        blog: &Blog,
        request: CreateCommentRequest,
    ) -> Result<RemoteComment, RemoteError> {
        request
            .validate()
            .map_err(|e| RemoteError::Validation(e.to_string()))?;
        let created = self
            .remote
            .create_comment(&request.into_remote(), blog)
            .await?;
        tracing::info!(site = %blog.site_id, comment_id = created.comment_id, "Comment created");
        Ok(created)
    }

    pub async fn update_comment_content(
        &self,
        blog: &Blog,
        comment_id: u64,
        request: UpdateCommentRequest,
    ) -> Result<RemoteComment, RemoteError> {
        request
            .validate()
            .map_err(|e| RemoteError::Validation(e.to_string()))?;
        let updated = self
            .remote
            .update_comment(&RemoteComment::content_update(comment_id, request.content), blog)
            .await?;
        tracing::info!(site = %blog.site_id, comment_id, "Comment content updated");
        Ok(updated)
    }

    pub async fn moderate_comment(
        &self,
        blog: &Blog,
        comment_id: u64,
        status: CommentStatus,
    ) -> Result<RemoteComment, RemoteError> {
        let moderated = self
            .remote
            .moderate_comment(&RemoteComment::status_change(comment_id, status), blog)
            .await?;
        tracing::info!(site = %blog.site_id, comment_id, status = %status, "Comment moderated");
        Ok(moderated)
    }

    /// Applies one status to many comments. Individual failures are reported,
    /// not propagated; results keep the order of the request.
    pub async fn bulk_moderate(
        &self,
        blog: &Blog,
        request: BulkModerationRequest,
    ) -> Result<BulkModerationResponse, RemoteError> {
        let status = request
            .status
            .parse::<CommentStatus>()
            .map_err(RemoteError::Validation)?;
        if request.ids.is_empty() {
            return Err(RemoteError::Validation("ids cannot be empty".to_string()));
        }
        if request.ids.len() > self.bulk_limit {
            return Err(RemoteError::Validation(format!(
                "bulk moderation is limited to {} comments",
                self.bulk_limit
            )));
        }

        let mut seen = HashSet::new();
        let ids: Vec<u64> = request
            .ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let results: Vec<(u64, Result<RemoteComment, RemoteError>)> = stream::iter(ids)
            .map(|id| async move {
                let result = self
                    .remote
                    .moderate_comment(&RemoteComment::status_change(id, status), blog)
                    .await;
                (id, result)
            })
            .buffered(self.bulk_concurrency)
            .collect()
            .await;

        let mut processed = 0usize;
        let mut failed_items = Vec::new();
        for (id, result) in results {
            match result {
                Ok(_) => processed += 1,
                Err(err) => {
                    tracing::warn!(site = %blog.site_id, comment_id = id, error = %err, "Bulk moderation item failed");
                    failed_items.push(BulkModerationFailure {
                        id,
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            site = %blog.site_id,
            status = %status,
            processed,
            failed = failed_items.len(),
            "Bulk moderation finished"
        );

        Ok(BulkModerationResponse {
            requested: request.ids.len(),
            processed,
            failed: failed_items.len(),
            failed_items,
        })
    }
}
