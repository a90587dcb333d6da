use crate::domain::{
    blog::{entity::Blog, value_objects::SiteId},
    comment::{entity::RemoteComment, errors::RemoteError, remote::CommentServiceRemote},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;

/// Process-local comment backend. Used for offline runs and tests.
pub struct InMemoryCommentServiceRemote {
    sites: RwLock<HashMap<SiteId, Vec<RemoteComment>>>,
    next_id: AtomicU64,
}

impl Default for InMemoryCommentServiceRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCommentServiceRemote {
    pub fn new() -> Self {
        Self {
            sites: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seeds a site with existing comments. Ids already present are kept and
    /// the id counter moves past the largest one.
    pub fn with_comments(self, site_id: SiteId, comments: Vec<RemoteComment>) -> Self {
        let mut sites = self.sites.into_inner();
        let mut next_id = self.next_id.into_inner();
        let stored = sites.entry(site_id).or_default();
        for mut comment in comments {
            let id = match comment.comment_id {
                Some(id) => id,
                None => {
                    let id = next_id;
                    comment.comment_id = Some(id);
                    id
                }
            };
            next_id = next_id.max(id.saturating_add(1));
            stored.push(comment);
        }
        Self {
            sites: RwLock::new(sites),
            next_id: AtomicU64::new(next_id),
        }
    }

    async fn modify<F>(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
        operation: &str,
        apply: F,
    ) -> Result<RemoteComment, RemoteError>
    where
        F: FnOnce(&mut RemoteComment) + Send,
    {
        let id = comment
            .comment_id
            .ok_or_else(|| RemoteError::missing_comment_id(operation))?;
        let mut sites = self.sites.write().await;
        let stored = sites
            .get_mut(&blog.site_id)
            .and_then(|comments| comments.iter_mut().find(|c| c.comment_id == Some(id)))
            .ok_or_else(|| {
                RemoteError::NotFound(format!("comment {} on site {}", id, blog.site_id))
            })?;
        apply(stored);
        Ok(stored.clone())
    }
}

#[async_trait]
impl CommentServiceRemote for InMemoryCommentServiceRemote {
    async fn get_comments_for_blog(&self, blog: &Blog) -> Result<Vec<RemoteComment>, RemoteError> {
        let sites = self.sites.read().await;
        let mut comments = sites.get(&blog.site_id).cloned().unwrap_or_default();
        comments.sort_by(|a, b| b.date.cmp(&a.date).then(b.comment_id.cmp(&a.comment_id)));
        Ok(comments)
    }

    async fn create_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        comment.ensure_no_author_fields()?;
        if comment.post_id == 0 && comment.parent_id.is_none() {
            return Err(RemoteError::Validation(
                "a new comment needs a post id or a parent comment".to_string(),
            ));
        }

        let mut sites = self.sites.write().await;
        let stored = sites.entry(blog.site_id.clone()).or_default();

        let mut created = comment.clone();
        if let Some(parent_id) = comment.parent_id {
            let parent = stored
                .iter()
                .find(|c| c.comment_id == Some(parent_id))
                .ok_or_else(|| {
                    RemoteError::NotFound(format!(
                        "parent comment {} on site {}",
                        parent_id, blog.site_id
                    ))
                })?;
            created.post_id = parent.post_id;
        }
        created.comment_id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        created.date = created.date.or_else(|| Some(Utc::now()));
        created.comment_type = created.comment_type.or_else(|| Some("comment".to_string()));

        tracing::debug!(
            site = %blog.site_id,
            comment_id = created.comment_id,
            "Stored in-memory comment"
        );
        stored.push(created.clone());
        Ok(created)
    }

    async fn update_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        let content = comment.content.clone();
        self.modify(comment, blog, "update", move |stored| {
            stored.content = content;
        })
        .await
    }

    async fn moderate_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        let status = comment.status;
        self.modify(comment, blog, "moderate", move |stored| {
            stored.status = status;
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
