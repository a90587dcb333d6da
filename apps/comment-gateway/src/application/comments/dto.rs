use crate::domain::comment::entity::{CommentStatus, RemoteComment};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// The author is the account behind the backend credentials, so requests
/// carrying author fields are refused at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    #[validate(range(min = 1))]
    pub post_id: u64,
    pub parent_id: Option<u64>,
    // Upper bound of the WordPress comment_content column.
    #[validate(length(min = 1, max = 65525))]
    pub content: String,
}

impl CreateCommentRequest {
    pub fn into_remote(self) -> RemoteComment {
        RemoteComment {
            post_id: self.post_id,
            parent_id: self.parent_id,
            content: self.content,
            ..RemoteComment::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 65525))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModerateCommentRequest {
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCommentsQuery {
    pub status: Option<CommentStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkModerationRequest {
    pub ids: Vec<u64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkModerationFailure {
    pub id: u64,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkModerationResponse {
    pub requested: usize,
    pub processed: usize,
    pub failed: usize,
    pub failed_items: Vec<BulkModerationFailure>,
}
