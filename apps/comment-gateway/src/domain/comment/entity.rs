use super::errors::RemoteError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Approved,
    #[default]
    Unapproved,
    Spam,
    Trash,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Unapproved => "unapproved",
            Self::Spam => "spam",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = String;

    /// Accepts the REST spellings plus the older `approve`/`hold` forms
    /// still sent by mobile clients.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "unapproved" | "hold" | "pending" => Ok(Self::Unapproved),
            "spam" => Ok(Self::Spam),
            "trash" => Ok(Self::Trash),
            other => Err(format!(
                "unknown comment status '{}', expected one of approved, unapproved, spam, trash",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RemoteComment {
    /// Assigned by the server; `None` until the comment has been created.
    pub comment_id: Option<u64>,
    pub post_id: u64,
    pub parent_id: Option<u64>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub author_url: Option<String>,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub date: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub post_title: Option<String>,
    pub comment_type: Option<String>,
    pub status: CommentStatus,
}

impl RemoteComment {
    pub fn new(post_id: u64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
            ..Self::default()
        }
    }

    /// A comment carrying only its identity and new body, as sent on
    /// content updates.
    pub fn content_update(comment_id: u64, content: impl Into<String>) -> Self {
        Self {
            comment_id: Some(comment_id),
            content: content.into(),
            ..Self::default()
        }
    }

    /// A comment carrying only its identity and the target status.
    pub fn status_change(comment_id: u64, status: CommentStatus) -> Self {
        Self {
            comment_id: Some(comment_id),
            status,
            ..Self::default()
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Authorship is assigned by the backend from the authenticated account.
    pub fn ensure_no_author_fields(&self) -> Result<(), RemoteError> {
        if self.author.is_some()
            || self.author_email.is_some()
            || self.author_url.is_some()
            || self.author_avatar_url.is_some()
        {
            return Err(RemoteError::Validation(
                "author fields are set by the backend and cannot be supplied".to_string(),
            ));
        }
        Ok(())
    }
}
