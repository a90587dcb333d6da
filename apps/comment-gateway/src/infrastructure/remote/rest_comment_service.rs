use crate::domain::{
    blog::entity::Blog,
    comment::{
        entity::{CommentStatus, RemoteComment},
        errors::RemoteError,
        remote::CommentServiceRemote,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, StatusCode, Url, header::USER_AGENT};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Client for a WordPress.com style REST API (v1.1 comment endpoints).
pub struct RestCommentServiceRemote {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    user_agent: String,
    fetch_limit: u32,
}

impl RestCommentServiceRemote {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
        user_agent: String,
        fetch_limit: u32,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid remote API base URL {}: {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Remote API base URL {} cannot carry a path", base_url);
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            user_agent,
            fetch_limit: fetch_limit.max(1),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Validation("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(USER_AGENT, &self.user_agent);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn post_comment(&self, url: Url, body: Value) -> Result<RemoteComment, RemoteError> {
        tracing::debug!(url = %url, "POST comment");
        let response = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        let wire = check_status(response).await?.json::<WireComment>().await?;
        wire.into_remote()
    }
}

#[async_trait]
impl CommentServiceRemote for RestCommentServiceRemote {
    async fn get_comments_for_blog(&self, blog: &Blog) -> Result<Vec<RemoteComment>, RemoteError> {
        let mut url = self.endpoint(&["sites", blog.site_id.as_str(), "comments"])?;
        url.query_pairs_mut()
            .append_pair("status", "all")
            .append_pair("context", "edit")
            .append_pair("number", &self.fetch_limit.to_string());
        tracing::debug!(url = %url, site = %blog.site_id, "GET comments");
        let response = self.authorize(self.client.get(url)).send().await?;
        let list = check_status(response)
            .await?
            .json::<WireCommentList>()
            .await?;
        list.comments
            .into_iter()
            .map(WireComment::into_remote)
            .collect()
    }

    async fn create_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        comment.ensure_no_author_fields()?;
        let url = match comment.parent_id {
            Some(parent_id) => {
                let parent = parent_id.to_string();
                self.endpoint(&[
                    "sites",
                    blog.site_id.as_str(),
                    "comments",
                    &parent,
                    "replies",
                    "new",
                ])?
            }
            None if comment.post_id == 0 => {
                return Err(RemoteError::Validation(
                    "a new comment needs a post id or a parent comment".to_string(),
                ));
            }
            None => {
                let post = comment.post_id.to_string();
                self.endpoint(&[
                    "sites",
                    blog.site_id.as_str(),
                    "posts",
                    &post,
                    "replies",
                    "new",
                ])?
            }
        };
        self.post_comment(url, json!({ "content": comment.content }))
            .await
    }

    async fn update_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        let id = comment
            .comment_id
            .ok_or_else(|| RemoteError::missing_comment_id("update"))?
            .to_string();
        let url = self.endpoint(&["sites", blog.site_id.as_str(), "comments", &id])?;
        self.post_comment(url, json!({ "content": comment.content }))
            .await
    }

    async fn moderate_comment(
        &self,
        comment: &RemoteComment,
        blog: &Blog,
    ) -> Result<RemoteComment, RemoteError> {
        let id = comment
            .comment_id
            .ok_or_else(|| RemoteError::missing_comment_id("moderate"))?
            .to_string();
        let url = self.endpoint(&["sites", blog.site_id.as_str(), "comments", &id])?;
        // Only the status goes over the wire so the body is never rewritten.
        self.post_comment(url, json!({ "status": comment.status.as_str() }))
            .await
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            tracing::warn!(reqwest_timeout = %err);
            RemoteError::Transport("Request timeout".into())
        } else if err.is_connect() {
            tracing::warn!(reqwest_connect = %err);
            RemoteError::Transport("Connection failed".into())
        } else if err.is_decode() {
            tracing::warn!(reqwest_decode = %err);
            RemoteError::Decode(err.to_string())
        } else {
            tracing::error!(reqwest_error = %err);
            RemoteError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<WireError>().await.unwrap_or_default();
    let message = if body.message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.message
    };
    tracing::warn!(status = status.as_u16(), code = %body.error, "Remote rejected comment request");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized(message),
        StatusCode::NOT_FOUND => RemoteError::NotFound(message),
        StatusCode::BAD_REQUEST => RemoteError::Validation(message),
        _ => RemoteError::Api {
            status: status.as_u16(),
            code: body.error,
            message,
        },
    })
}

#[derive(Debug, Deserialize)]
struct WireCommentList {
    #[serde(default)]
    comments: Vec<WireComment>,
}

#[derive(Debug, Deserialize)]
struct WirePost {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireAuthor {
    #[serde(default)]
    name: Option<String>,
    // `false` when the caller may not see the address.
    #[serde(default)]
    email: Value,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "avatar_URL", default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireComment {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(default)]
    post: Option<WirePost>,
    #[serde(default)]
    author: Option<WireAuthor>,
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "type", default)]
    comment_type: Option<String>,
    // `false` for top level comments, `{"ID": ..}` for replies.
    #[serde(default)]
    parent: Value,
}

impl WireComment {
    fn into_remote(self) -> Result<RemoteComment, RemoteError> {
        let date = self
            .date
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|d| d.with_timezone(&Utc))
                    .map_err(|e| RemoteError::Decode(format!("comment {} date {}: {}", self.id, raw, e)))
            })
            .transpose()?;
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<CommentStatus>().unwrap_or_else(|e| {
                tracing::warn!(comment_id = self.id, error = %e, "Unknown comment status, treating as unapproved");
                CommentStatus::default()
            }),
            None => CommentStatus::default(),
        };
        let (post_id, post_title, post_link) = match self.post {
            Some(post) => (post.id, post.title, post.link),
            None => (0, None, None),
        };
        let author = self.author;

        Ok(RemoteComment {
            comment_id: Some(self.id),
            post_id,
            parent_id: self.parent.get("ID").and_then(Value::as_u64),
            author: author.as_ref().and_then(|a| a.name.clone()),
            author_email: author
                .as_ref()
                .and_then(|a| a.email.as_str())
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            author_url: author.as_ref().and_then(|a| a.url.clone()),
            author_avatar_url: author.and_then(|a| a.avatar_url),
            content: self.content,
            date,
            link: self.url.or(post_link),
            post_title,
            comment_type: self.comment_type,
            status,
        })
    }
}
