use crate::{
    application::comments::dto::{
        BulkModerationRequest, BulkModerationResponse, CreateCommentRequest, ListCommentsQuery,
        ModerateCommentRequest, UpdateCommentRequest,
    },
    domain::{
        blog::entity::Blog,
        comment::entity::{CommentStatus, RemoteComment},
        shared::pagination::PaginatedResponse,
    },
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn blog_from_path(site: &str) -> Result<Blog, AppError> {
    Blog::from_site(site)
        .map_err(|_| AppError::BadRequest(format!("Invalid site identifier '{}'", site)))
}

fn parse_status(raw: &str) -> Result<CommentStatus, AppError> {
    raw.parse::<CommentStatus>().map_err(AppError::BadRequest)
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(site): Path<String>,
    Query(params): Query<CommentsQuery>,
) -> Result<Json<PaginatedResponse<RemoteComment>>, AppError> {
    let blog = blog_from_path(&site)?;
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(parse_status(s)?),
    };

    let page = state
        .comments
        .list_comments(
            &blog,
            ListCommentsQuery {
                status,
                limit: params.limit,
                offset: params.offset,
            },
        )
        .await?;
    Ok(Json(page))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(site): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<RemoteComment>), AppError> {
    let blog = blog_from_path(&site)?;
    let created = state.comments.create_comment(&blog, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path((site, id)): Path<(String, u64)>,
    Json(body): Json<UpdateCommentRequest>,
) -> Result<Json<RemoteComment>, AppError> {
    let blog = blog_from_path(&site)?;
    let updated = state
        .comments
        .update_comment_content(&blog, id, body)
        .await?;
    Ok(Json(updated))
}

pub async fn moderate_comment(
    State(state): State<AppState>,
    Path((site, id)): Path<(String, u64)>,
    Json(body): Json<ModerateCommentRequest>,
) -> Result<Json<RemoteComment>, AppError> {
    let blog = blog_from_path(&site)?;
    let status = parse_status(&body.status)?;
    let moderated = state.comments.moderate_comment(&blog, id, status).await?;
    Ok(Json(moderated))
}

pub async fn bulk_moderate(
    State(state): State<AppState>,
    Path(site): Path<String>,
    Json(body): Json<BulkModerationRequest>,
) -> Result<Json<BulkModerationResponse>, AppError> {
    let blog = blog_from_path(&site)?;
    let response = state.comments.bulk_moderate(&blog, body).await?;
    Ok(Json(response))
}
