use super::helpers::{SITE, expect_status, get_request, json_request, read_json, send, spawn_app};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn health_reports_backend() {
    let app = spawn_app().await;
    let res = expect_status(send(&app.app, get_request("/health")).await, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn list_comments_newest_first_with_status_filter() {
    let app = spawn_app().await;

    let res = send(
        &app.app,
        get_request(&format!("/api/v1/sites/{}/comments", SITE)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"][0]["comment_id"], 3);

    let res = send(
        &app.app,
        get_request(&format!(
            "/api/v1/sites/{}/comments?status=approved&limit=10",
            SITE
        )),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["content"], "Great read");
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn create_update_and_moderate_keep_identity_and_content() {
    let app = spawn_app().await;
    let base = format!("/api/v1/sites/{}/comments", SITE);

    let res = send(
        &app.app,
        json_request(
            "POST",
            &base,
            json!({ "post_id": 7, "parent_id": 1, "content": "Agreed" }),
        ),
    )
    .await;
    let created: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let id = created["comment_id"].as_u64().expect("missing comment id");
    assert_eq!(created["parent_id"], 1);
    assert_eq!(created["status"], "unapproved");
    assert!(created["author"].is_null());

    let res = send(
        &app.app,
        json_request(
            "PUT",
            &format!("{}/{}", base, id),
            json!({ "content": "Agreed, thanks" }),
        ),
    )
    .await;
    let updated: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(updated["comment_id"], id);
    assert_eq!(updated["content"], "Agreed, thanks");
    assert_eq!(updated["post_id"], 7);

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("{}/{}/moderate", base, id),
            json!({ "status": "approve" }),
        ),
    )
    .await;
    let moderated: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(moderated["comment_id"], id);
    assert_eq!(moderated["status"], "approved");
    assert_eq!(moderated["content"], "Agreed, thanks");
}

#[tokio::test]
async fn bulk_moderation_reports_missing_comments() {
    let app = spawn_app().await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/sites/{}/comments/bulk", SITE),
            json!({ "ids": [2, 3, 404], "status": "trash" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["requested"], 3);
    assert_eq!(body["processed"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["failed_items"][0]["id"], 404);

    let res = send(
        &app.app,
        get_request(&format!("/api/v1/sites/{}/comments?status=trash", SITE)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn bulk_moderation_over_limit_is_rejected() {
    let app = spawn_app().await;
    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/sites/{}/comments/bulk", SITE),
            json!({ "ids": [1, 2, 3, 4, 5, 6], "status": "spam" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = spawn_app().await;

    let res = send(&app.app, get_request("/api/v1/sites/not_a_site/comments")).await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid site"));

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/sites/{}/comments", SITE),
            json!({ "post_id": 7, "content": "" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/sites/{}/comments/1/moderate", SITE),
            json!({ "status": "burn" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn unknown_comment_is_not_found() {
    let app = spawn_app().await;
    let res = send(
        &app.app,
        json_request(
            "PUT",
            &format!("/api/v1/sites/{}/comments/999", SITE),
            json!({ "content": "edited" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::NOT_FOUND).await).await;
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn create_with_author_fields_is_refused() {
    let app = spawn_app().await;
    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/sites/{}/comments", SITE),
            json!({ "post_id": 7, "content": "Hi", "author": "Sam", "author_email": "sam@example.com" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::UNPROCESSABLE_ENTITY).await;

    let res = send(
        &app.app,
        get_request(&format!("/api/v1/sites/{}/comments", SITE)),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["total"], 3);
}
