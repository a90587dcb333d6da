use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use comment_gateway::{
    application::comments::use_case::CommentsUseCase,
    config::{CommentsBackend, Config},
    domain::{
        blog::value_objects::SiteId,
        comment::entity::{CommentStatus, RemoteComment},
    },
    infrastructure::remote::in_memory_comment_service::InMemoryCommentServiceRemote,
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SITE: &str = "example.wordpress.com";

pub struct TestApp {
    pub app: Router,
}

fn build_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend: CommentsBackend::Memory,
        remote_api_base_url: "http://127.0.0.1:9/rest/v1.1".to_string(),
        remote_api_token: None,
        remote_timeout_seconds: 5,
        remote_user_agent: "comment-gateway-tests".to_string(),
        comments_fetch_limit: 100,
        bulk_moderation_limit: 5,
        bulk_moderation_concurrency: 2,
    }
}

fn seeded_comment(id: u64, status: CommentStatus, day: u32, content: &str) -> RemoteComment {
    RemoteComment {
        comment_id: Some(id),
        post_id: 7,
        author: Some("Reader".to_string()),
        content: content.to_string(),
        date: Some(Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()),
        comment_type: Some("comment".to_string()),
        status,
        ..RemoteComment::default()
    }
}

/// Gateway backed by the in-memory remote, seeded with three comments on
/// [`SITE`]: 1 approved, 2 unapproved, 3 spam (3 is the newest).
pub async fn spawn_app() -> TestApp {
    let site = SiteId::new(SITE.to_string()).expect("valid test site");
    let remote = InMemoryCommentServiceRemote::new().with_comments(
        site,
        vec![
            seeded_comment(1, CommentStatus::Approved, 1, "Great read"),
            seeded_comment(2, CommentStatus::Unapproved, 2, "First!"),
            seeded_comment(3, CommentStatus::Spam, 3, "buy now"),
        ],
    );
    let config = build_config();
    let state = AppState {
        comments: Arc::new(CommentsUseCase::new(
            Arc::new(remote),
            config.bulk_moderation_limit,
            config.bulk_moderation_concurrency,
        )),
    };
    TestApp {
        app: create_router(state),
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}
