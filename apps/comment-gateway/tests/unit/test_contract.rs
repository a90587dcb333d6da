//! Behaviour every `CommentServiceRemote` implementation must show, checked
//! against the in-memory backend and a hand-rolled mockall double.

use async_trait::async_trait;
use comment_gateway::{
    application::comments::use_case::CommentsUseCase,
    domain::{
        blog::entity::Blog,
        comment::{
            entity::{CommentStatus, RemoteComment},
            errors::RemoteError,
            remote::CommentServiceRemote,
        },
    },
    infrastructure::remote::in_memory_comment_service::InMemoryCommentServiceRemote,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Remote {}

    #[async_trait]
    impl CommentServiceRemote for Remote {
        async fn get_comments_for_blog(&self, blog: &Blog) -> Result<Vec<RemoteComment>, RemoteError>;
        async fn create_comment(&self, comment: &RemoteComment, blog: &Blog) -> Result<RemoteComment, RemoteError>;
        async fn update_comment(&self, comment: &RemoteComment, blog: &Blog) -> Result<RemoteComment, RemoteError>;
        async fn moderate_comment(&self, comment: &RemoteComment, blog: &Blog) -> Result<RemoteComment, RemoteError>;
        fn backend_name(&self) -> &'static str;
    }
}

fn blog() -> Blog {
    Blog::from_site("contract.example.com").unwrap()
}

#[tokio::test]
async fn create_then_update_keeps_identity() {
    let remote = InMemoryCommentServiceRemote::new();
    let created = remote
        .create_comment(&RemoteComment::new(11, "draft"), &blog())
        .await
        .unwrap();
    assert!(created.comment_id.is_some());

    let mut edited = created.clone();
    edited.content = "final".to_string();
    let updated = remote.update_comment(&edited, &blog()).await.unwrap();

    assert_eq!(updated.comment_id, created.comment_id);
    assert_eq!(updated.post_id, created.post_id);
    assert_eq!(updated.content, "final");
}

#[tokio::test]
async fn moderation_never_changes_content() {
    let remote = InMemoryCommentServiceRemote::new();
    let created = remote
        .create_comment(&RemoteComment::new(11, "keep me"), &blog())
        .await
        .unwrap();

    // Even a payload carrying a different body only changes the status.
    let mut request = created.clone();
    request.content = "rewritten".to_string();
    request.status = CommentStatus::Spam;
    let moderated = remote.moderate_comment(&request, &blog()).await.unwrap();

    assert_eq!(moderated.status, CommentStatus::Spam);
    assert_eq!(moderated.content, "keep me");
}

#[tokio::test]
async fn update_and_moderate_require_an_id() {
    let remote = InMemoryCommentServiceRemote::new();
    let orphan = RemoteComment::new(11, "no id");
    assert!(matches!(
        remote.update_comment(&orphan, &blog()).await,
        Err(RemoteError::Validation(_))
    ));
    assert!(matches!(
        remote.moderate_comment(&orphan, &blog()).await,
        Err(RemoteError::Validation(_))
    ));
}

#[tokio::test]
async fn mock_substitutes_for_a_real_backend() {
    let mut mock = MockRemote::new();
    mock.expect_backend_name().return_const("mock");
    mock.expect_create_comment()
        .times(1)
        .returning(|comment, _| {
            let mut created = comment.clone();
            created.comment_id = Some(1);
            Ok(created)
        });
    mock.expect_get_comments_for_blog()
        .times(1)
        .returning(|_| Err(RemoteError::Unauthorized("token expired".to_string())));

    let use_case = CommentsUseCase::new(Arc::new(mock), 10, 1);
    assert_eq!(use_case.backend_name(), "mock");

    let created = use_case
        .create_comment(
            &blog(),
            serde_json::from_value(serde_json::json!({ "post_id": 3, "content": "hi" })).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.comment_id, Some(1));

    let err = use_case
        .list_comments(&blog(), Default::default())
        .await
        .unwrap_err();
    assert_eq!(err, RemoteError::Unauthorized("token expired".to_string()));
}
