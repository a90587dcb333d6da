use super::{
    handlers::{comments, health},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let comment_routes = Router::new()
        .route(
            "/api/v1/sites/{site}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/v1/sites/{site}/comments/bulk",
            post(comments::bulk_moderate),
        )
        .route(
            "/api/v1/sites/{site}/comments/{id}",
            put(comments::update_comment),
        )
        .route(
            "/api/v1/sites/{site}/comments/{id}/moderate",
            post(comments::moderate_comment),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(comment_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
