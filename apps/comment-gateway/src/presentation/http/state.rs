use crate::application::comments::use_case::CommentsUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub comments: Arc<CommentsUseCase>,
}
