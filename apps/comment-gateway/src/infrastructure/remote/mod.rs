pub mod in_memory_comment_service;
pub mod rest_comment_service;
