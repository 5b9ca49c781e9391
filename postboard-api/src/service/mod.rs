use postboard_common::model::{Id, comment::CommentMarker, post::PostMarker};
use postboard_db::store::DbError;
use thiserror::Error;
use validator::ValidationErrors;

mod comments;
mod posts;

pub use comments::CommentService;
pub use posts::PostService;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("Comment with id {0} was not found.")]
    CommentNotFound(Id<CommentMarker>),
    #[error("Input failed validation: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Database(#[from] DbError),
}
