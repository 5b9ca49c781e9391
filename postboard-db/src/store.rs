//! Storage contracts shared by the PostgreSQL client and the in-memory store.

use async_trait::async_trait;
use postboard_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::{Post, PostContent, PostMarker},
};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Post with id {0} does not exist")]
    MissingPost(Id<PostMarker>),
    #[error("Running migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>>;

    /// All posts, ordered by id.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, post: &PostContent) -> Result<Post>;

    /// Overwrites both fields. `None` if the post does not exist.
    async fn update_post(&self, post_id: Id<PostMarker>, post: &PostContent)
    -> Result<Option<Post>>;

    /// Deletes the post together with all of its comments.
    /// Returns `false` if the post did not exist.
    async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<bool>;

    async fn post_exists(&self, post_id: Id<PostMarker>) -> Result<bool>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn fetch_comment(&self, comment_id: Id<CommentMarker>) -> Result<Option<Comment>>;

    /// Comments of one post, ordered by id.
    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>>;

    /// Fails with [`DbError::MissingPost`] if the parent post does not exist.
    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment>;
}
