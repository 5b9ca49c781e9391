use crate::service::{Result, ServiceError};
use postboard_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::PostMarker,
};
use postboard_db::store::{CommentStore, DbError, PostStore};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl CommentService {
    #[must_use]
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    async fn ensure_post_exists(&self, post_id: Id<PostMarker>) -> Result<()> {
        if self.posts.post_exists(post_id).await? {
            Ok(())
        } else {
            Err(ServiceError::PostNotFound(post_id))
        }
    }

    pub async fn post_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment> {
        comment.validate()?;
        self.ensure_post_exists(post_id).await?;

        // The post may still vanish between the check and the insert.
        let comment = self
            .comments
            .create_comment(post_id, comment)
            .await
            .map_err(|err| match err {
                DbError::MissingPost(post_id) => ServiceError::PostNotFound(post_id),
                err => ServiceError::Database(err),
            })?;
        debug!(comment_id = %comment.id, %post_id, "Created comment");

        Ok(comment)
    }

    pub async fn get_by_id(&self, comment_id: Id<CommentMarker>) -> Result<Comment> {
        self.comments
            .fetch_comment(comment_id)
            .await?
            .ok_or(ServiceError::CommentNotFound(comment_id))
    }

    pub async fn get_by_post_id(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        self.ensure_post_exists(post_id).await?;

        Ok(self.comments.fetch_post_comments(post_id).await?)
    }
}
