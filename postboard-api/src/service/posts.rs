use crate::service::{Result, ServiceError};
use postboard_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
};
use postboard_db::store::PostStore;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    #[must_use]
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, post: &PostContent) -> Result<Post> {
        post.validate()?;

        let post = self.posts.create_post(post).await?;
        debug!(post_id = %post.id, "Created post");

        Ok(post)
    }

    pub async fn get_all(&self) -> Result<Vec<Post>> {
        Ok(self.posts.fetch_posts().await?)
    }

    pub async fn get_by_id(&self, post_id: Id<PostMarker>) -> Result<Post> {
        self.posts
            .fetch_post(post_id)
            .await?
            .ok_or(ServiceError::PostNotFound(post_id))
    }

    pub async fn update(&self, post_id: Id<PostMarker>, post: &PostContent) -> Result<Post> {
        post.validate()?;

        let post = self
            .posts
            .update_post(post_id, post)
            .await?
            .ok_or(ServiceError::PostNotFound(post_id))?;
        debug!(%post_id, "Updated post");

        Ok(post)
    }

    /// Removes the post and every comment attached to it.
    pub async fn delete(&self, post_id: Id<PostMarker>) -> Result<()> {
        if !self.posts.delete_post(post_id).await? {
            return Err(ServiceError::PostNotFound(post_id));
        }
        debug!(%post_id, "Deleted post");

        Ok(())
    }
}
