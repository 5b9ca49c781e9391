//! In-process storage, used when no database is configured and in tests.

use crate::{
    record::{CommentRecord, PostRecord},
    store::{CommentStore, DbError, PostStore, Result},
};
use async_trait::async_trait;
use postboard_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::{Post, PostContent, PostMarker},
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    last_post_id: i64,
    last_comment_id: i64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let tables = self.tables.read().await;
        let record = tables.posts.get(&post_id.get().cast_signed()).cloned();

        Ok(record.map(Post::from))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;

        Ok(tables.posts.values().cloned().map(Post::from).collect())
    }

    async fn create_post(&self, post: &PostContent) -> Result<Post> {
        let mut tables = self.tables.write().await;
        tables.last_post_id += 1;

        let record = PostRecord {
            post_id: tables.last_post_id,
            title: post.title.clone(),
            content: post.content.clone(),
        };
        tables.posts.insert(record.post_id, record.clone());

        Ok(record.into())
    }

    async fn update_post(
        &self,
        post_id: Id<PostMarker>,
        post: &PostContent,
    ) -> Result<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.posts.get_mut(&post_id.get().cast_signed()) else {
            return Ok(None);
        };

        record.title.clone_from(&post.title);
        record.content.clone_from(&post.content);

        Ok(Some(record.clone().into()))
    }

    async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<bool> {
        let post_id = post_id.get().cast_signed();
        let mut tables = self.tables.write().await;

        if tables.posts.remove(&post_id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, comment| comment.post_id != post_id);

        Ok(true)
    }

    async fn post_exists(&self, post_id: Id<PostMarker>) -> Result<bool> {
        let tables = self.tables.read().await;

        Ok(tables.posts.contains_key(&post_id.get().cast_signed()))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn fetch_comment(&self, comment_id: Id<CommentMarker>) -> Result<Option<Comment>> {
        let tables = self.tables.read().await;
        let record = tables
            .comments
            .get(&comment_id.get().cast_signed())
            .cloned();

        Ok(record.map(Comment::from))
    }

    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let post_id = post_id.get().cast_signed();
        let tables = self.tables.read().await;

        Ok(tables
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .map(Comment::from)
            .collect())
    }

    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post_id.get().cast_signed()) {
            return Err(DbError::MissingPost(post_id));
        }
        tables.last_comment_id += 1;

        let record = CommentRecord {
            comment_id: tables.last_comment_id,
            post_id: post_id.get().cast_signed(),
            comment: comment.comment.clone(),
        };
        tables.comments.insert(record.comment_id, record.clone());

        Ok(record.into())
    }
}
