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
use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions, query, query_as, query_scalar};
use tracing::debug;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL-backed storage.
#[derive(Clone, Debug)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        debug!("Database migrations applied");

        Ok(())
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[async_trait]
impl PostStore for DbClient {
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let record = query_as::<_, PostRecord>(
            "
            SELECT
                posts.post_id,
                posts.title,
                posts.content
            FROM
                posts
            WHERE
                posts.post_id = $1
            ",
        )
        .bind(post_id.get().cast_signed())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Post::from))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let records = query_as::<_, PostRecord>(
            "
            SELECT
                posts.post_id,
                posts.title,
                posts.content
            FROM
                posts
            ORDER BY
                posts.post_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Post::from).collect())
    }

    async fn create_post(&self, post: &PostContent) -> Result<Post> {
        let record = query_as::<_, PostRecord>(
            "
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING post_id, title, content
            ",
        )
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn update_post(
        &self,
        post_id: Id<PostMarker>,
        post: &PostContent,
    ) -> Result<Option<Post>> {
        let record = query_as::<_, PostRecord>(
            "
            UPDATE posts
            SET title = $2, content = $3
            WHERE post_id = $1
            RETURNING post_id, title, content
            ",
        )
        .bind(post_id.get().cast_signed())
        .bind(&post.title)
        .bind(&post.content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Post::from))
    }

    async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<bool> {
        let post_id = post_id.get().cast_signed();
        let mut transaction = self.pool.begin().await?;

        let deleted_comments = query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *transaction)
            .await?
            .rows_affected();
        let deleted_posts = query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *transaction)
            .await?
            .rows_affected();

        transaction.commit().await?;
        debug!(post_id, deleted_posts, deleted_comments, "Deleted post");

        Ok(deleted_posts > 0)
    }

    async fn post_exists(&self, post_id: Id<PostMarker>) -> Result<bool> {
        let exists = query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM posts WHERE posts.post_id = $1)",
        )
        .bind(post_id.get().cast_signed())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[async_trait]
impl CommentStore for DbClient {
    async fn fetch_comment(&self, comment_id: Id<CommentMarker>) -> Result<Option<Comment>> {
        let record = query_as::<_, CommentRecord>(
            "
            SELECT
                comments.comment_id,
                comments.post_id,
                comments.comment
            FROM
                comments
            WHERE
                comments.comment_id = $1
            ",
        )
        .bind(comment_id.get().cast_signed())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Comment::from))
    }

    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let records = query_as::<_, CommentRecord>(
            "
            SELECT
                comments.comment_id,
                comments.post_id,
                comments.comment
            FROM
                comments
            WHERE
                comments.post_id = $1
            ORDER BY
                comments.comment_id
            ",
        )
        .bind(post_id.get().cast_signed())
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment> {
        let record = query_as::<_, CommentRecord>(
            "
            INSERT INTO comments (post_id, comment)
            VALUES ($1, $2)
            RETURNING comment_id, post_id, comment
            ",
        )
        .bind(post_id.get().cast_signed())
        .bind(&comment.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                DbError::MissingPost(post_id)
            } else {
                DbError::from(err)
            }
        })?;

        Ok(record.into())
    }
}
