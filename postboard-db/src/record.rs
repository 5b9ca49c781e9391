use postboard_common::model::{
    comment::{Comment, CommentContent},
    post::{Post, PostContent},
};
use sqlx::FromRow;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct PostRecord {
    pub post_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct CommentRecord {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment: String,
}

impl From<PostRecord> for Post {
    fn from(value: PostRecord) -> Self {
        Self {
            id: value.post_id.cast_unsigned().into(),
            content: PostContent {
                title: value.title,
                content: value.content,
            },
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(value: CommentRecord) -> Self {
        Self {
            id: value.comment_id.cast_unsigned().into(),
            post_id: value.post_id.cast_unsigned().into(),
            content: CommentContent {
                comment: value.comment,
            },
        }
    }
}
