use crate::{
    model::{Id, post::PostMarker},
    validation::{not_blank, null_as_empty},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    #[serde(flatten)]
    pub content: CommentContent,
}

/// Body of a new comment. The parent post always comes from the request path.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct CommentContent {
    #[validate(
        custom(function = "not_blank", message = "Comment must not be blank"),
        length(
            min = 3,
            max = 200,
            message = "Comment must be between 3 and 200 characters"
        )
    )]
    #[serde(deserialize_with = "null_as_empty")]
    pub comment: String,
}

impl CommentContent {
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}
