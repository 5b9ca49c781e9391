use crate::{
    model::Id,
    validation::{not_blank, null_as_empty},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    #[serde(flatten)]
    pub content: PostContent,
}

/// The user-editable fields of a post.
///
/// Missing fields deserialize to empty strings so they surface as
/// validation failures instead of malformed bodies.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PostContent {
    #[validate(
        custom(function = "not_blank", message = "Title must not be blank"),
        length(
            min = 3,
            max = 100,
            message = "Title must be between 3 and 100 characters"
        )
    )]
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[validate(
        custom(function = "not_blank", message = "Content must not be blank"),
        length(
            min = 3,
            max = 200,
            message = "Content must be between 3 and 200 characters"
        )
    )]
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

impl PostContent {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{
            Id,
            post::{Post, PostContent},
        },
        validation::field_messages,
    };
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn length_bounds() {
        assert!(PostContent::new("Hi There", "Hello World").validate().is_ok());
        assert!(PostContent::new("abc", "abc").validate().is_ok());
        assert!(
            PostContent::new("a".repeat(100), "b".repeat(200))
                .validate()
                .is_ok()
        );

        let errors = PostContent::new("ab", "c".repeat(201)).validate().unwrap_err();
        assert_eq!(
            field_messages(&errors),
            [
                "content|Content must be between 3 and 200 characters",
                "title|Title must be between 3 and 100 characters",
            ]
        );
    }

    #[test]
    fn lengths_count_characters() {
        assert!(PostContent::new("äöü", "ßßß").validate().is_ok());
        assert!(PostContent::new("ä".repeat(100), "abc").validate().is_ok());
        assert!(PostContent::new("ä".repeat(101), "abc").validate().is_err());
    }

    #[test]
    fn blank_fields() {
        let errors = PostContent::new("     ", "Hello World")
            .validate()
            .unwrap_err();
        assert_eq!(field_messages(&errors), ["title|Title must not be blank"]);

        let errors = PostContent::default().validate().unwrap_err();
        assert_eq!(
            field_messages(&errors),
            [
                "content|Content must be between 3 and 200 characters",
                "content|Content must not be blank",
                "title|Title must be between 3 and 100 characters",
                "title|Title must not be blank",
            ]
        );
    }

    #[test]
    fn missing_fields_deserialize_empty() {
        let content: PostContent =
            serde_json::from_value(json!({ "title": "Hi There" })).unwrap();
        assert_eq!(content, PostContent::new("Hi There", ""));

        let content: PostContent =
            serde_json::from_value(json!({ "title": null, "content": "Hello World" })).unwrap();
        assert_eq!(content, PostContent::new("", "Hello World"));
    }

    #[test]
    fn post_shape() {
        let post = Post {
            id: Id::new(7),
            content: PostContent::new("Hi There", "Hello World"),
        };

        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({ "id": 7, "title": "Hi There", "content": "Hello World" })
        );
    }
}
