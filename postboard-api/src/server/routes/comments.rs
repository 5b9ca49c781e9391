use crate::{
    server::{Result, ServerError, ServerRouter, json::Json},
    service::CommentService,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use postboard_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::PostMarker,
};
use serde::Deserialize;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(post_comment)
        .typed_get(get_post_comments)
        .typed_get(get_comment)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{post_id}/comments", rejection(ServerError))]
struct PostCommentsPath {
    post_id: Id<PostMarker>,
}

async fn post_comment(
    PostCommentsPath { post_id }: PostCommentsPath,
    State(comments): State<CommentService>,
    Json(comment): Json<CommentContent>,
) -> Result<Json<Comment>> {
    Ok(Json(comments.post_comment(post_id, &comment).await?))
}

async fn get_post_comments(
    PostCommentsPath { post_id }: PostCommentsPath,
    State(comments): State<CommentService>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(comments.get_by_post_id(post_id).await?))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/comments/{id}", rejection(ServerError))]
struct CommentPath {
    id: Id<CommentMarker>,
}

async fn get_comment(
    CommentPath { id }: CommentPath,
    State(comments): State<CommentService>,
) -> Result<Json<Comment>> {
    Ok(Json(comments.get_by_id(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::server::routes::testing::{app, send, send_json};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn create_post(app: &axum::Router) {
        let (status, _) = send(
            app,
            Method::POST,
            "/posts",
            Some(json!({ "title": "Hi There", "content": "Hello World" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        let app = app();
        create_post(&app).await;

        let (status, comment) = send_json(
            &app,
            Method::POST,
            "/posts/1/comments",
            Some(json!({ "comment": "Nice post", "postId": 42 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            comment,
            json!({ "id": 1, "postId": 1, "comment": "Nice post" })
        );

        let (status, fetched) = send_json(&app, Method::GET, "/comments/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, comment);

        let (status, listed) = send_json(&app, Method::GET, "/posts/1/comments", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([comment]));
    }

    #[tokio::test]
    async fn comments_of_missing_post() {
        let app = app();
        let expected = json!({
            "error": true,
            "message": "Post with id 5 was not found.",
            "status": 404,
        });

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/posts/5/comments",
            Some(json!({ "comment": "Hello?" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) = send_json(&app, Method::GET, "/posts/5/comments", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) = send_json(&app, Method::GET, "/comments/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "error": true,
                "message": "Comment with id 1 was not found.",
                "status": 404,
            })
        );
    }

    #[tokio::test]
    async fn invalid_comment() {
        let app = app();
        create_post(&app).await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/posts/1/comments",
            Some(json!({ "comment": "    " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!(["comment|Comment must not be blank"]));

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/posts/1/comments",
            Some(json!({ "comment": null })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!([
                "comment|Comment must be between 3 and 200 characters",
                "comment|Comment must not be blank",
            ])
        );

        let (_, listed) = send_json(&app, Method::GET, "/posts/1/comments", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn delete_cascades() {
        let app = app();
        create_post(&app).await;
        for text in ["first!", "second", "third"] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/posts/1/comments",
                Some(json!({ "comment": text })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, _) = send(&app, Method::DELETE, "/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/posts/1/comments", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        for comment_id in 1..=3 {
            let uri = format!("/comments/{comment_id}");
            let (status, _) = send(&app, Method::GET, &uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }
}
