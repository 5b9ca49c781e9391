use crate::server::ServerRouter;
use axum::Router;

mod comments;
mod posts;

pub fn routes() -> ServerRouter {
    Router::new()
        .merge(posts::routes())
        .merge(comments::routes())
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::server::{self, ServerState};
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    };
    use postboard_db::memory::MemoryStore;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn app() -> Router {
        server::routes().with_state(ServerState::new(Arc::new(MemoryStore::new())))
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, body.to_vec())
    }

    pub async fn send_json(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, body) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use crate::server::routes::testing::{app, send_json};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn unknown_route() {
        let app = app();

        let (status, body) = send_json(&app, Method::GET, "/blogs", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "error": true,
                "message": "Unknown route requested: /blogs",
                "status": 404,
            })
        );
    }

    #[tokio::test]
    async fn malformed_json() {
        let app = app();

        let (status, body) = send_json(&app, Method::POST, "/posts", Some(json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["status"], json!(400));
    }
}
