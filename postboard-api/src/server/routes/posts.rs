use crate::{
    server::{Result, ServerError, ServerRouter, json::Json},
    service::PostService,
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use postboard_common::model::{
    Id,
    post::{Post, PostContent, PostMarker},
};
use serde::Deserialize;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_posts)
        .typed_post(create_post)
        .typed_get(get_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
}

#[derive(TypedPath)]
#[typed_path("/posts")]
struct PostsPath;

async fn get_posts(_: PostsPath, State(posts): State<PostService>) -> Result<Json<Vec<Post>>> {
    Ok(Json(posts.get_all().await?))
}

async fn create_post(
    _: PostsPath,
    State(posts): State<PostService>,
    Json(post): Json<PostContent>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = posts.create(&post).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    PostPath { id }: PostPath,
    State(posts): State<PostService>,
) -> Result<Json<Post>> {
    Ok(Json(posts.get_by_id(id).await?))
}

async fn update_post(
    PostPath { id }: PostPath,
    State(posts): State<PostService>,
    Json(post): Json<PostContent>,
) -> Result<Json<Post>> {
    Ok(Json(posts.update(id, &post).await?))
}

async fn delete_post(
    PostPath { id }: PostPath,
    State(posts): State<PostService>,
) -> Result<String> {
    posts.delete(id).await?;

    Ok(format!("The post deleted successfully with id {id}"))
}
