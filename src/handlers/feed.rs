//! 帖子流的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::post::{CreatePostRequest, UpdatePostRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// 列出所有帖子
/// GET /feed/posts
pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.post_service.list_posts().await?;

    Ok(Json(json!({
        "message": "Fetched posts successfully.",
        "posts": posts
    })))
}

/// 创建帖子
/// POST /feed/post
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (post, creator) = state
        .post_service
        .create_post(req, auth_context.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Post created successfully!",
            "post": post,
            "creator": creator
        })),
    ))
}

/// 更新帖子
/// PUT /feed/post/{postId}
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .post_service
        .update_post(post_id, req, auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Post updated!",
        "post": post
    })))
}

/// 删除帖子
/// DELETE /feed/post/{postId}
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .post_service
        .delete_post(post_id, auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Post deleted."
    })))
}
