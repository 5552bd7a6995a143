//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查与指标）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export));

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/auth/signup", put(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login));

    // 需要认证的路由（认证门卫短路未认证请求）
    let feed_routes = Router::new()
        .route("/feed/posts", get(handlers::feed::get_posts))
        .route("/feed/post", post(handlers::feed::create_post))
        .route(
            "/feed/post/{postId}",
            put(handlers::feed::update_post).delete(handlers::feed::delete_post),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(feed_routes)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
