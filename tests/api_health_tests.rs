//! 健康检查 API 集成测试

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, lazy_test_pool};

#[tokio::test]
async fn test_health_check() {
    let config = common::create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = blog_system::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_check_has_trace_headers() {
    let config = common::create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = blog_system::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .header("x-trace-id", "trace-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // 请求追踪中间件回写 trace_id
    assert_eq!(response.headers().get("x-trace-id").unwrap(), "trace-abc");
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_readiness_check() {
    let config = common::create_test_config();
    let pool = common::setup_test_db(&config).await;
    let state = create_test_app_state(pool);
    let app = blog_system::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["ready"], true);
}
