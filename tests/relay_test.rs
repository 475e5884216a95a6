//! Router-level tests for the classification relay endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use plant_service_rs::server::{app, AppState};

mod common;
use common::{
    fileless_form_body, form_content_type, image_form_body, spawn_json_stub, spawn_text_stub,
    test_config,
};

fn router_for(upstream_url: &str) -> axum::Router {
    app(Arc::new(AppState::new(test_config(upstream_url))))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn classify_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/classify-plant")
        .header(header::CONTENT_TYPE, form_content_type())
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn health_returns_ok() {
    let router = router_for("http://127.0.0.1:9");
    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "OK" }));
}

#[tokio::test]
async fn missing_image_field_returns_400_with_error_body() {
    let router = router_for("http://127.0.0.1:9");
    let response = router
        .oneshot(classify_request(fileless_form_body()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "لم يتم رفع صورة");
}

#[tokio::test]
async fn empty_image_field_returns_400() {
    let router = router_for("http://127.0.0.1:9");
    let response = router
        .oneshot(classify_request(image_form_body(b"")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn upload_over_the_body_limit_returns_413() {
    let router = router_for("http://127.0.0.1:9");
    let oversized = vec![0u8; 6 * 1024 * 1024];
    let response = router
        .oneshot(classify_request(image_form_body(&oversized)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "حجم الصورة يتجاوز الحد المسموح به");
}

#[tokio::test]
async fn unreachable_upstream_returns_500_with_reason() {
    // Port 9 (discard) refuses connections.
    let router = router_for("http://127.0.0.1:9");
    let response = router
        .oneshot(classify_request(image_form_body(b"jpeg-bytes")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error string");
    assert!(message.starts_with("فشل الاتصال: "), "got: {message}");
}

#[tokio::test]
async fn upstream_success_is_relayed_unmodified() {
    let expected = json!([
        { "label": "Tomato___healthy", "score": 0.95 },
        { "label": "Tomato___Early_blight", "score": 0.03 }
    ]);
    let upstream = spawn_json_stub("/model", StatusCode::OK, expected.clone()).await;

    let router = router_for(&format!("{upstream}/model"));
    let response = router
        .oneshot(classify_request(image_form_body(b"jpeg-bytes")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, expected);
}

#[tokio::test]
async fn upstream_error_status_and_body_are_relayed() {
    let upstream_body = json!({ "error": "Model is currently loading" });
    let upstream = spawn_json_stub(
        "/model",
        StatusCode::SERVICE_UNAVAILABLE,
        upstream_body.clone(),
    )
    .await;

    let router = router_for(&format!("{upstream}/model"));
    let response = router
        .oneshot(classify_request(image_form_body(b"jpeg-bytes")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await, upstream_body);
}

#[tokio::test]
async fn non_json_upstream_body_returns_500() {
    let upstream = spawn_text_stub("/model", StatusCode::OK, "<html>gateway page</html>").await;

    let router = router_for(&format!("{upstream}/model"));
    let response = router
        .oneshot(classify_request(image_form_body(b"jpeg-bytes")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "رد غير صالح من HuggingFace");
}
