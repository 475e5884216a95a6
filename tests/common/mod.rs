// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::{http::StatusCode, routing::post, Json, Router};

use plant_service_rs::config::Config;

/// Config pointing the relay at an arbitrary upstream, no credential.
pub fn test_config(upstream_url: &str) -> Config {
    Config {
        hf_token: None,
        port: 0,
        body_limit_bytes: 5 * 1024 * 1024,
        upstream_url: upstream_url.to_string(),
    }
}

/// Spawn a one-route stub server answering `POST <path>` with a fixed JSON
/// body, returning its base URL.
pub async fn spawn_json_stub(
    path: &'static str,
    status: StatusCode,
    body: serde_json::Value,
) -> String {
    let app = Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    spawn(app).await
}

/// Stub answering with a plain-text (non-JSON) body.
pub async fn spawn_text_stub(path: &'static str, status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(path, post(move || async move { (status, body) }));
    spawn(app).await
}

async fn spawn(app: Router) -> String {
    let server = axum::Server::bind(&"127.0.0.1:0".parse().expect("loopback addr"))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{addr}")
}

pub const BOUNDARY: &str = "leaf-test-boundary";

/// Multipart body carrying one file field named `image`.
pub fn image_form_body(bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"leaf.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Multipart body with a single text field and no file at all.
pub fn fileless_form_body() -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         hello\r\n\
         --{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub fn form_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
