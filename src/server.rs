use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::RelayError;
use crate::relay;

pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/classify-plant", post(classify_plant))
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn classify_plant(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, RelayError> {
    let mut image = None;

    // The page posts the file under "image"; accept any field carrying a
    // filename as a fallback.
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some("image") || field.file_name().is_some() {
            image = Some(field.bytes().await.map_err(upload_error)?);
            break;
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or(RelayError::MissingImage)?;

    let result = relay::forward(&state.http, &state.config, image).await?;
    Ok(Json(result))
}

/// A failed multipart read means either a body over the `DefaultBodyLimit`
/// cap (a `LengthLimitError` sits in the source chain) or a request with no
/// usable image.
fn upload_error(err: MultipartError) -> RelayError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(inner) = source {
        if inner.is::<http_body::LengthLimitError>() {
            return RelayError::PayloadTooLarge;
        }
        source = inner.source();
    }
    RelayError::MissingImage
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}
