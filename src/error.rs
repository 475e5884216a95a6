//! Server-side error handling for the classification relay.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The multipart request carried no usable image field.
    #[error("لم يتم رفع صورة")]
    MissingImage,

    /// The upload tripped the configured body limit.
    #[error("حجم الصورة يتجاوز الحد المسموح به")]
    PayloadTooLarge,

    /// The upstream classifier answered with a non-200 status and a JSON
    /// body; both are relayed to the caller unmodified.
    #[error("خطأ من واجهة التصنيف (HTTP {status})")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// The upstream body was not parseable as JSON.
    #[error("رد غير صالح من HuggingFace")]
    UpstreamUnparseable,

    /// Transport-level failure reaching the upstream (DNS, refused, timeout).
    #[error("فشل الاتصال: {0}")]
    Connection(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            RelayError::MissingImage => {
                let body = Json(json!({ "error": message }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            RelayError::PayloadTooLarge => {
                let body = Json(json!({ "error": message }));
                (StatusCode::PAYLOAD_TOO_LARGE, body).into_response()
            }
            RelayError::Upstream { status, body } => {
                tracing::error!(status, %body, "upstream classifier error");
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(body)).into_response()
            }
            RelayError::UpstreamUnparseable => {
                tracing::error!("upstream returned a non-JSON body");
                let body = Json(json!({ "error": message }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            RelayError::Connection(reason) => {
                tracing::error!(%reason, "failed to reach upstream classifier");
                let body = Json(json!({ "error": message }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
