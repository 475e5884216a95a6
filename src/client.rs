//! Browser-equivalent classification flow: uploads an image to the relay,
//! interprets the top result, and renders the Arabic view strings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::interpret::{self, LabelScore};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay itself could not be reached; the local server process is
    /// probably not running.
    #[error("السيرفر المحلي مش شغال! ⚠️\nتأكد من تشغيل السيرفر المحلي قبل التحليل.")]
    RelayUnreachable,

    /// The relay answered with an `{ "error": ... }` body.
    #[error("{0}")]
    Relay(String),

    /// Non-2xx relay response without a readable error body.
    #[error("خطأ HTTP: {0}")]
    Http(u16),

    /// The upstream model is still loading (array whose first element
    /// carries an `error` field).
    #[error("النموذج قيد التحميل. انتظر دقيقة ثم حاول مرة أخرى.")]
    ModelWarming,

    /// The response was not a non-empty array of label/score pairs.
    #[error("لم يُرجَع أي تصنيف.")]
    NoClassification,
}

/// Rendered state of the three result fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub diagnosis: String,
    pub confidence: String,
    pub treatment: String,
}

pub struct ClassifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClassifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Upload the image to the relay and return the ranked results.
    pub async fn classify(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<Vec<LabelScore>, ClientError> {
        let part = reqwest::multipart::Part::bytes(image).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/classify-plant", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                // Only genuine transport failures mean the relay is down;
                // builder or redirect errors keep their own message.
                if err.is_connect() || err.is_timeout() {
                    ClientError::RelayUnreachable
                } else {
                    ClientError::Relay(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response
                .json()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(match body.get("error").and_then(|e| e.as_str()) {
                Some(message) => ClientError::Relay(message.to_string()),
                None => ClientError::Http(status.as_u16()),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|_| ClientError::NoClassification)?;

        if let Some(first) = data.as_array().and_then(|array| array.first()) {
            if first.get("error").is_some() {
                return Err(ClientError::ModelWarming);
            }
        }

        let results: Vec<LabelScore> =
            serde_json::from_value(data).map_err(|_| ClientError::NoClassification)?;
        if results.is_empty() {
            return Err(ClientError::NoClassification);
        }
        Ok(results)
    }

    /// Full analysis flow: classify, interpret the top result, and render
    /// the view. Errors never escape; they become the rendered error state.
    pub async fn analyze(&self, image: Vec<u8>, file_name: &str) -> AnalysisView {
        match self.classify(image, file_name).await {
            Ok(results) => {
                let top = &results[0];
                let interpretation = interpret::interpret_top(&top.label, top.score);
                AnalysisView {
                    diagnosis: interpretation.diagnosis,
                    confidence: format!("{:.1}%", interpretation.confidence),
                    treatment: interpretation.treatment,
                }
            }
            Err(err) => AnalysisView {
                diagnosis: "-".to_string(),
                confidence: "-".to_string(),
                treatment: format!("حدث خطأ: {err}"),
            },
        }
    }
}

/// Admits at most one analysis at a time, standing in for the disabled
/// "analyze" button. The guard re-enables the control on drop, so cleanup
/// runs on success, error, and panic alike.
#[derive(Clone, Default)]
pub struct AnalyzeControl {
    busy: Arc<AtomicBool>,
}

impl AnalyzeControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while an analysis is already in flight.
    pub fn try_begin(&self) -> Option<AnalyzeInFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AnalyzeInFlight {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct AnalyzeInFlight {
    busy: Arc<AtomicBool>,
}

impl Drop for AnalyzeInFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
