use std::env;

/// Hugging Face router endpoint for the plant-disease MobileNet model.
const DEFAULT_UPSTREAM: &str =
    "https://router.huggingface.co/hf-inference/models/linkanjarad/mobilenet_v2_1.0_224-plant-disease-identification";

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the upstream classifier. Optional: the server
    /// still starts without it, but upstream calls will be rejected.
    pub hf_token: Option<String>,

    /// Listen port.
    pub port: u16,

    /// Upload size cap for the multipart body.
    pub body_limit_bytes: usize,

    /// Upstream inference endpoint.
    pub upstream_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let hf_token = env::var("HF_TOKEN").ok().filter(|t| !t.is_empty());
        if hf_token.is_none() {
            tracing::warn!("HF_TOKEN is not set; upstream calls will fail until it is provided");
        }

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse::<u16>()
            .expect("PORT must be a valid number between 0 and 65535");

        let body_limit_bytes = {
            let mb = env::var("BODY_LIMIT_MB")
                .unwrap_or_else(|_| "5".into())
                .parse::<usize>()
                .expect("BODY_LIMIT_MB must be a valid integer");
            mb * 1024 * 1024
        };

        let upstream_url = env::var("HF_ENDPOINT").unwrap_or_else(|_| DEFAULT_UPSTREAM.into());

        Self {
            hf_token,
            port,
            body_limit_bytes,
            upstream_url,
        }
    }
}
