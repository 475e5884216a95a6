use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plant_service_rs::config::Config;
use plant_service_rs::server::{app, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plant_service_rs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let port = config.port;

    let state = Arc::new(AppState::new(config));
    let router = app(state);

    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::Server::bind(&format!("0.0.0.0:{}", port).parse().expect("valid listen address"))
        .serve(router.into_make_service())
        .await
        .expect("server failed");
}
