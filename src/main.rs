use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    paybridge::{
        AppState,
        adapters::{api, square::SquareClient},
        config::AppConfig,
    },
    std::{sync::Arc, time::Duration},
    tokio::signal,
    tower_http::timeout::TimeoutLayer,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().expect("invalid configuration");

    if config.webhooks.verification_disabled {
        tracing::warn!(
            "webhook signature verification is DISABLED; every inbound event will be trusted"
        );
    }

    let processor =
        SquareClient::new(&config.base_url, &config.access_token, config.processor_timeout)
            .expect("failed to build processor client");

    let state = AppState {
        processor: Arc::new(processor),
        webhooks: config.webhooks.clone(),
        links: config.links.clone(),
    };

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/payment/process", post(api::process_payment))
        .route(
            "/api/payment/create-payment-link",
            get(api::create_payment_link),
        )
        .route("/api/webhooks/square-events", post(api::square_webhook))
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB, processor events are small
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
