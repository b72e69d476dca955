mod config;
mod dto;
mod error;
mod handlers;
mod mailer;
mod models;
mod service;

use std::sync::Arc;

use mailer::ResendSender;
use service::ContactService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded portfolio server config");
    tracing::info!(
        "Contact messages go to '{}' via {}",
        cfg.mail.to,
        cfg.mail.api_url
    );

    // Setup service
    let sender = ResendSender::new(&cfg.mail).expect("Failed to create HTTP client");
    let service = Arc::new(ContactService::new(Arc::new(sender), &cfg.mail));

    // Setup router
    let router = handlers::router(service);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener
        .local_addr()
        .expect("Failed to read listener address");

    tracing::info!("Portfolio server starting, listening on {}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
