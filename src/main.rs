use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chibi_image_proxy::{api, config, inference, proxy};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chibi_image_proxy=info,tower_http=info")),
        )
        .init();

    // Load configuration; a missing token stops the process here
    config::Config::dotenv_load();
    let config = match config::Config::new() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config::Config::print_env_vars();

    let inference_client = match inference::client::InferenceClient::new(
        config.model_url.clone(),
        config.hf_api_token.clone(),
        config.request_timeout(),
    ) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    match config.request_timeout() {
        Some(t) => tracing::info!("Inference timeout: {}s", t.as_secs()),
        None => tracing::warn!("Inference timeout disabled; requests wait on the remote endpoint"),
    }

    let state = Arc::new(api::routes::AppState {
        proxy: proxy::generator::GenerationProxy::new(Arc::new(inference_client)),
    });
    let app = api::routes::router(state);

    let socket_address = config.socket_addr();
    tracing::info!("listening on {}", socket_address);
    if let Err(e) = axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
