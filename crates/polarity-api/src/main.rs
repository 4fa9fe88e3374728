//! Polarity API server
//!
//! Loads the pre-trained vectorizer and classifier artifacts once at startup
//! and serves sentiment predictions and local explanations over HTTP.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use polarity_api::cli::Cli;
use polarity_api::config::{LoadFailureMode, ServiceConfig};
use polarity_api::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting Polarity API");

    // Load configuration
    let config = ServiceConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Artifacts: {}", config.artifacts_dir);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load model artifacts; behavior on failure is a configuration choice
    let model = match polarity_model::load_model(&config.artifact_paths()) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => match config.on_load_failure {
            LoadFailureMode::Fail => {
                return Err(anyhow::anyhow!("model artifacts failed to load: {e}"));
            }
            LoadFailureMode::Degrade => {
                warn!("model artifacts failed to load, serving in degraded mode: {e}");
                None
            }
        },
    };

    let state = AppState::new(model, Some(metrics_handle));

    // Build and run the server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("polarity=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polarity=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "polarity_requests_total",
        "Total number of requests by endpoint"
    );
    metrics::describe_counter!("polarity_errors_total", "Total number of errors by type");
    metrics::describe_histogram!(
        "polarity_request_latency_us",
        metrics::Unit::Microseconds,
        "Request handling latency in microseconds by endpoint"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
