//! frombuddy-api - Guidance backend for administrative procedures
//!
//! Turns a free-text query into a structured, validated step-by-step guide using a
//! language model, and serves the static service catalog.
//!
//! NON-GOVERNMENT. GUIDANCE ONLY. No user input is persisted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use frombuddy_api::generation::GroqClient;
use frombuddy_api::guardrail::Guardrail;
use frombuddy_api::pipeline::ExplanationPipeline;
use frombuddy_api::prompt::PromptAssembler;
use frombuddy_api::{build_router, resolve_services_dir, AppState};
use frombuddy_common::catalog::ServiceCatalog;
use frombuddy_common::config::{TomlConfig, API_KEY_ENV};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for frombuddy-api
#[derive(Parser, Debug)]
#[command(name = "frombuddy-api")]
#[command(about = "Guidance backend for administrative procedures")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "FROMBUDDY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "FROMBUDDY_PORT")]
    port: Option<u16>,

    /// Interface to bind to
    #[arg(short, long, env = "FROMBUDDY_BIND")]
    bind: Option<String>,

    /// Directory holding the static service catalog
    #[arg(short, long, env = "FROMBUDDY_SERVICES_DIR")]
    services_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(services_dir) = args.services_dir {
        config.services_dir = services_dir;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http={}", config.logging.level, config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting FromBuddy API (frombuddy-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let api_key = config.generation.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; every explanation will return the fallback guide",
            API_KEY_ENV
        );
    }

    let generator = GroqClient::new(&config.generation, api_key)
        .context("Failed to initialize generation client")?;
    info!(
        model = generator.model(),
        timeout_secs = config.generation.timeout_secs,
        max_retries = generator.max_retries(),
        "Generation backend: {}",
        config.generation.base_url
    );

    let pipeline = ExplanationPipeline::new(
        Guardrail::new(&config.guardrail.extra_terms),
        PromptAssembler::new(),
        Arc::new(generator),
    );

    let catalog = ServiceCatalog::new(resolve_services_dir(&config.services_dir));
    info!("Service catalog: {}", catalog.dir().display());

    let state = AppState::new(pipeline, catalog);
    let app = build_router(state, &config.cors.allowed_origins);

    let ip = config
        .bind
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid bind address '{}'", config.bind))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
