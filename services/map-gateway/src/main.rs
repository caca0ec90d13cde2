//! Map Gateway Server
//!
//! Serves the weather map client and relays overlay and sample requests to
//! the gridded-data worker.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use map_gateway::{build_router, AppState, GatewayConfig};

/// Map Gateway Server
#[derive(Parser, Debug)]
#[command(name = "map-gateway")]
#[command(about = "Web gateway for weather map overlays and point samples")]
struct Args {
    /// Listen host
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: IpAddr,

    /// Listen port
    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    port: u16,

    /// Base URL of the worker service
    #[arg(long, default_value = "http://localhost:5001", env = "WORKER_URL")]
    worker_url: String,

    /// Directory holding the browser bundle
    #[arg(long, default_value = "public", env = "STATIC_DIR")]
    static_dir: PathBuf,

    /// Seconds to wait for a render before serving the placeholder
    #[arg(long, default_value_t = 120, env = "GENERATE_TIMEOUT_SECS")]
    generate_timeout_secs: u64,

    /// Seconds to wait for a sample before reporting failure
    #[arg(long, default_value_t = 15, env = "SAMPLE_TIMEOUT_SECS")]
    sample_timeout_secs: u64,

    /// YAML file overriding the built-in catalog
    #[arg(long, env = "CATALOG_FILE")]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "GATEWAY_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl Args {
    fn to_config(&self) -> GatewayConfig {
        GatewayConfig {
            listen_addr: SocketAddr::new(self.host, self.port),
            worker_url: self.worker_url.clone(),
            static_dir: self.static_dir.clone(),
            generate_timeout: Duration::from_secs(self.generate_timeout_secs),
            sample_timeout: Duration::from_secs(self.sample_timeout_secs),
            catalog_file: self.catalog.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let config = args.to_config();
    info!(
        worker_url = %config.worker_url,
        static_dir = %config.static_dir.display(),
        generate_timeout_secs = config.generate_timeout.as_secs(),
        sample_timeout_secs = config.sample_timeout.as_secs(),
        "Starting map gateway"
    );

    let addr = config.listen_addr;
    let state = Arc::new(AppState::new(config)?.with_prometheus(prometheus_handle));
    let app = build_router(state);

    info!("Map gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    Ok(())
}

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

    info!("Shutdown signal received");
}
