//! Application state for the gateway.

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use worker_protocol::{HttpWorkerClient, MapWorker};

use crate::catalog::Catalog;
use crate::config::GatewayConfig;

/// Shared, immutable application state.
pub struct AppState {
    /// Client for the worker that renders and samples grids.
    pub worker: Arc<dyn MapWorker>,

    pub config: GatewayConfig,

    /// Data sources, variables and pressure levels offered to the browser.
    pub catalog: Catalog,

    /// Renders `/metrics`; absent when no recorder is installed (tests).
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state talking to the worker named in `config`.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let worker = HttpWorkerClient::new(&config.worker_url)
            .with_context(|| format!("Failed to create worker client for {}", config.worker_url))?;
        let catalog = Catalog::load(config.catalog_file.as_deref())?;

        Ok(Self {
            worker: Arc::new(worker),
            config,
            catalog,
            prometheus: None,
        })
    }

    /// Build state around an existing worker implementation.
    pub fn with_worker(config: GatewayConfig, worker: Arc<dyn MapWorker>) -> Self {
        Self {
            worker,
            config,
            catalog: Catalog::default(),
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
