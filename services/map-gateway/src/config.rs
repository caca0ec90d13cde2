//! Gateway configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WORKER_URL: &str = "http://localhost:5001";
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Rendering means a grid decode plus image synthesis on the worker.
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_SAMPLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything the gateway needs at start-up.
///
/// The binary fills this from command-line flags and environment variables;
/// library code only ever sees the finished struct.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Base URL of the single worker instance.
    pub worker_url: String,

    /// Directory holding the browser bundle.
    pub static_dir: PathBuf,

    /// Longest wait for a worker render before serving the placeholder.
    pub generate_timeout: Duration,

    /// Longest wait for a worker sample before reporting failure.
    pub sample_timeout: Duration,

    /// Optional YAML file overriding the built-in catalog.
    pub catalog_file: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            worker_url: DEFAULT_WORKER_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            sample_timeout: DEFAULT_SAMPLE_TIMEOUT,
            catalog_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.worker_url, "http://localhost:5001");
        assert_eq!(config.generate_timeout, Duration::from_secs(120));
        assert_eq!(config.sample_timeout, Duration::from_secs(15));
        assert!(config.catalog_file.is_none());
    }
}
