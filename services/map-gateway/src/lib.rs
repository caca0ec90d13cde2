//! Weather map gateway.
//!
//! Serves the browser bundle and relays overlay (`/api/maps/generate`) and
//! point-sample (`/api/maps/sample`) requests to the gridded-data worker.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forward;
pub mod handlers;
pub mod metrics;
pub mod placeholder;
pub mod state;

pub use app::build_router;
pub use config::GatewayConfig;
pub use state::AppState;
