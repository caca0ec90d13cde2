//! Contract between the map gateway and the gridded-data worker.
//!
//! The worker decodes meteorological grids and answers two kinds of
//! requests: `render` (produce a georeferenced overlay image) and `sample`
//! (read a single value at a point). This crate holds the wire types, the
//! inbound field checks, and the HTTP client used to reach the worker.

pub mod bounds;
pub mod client;
pub mod error;
pub mod fields;
pub mod types;

pub use bounds::{BoundsError, OverlayBounds};
pub use client::{HttpWorkerClient, MapWorker};
pub use error::{ValidationError, WorkerError, WorkerResult};
pub use fields::{normalize_date, validate_hour, validate_point, Hour, PressureLevel};
pub use types::{RenderRequest, RenderResponse, SampleRequest, SampleResponse};
