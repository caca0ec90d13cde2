//! Fixed overlay served when the worker cannot render.

use serde_json::Map;
use worker_protocol::{OverlayBounds, RenderResponse};

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/800x600.png?text=placeholder+overlay";
pub const PLACEHOLDER_SOURCE: &str = "placeholder";

/// Placeholder overlay covering the whole globe.
///
/// `reason` ends up in `info` so the map client can tell the user why real
/// data is missing; it is never empty.
pub fn overlay(reason: &str) -> RenderResponse {
    let reason = reason.trim();
    let info = if reason.is_empty() {
        "Worker unavailable; showing placeholder overlay".to_string()
    } else {
        format!("Worker unavailable; showing placeholder overlay ({})", reason)
    };

    RenderResponse {
        image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        bounds: OverlayBounds::global(),
        source: PLACEHOLDER_SOURCE.to_string(),
        extra: Map::new(),
    }
    .with_info(info)
}
