//! Common test fixtures for gateway and worker-client tests.
//!
//! Payloads are plain `serde_json::Value`s so this crate stays independent
//! of the protocol types it is used to test.

use serde_json::{json, Value};

/// Bounding boxes as `[[lat_min, lon_min], [lat_max, lon_max]]`.
pub mod bounds {
    /// The whole globe (used by the placeholder overlay).
    pub const GLOBAL: [[f64; 2]; 2] = [[-90.0, -180.0], [90.0, 180.0]];

    /// What the proof-of-concept worker reports for every render.
    pub const WORKER_DEFAULT: [[f64; 2]; 2] = [[-60.0, -140.0], [70.0, -30.0]];

    /// South-west corner north of the north-east corner.
    pub const INVERTED: [[f64; 2]; 2] = [[50.0, -100.0], [20.0, -60.0]];
}

/// Image the gateway substitutes when the worker cannot render.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/800x600.png?text=placeholder+overlay";

/// Minimal render request a browser sends.
pub fn render_request() -> Value {
    json!({"source": "3drtma", "variable": "temp"})
}

/// Render request carrying every optional field the browser form offers.
pub fn render_request_full() -> Value {
    json!({
        "source": "3DRTMA",
        "variable": "TMP",
        "date": "2025-08-14",
        "hour": 20,
        "pressure_level": "850",
        "opacity": 0.6
    })
}

/// Sample request for a point in Kansas.
pub fn sample_request() -> Value {
    json!({"lat": 39.0, "lon": -98.0, "source": "3drtma", "variable": "temp"})
}

/// Render response in the shape the worker returns.
pub fn render_response(variable: &str) -> Value {
    json!({
        "image_url": format!("https://via.placeholder.com/1024x768.png?text=3DRTMA+{}", variable),
        "bounds": bounds::WORKER_DEFAULT,
        "source": "python-worker-placeholder",
        "generated_at": "2025-08-14T20:00:00Z"
    })
}

/// Value the proof-of-concept worker reports at a point (Kelvin).
pub fn sample_value(lat: f64, lon: f64) -> f64 {
    let raw = 280.0 + lat * 0.01 + lon * 0.005;
    (raw * 100.0).round() / 100.0
}

/// Sample response in the shape the worker returns.
pub fn sample_response(lat: f64, lon: f64) -> Value {
    json!({
        "value": sample_value(lat, lon),
        "units": "K",
        "lat": lat,
        "lon": lon,
        "location": "POC location"
    })
}
