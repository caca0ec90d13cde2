//! Wire types exchanged with the worker.
//!
//! Every type keeps unknown JSON members in an `extra` map so fields the
//! gateway does not interpret still travel to the worker, and fields the
//! worker adds still travel back to the browser.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bounds::OverlayBounds;
use crate::error::ValidationError;
use crate::fields::{normalize_date, validate_point, Hour, PressureLevel};

/// Which dataset and physical variable to render as an overlay image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Data source identifier (e.g. "RTMA", "3DRTMA").
    pub source: String,

    /// Variable identifier (e.g. "TMP", "DPT").
    pub variable: String,

    /// Analysis date, `YYYY-MM-DD` or `YYYYMMDD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Analysis hour (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<Hour>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_level: Option<PressureLevel>,

    /// Fields passed through to the worker untouched (spatial bounds etc).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderRequest {
    pub fn new(source: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            variable: variable.into(),
            date: None,
            hour: None,
            pressure_level: None,
            extra: Map::new(),
        }
    }

    /// Rewrite the date into the worker's format. Hour and pressure level
    /// are already checked when the request is parsed.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        normalize_date_field(&mut self.date)
    }
}

/// Where the worker put the rendered overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub image_url: String,
    pub bounds: OverlayBounds,
    pub source: String,
    /// Everything else the worker sent, `info` included, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderResponse {
    /// Human-readable note attached to the overlay, if any.
    pub fn info(&self) -> Option<&str> {
        self.extra.get("info").and_then(Value::as_str)
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.extra.insert("info".to_string(), Value::String(info.into()));
        self
    }
}

/// Point query against a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRequest {
    pub lat: f64,
    pub lon: f64,
    pub source: String,
    pub variable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<Hour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_level: Option<PressureLevel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SampleRequest {
    pub fn new(lat: f64, lon: f64, source: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            source: source.into(),
            variable: variable.into(),
            date: None,
            hour: None,
            pressure_level: None,
            extra: Map::new(),
        }
    }

    /// Check the point and rewrite the date into the worker's format.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        validate_point(self.lat, self.lon)?;
        normalize_date_field(&mut self.date)
    }
}

/// Value read at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResponse {
    /// `None` when the point is outside coverage; serialized as `null`.
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn normalize_date_field(date: &mut Option<String>) -> Result<(), ValidationError> {
    if let Some(d) = date.as_deref() {
        *date = Some(normalize_date(d)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_request_minimal() {
        let req: RenderRequest =
            serde_json::from_value(json!({"source": "3drtma", "variable": "temp"})).unwrap();
        assert_eq!(req, RenderRequest::new("3drtma", "temp"));

        // Absent optionals are not invented on the way out
        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out, json!({"source": "3drtma", "variable": "temp"}));
    }

    #[test]
    fn test_render_request_passes_unknown_fields() {
        let req: RenderRequest = serde_json::from_value(json!({
            "source": "RTMA",
            "variable": "TMP",
            "bbox": [-125.0, 24.0, -66.0, 50.0],
            "opacity": 0.6
        }))
        .unwrap();
        assert_eq!(req.extra.len(), 2);

        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["bbox"], json!([-125.0, 24.0, -66.0, 50.0]));
        assert_eq!(out["opacity"], json!(0.6));
    }

    #[test]
    fn test_render_request_requires_source_and_variable() {
        assert!(serde_json::from_value::<RenderRequest>(json!({"variable": "TMP"})).is_err());
        assert!(serde_json::from_value::<RenderRequest>(json!({"source": "RTMA"})).is_err());
    }

    #[test]
    fn test_render_request_normalize() {
        let mut req: RenderRequest = serde_json::from_value(json!({
            "source": "3DRTMA",
            "variable": "TMP",
            "date": "2025-08-14",
            "hour": 20,
            "pressure_level": "850"
        }))
        .unwrap();
        req.normalize().unwrap();

        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["date"], "20250814");
        assert_eq!(out["hour"], 20);
        assert_eq!(out["pressure_level"], 850);
    }

    #[test]
    fn test_render_request_numeric_string_hour() {
        let req: RenderRequest = serde_json::from_value(json!({
            "source": "RTMA",
            "variable": "TMP",
            "hour": "12"
        }))
        .unwrap();
        assert_eq!(req.hour.map(|h| h.value()), Some(12));
        assert_eq!(serde_json::to_value(&req).unwrap()["hour"], 12);
    }

    #[test]
    fn test_request_rejects_hour_out_of_range() {
        let body = json!({"source": "RTMA", "variable": "TMP", "hour": 24});
        assert!(serde_json::from_value::<RenderRequest>(body).is_err());

        let body = json!({"lat": 39.0, "lon": -98.0, "source": "RTMA", "variable": "TMP", "hour": "25"});
        assert!(serde_json::from_value::<SampleRequest>(body).is_err());
    }

    #[test]
    fn test_render_response_keeps_worker_fields() {
        let body = json!({
            "image_url": "https://via.placeholder.com/1024x768.png?text=3DRTMA+TMP",
            "bounds": [[-60.0, -140.0], [70.0, -30.0]],
            "source": "python-worker-placeholder",
            "generated_at": "2025-08-14T20:00:00Z"
        });
        let resp: RenderResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(resp.bounds, OverlayBounds::new(-60.0, -140.0, 70.0, -30.0));
        assert!(resp.info().is_none());
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }

    #[test]
    fn test_render_response_keeps_null_info() {
        let body = json!({
            "image_url": "https://example.com/overlay.png",
            "bounds": [[20.0, -130.0], [55.0, -60.0]],
            "source": "worker",
            "info": null
        });
        let resp: RenderResponse = serde_json::from_value(body.clone()).unwrap();
        assert!(resp.info().is_none());
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }

    #[test]
    fn test_sample_request_normalize_rejects_point() {
        let mut req = SampleRequest::new(120.0, -98.0, "3drtma", "temp");
        assert_eq!(req.normalize(), Err(ValidationError::InvalidLatitude(120.0)));
    }

    #[test]
    fn test_sample_response_null_value_is_serialized() {
        let resp: SampleResponse = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(resp.value, None);
        assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"value": null}));
    }

    #[test]
    fn test_sample_response_full() {
        let body = json!({
            "value": 280.5,
            "units": "K",
            "lat": 39.0,
            "lon": -98.0,
            "location": "POC location"
        });
        let resp: SampleResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(resp.value, Some(280.5));
        assert_eq!(resp.units.as_deref(), Some("K"));
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }
}
