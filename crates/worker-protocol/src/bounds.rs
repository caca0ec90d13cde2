//! Overlay bounding boxes.

use serde::{Deserialize, Serialize};

/// Two-corner geographic rectangle in degrees, south-west then north-east.
///
/// On the wire this is `[[lat_min, lon_min], [lat_max, lon_max]]`, the shape
/// the map client hands straight to its image-overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct OverlayBounds {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl OverlayBounds {
    /// Create a new bounding box from corner coordinates.
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        }
    }

    /// The whole globe.
    pub fn global() -> Self {
        Self::new(-90.0, -180.0, 90.0, 180.0)
    }

    /// Check corner ordering and coordinate ranges.
    pub fn validate(&self) -> Result<(), BoundsError> {
        let corners = [self.lat_min, self.lon_min, self.lat_max, self.lon_max];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(BoundsError::NotFinite);
        }
        for lat in [self.lat_min, self.lat_max] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(BoundsError::LatitudeOutOfRange(lat));
            }
        }
        for lon in [self.lon_min, self.lon_max] {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(BoundsError::LongitudeOutOfRange(lon));
            }
        }
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return Err(BoundsError::InvertedCorners);
        }
        Ok(())
    }

    /// Check if a point is contained within these bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

impl From<[[f64; 2]; 2]> for OverlayBounds {
    fn from([[lat_min, lon_min], [lat_max, lon_max]]: [[f64; 2]; 2]) -> Self {
        Self::new(lat_min, lon_min, lat_max, lon_max)
    }
}

impl From<OverlayBounds> for [[f64; 2]; 2] {
    fn from(b: OverlayBounds) -> Self {
        [[b.lat_min, b.lon_min], [b.lat_max, b.lon_max]]
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("Bounds contain a non-finite coordinate")]
    NotFinite,

    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),

    #[error("South-west corner must not lie north or east of the north-east corner")]
    InvertedCorners,
}
