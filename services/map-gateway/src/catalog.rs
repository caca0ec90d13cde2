//! Catalog of data sources, variables and pressure levels.
//!
//! The browser uses this to populate its selectors. Entries are advisory:
//! requests naming anything else are still forwarded to the worker, which
//! remains the authority on what it can decode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog loaded from YAML, or the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_sources")]
    pub sources: Vec<DataSource>,

    #[serde(default = "default_variables")]
    pub variables: Vec<VariableInfo>,

    #[serde(default = "default_pressure_levels")]
    pub pressure_levels: Vec<PressureLevelInfo>,
}

/// Gridded analysis product the worker can read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Identifier sent as `source` (e.g. "RTMA").
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Whether requests may carry a `pressure_level`.
    #[serde(default)]
    pub has_pressure_levels: bool,
}

/// Physical variable and the display units the worker converts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub id: String,
    pub name: String,
    pub units: String,
}

impl VariableInfo {
    /// Selector label, e.g. "Temperature (°F)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.units)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureLevelInfo {
    /// Millibars; 0 is the surface.
    pub level: i32,
    pub label: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            variables: default_variables(),
            pressure_levels: default_pressure_levels(),
        }
    }
}

impl Catalog {
    /// Load the catalog from `path`, falling back to the built-in catalog
    /// when no path is given or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Catalog file does not exist, using built-in catalog"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let catalog = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse catalog: {:?}", path))?;

        tracing::info!(
            sources = catalog.sources.len(),
            variables = catalog.variables.len(),
            pressure_levels = catalog.pressure_levels.len(),
            "Loaded catalog from {:?}",
            path
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn source(&self, id: &str) -> Option<&DataSource> {
        self.sources.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn variable(&self, id: &str) -> Option<&VariableInfo> {
        self.variables.iter().find(|v| v.id == id)
    }
}

fn source(id: &str, name: &str, has_pressure_levels: bool) -> DataSource {
    DataSource {
        id: id.to_string(),
        name: name.to_string(),
        has_pressure_levels,
    }
}

fn variable(id: &str, name: &str, units: &str) -> VariableInfo {
    VariableInfo {
        id: id.to_string(),
        name: name.to_string(),
        units: units.to_string(),
    }
}

fn level(level: i32, label: &str) -> PressureLevelInfo {
    PressureLevelInfo {
        level,
        label: label.to_string(),
    }
}

fn default_sources() -> Vec<DataSource> {
    vec![
        source("RTMA", "RTMA 2.5km Surface", false),
        source("RTMA-PRES", "RTMA 2.5km Pressure Levels", true),
        source("3DRTMA", "3D-RTMA Pressure Levels", true),
    ]
}

fn default_variables() -> Vec<VariableInfo> {
    vec![
        variable("GUST", "Wind Gust", "mph"),
        variable("UGRD", "U-Component Wind", "mph"),
        variable("VGRD", "V-Component Wind", "mph"),
        variable("WIND", "Wind Speed", "mph"),
        variable("TMP", "Temperature", "°F"),
        variable("DPT", "Dew Point", "°F"),
        variable("RH", "Relative Humidity", "%"),
        variable("PRES", "Pressure", "hPa"),
        variable("PRMSL", "Sea Level Pressure", "hPa"),
        variable("APCP", "Precipitation", "mm"),
        variable("VIS", "Visibility", "km"),
        variable("TCDC", "Total Cloud Cover", "%"),
        variable("HGT", "Geopotential Height", "m"),
    ]
}

fn default_pressure_levels() -> Vec<PressureLevelInfo> {
    vec![
        level(0, "Surface Level"),
        level(50, "50 mb (~20 km, Lower Stratosphere)"),
        level(100, "100 mb (~16 km, Tropopause)"),
        level(200, "200 mb (~12 km, Upper Troposphere)"),
        level(300, "300 mb (~9 km, Jet Stream Level)"),
        level(500, "500 mb (~5.5 km, Mid-Troposphere)"),
        level(700, "700 mb (~3 km, Lower Troposphere)"),
        level(850, "850 mb (~1.5 km, Boundary Layer)"),
        level(925, "925 mb (~750 m, Near Surface)"),
        level(1000, "1000 mb (Sea Level)"),
    ]
}
