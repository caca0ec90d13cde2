//! Catalog discovery handlers.

use std::sync::Arc;

use axum::{Extension, Json};
use serde::Serialize;

use crate::catalog::{DataSource, PressureLevelInfo};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<DataSource>,
}

#[derive(Debug, Serialize)]
pub struct VariableEntry {
    pub id: String,
    pub name: String,
    pub units: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct VariablesResponse {
    pub variables: Vec<VariableEntry>,
}

#[derive(Debug, Serialize)]
pub struct PressureLevelsResponse {
    pub levels: Vec<PressureLevelInfo>,
}

/// GET /api/maps/sources
pub async fn sources_handler(Extension(state): Extension<Arc<AppState>>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.catalog.sources.clone(),
    })
}

/// GET /api/maps/variables
pub async fn variables_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<VariablesResponse> {
    let variables = state
        .catalog
        .variables
        .iter()
        .map(|v| VariableEntry {
            id: v.id.clone(),
            name: v.name.clone(),
            units: v.units.clone(),
            label: v.label(),
        })
        .collect();

    Json(VariablesResponse { variables })
}

/// GET /api/maps/pressure-levels
pub async fn pressure_levels_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<PressureLevelsResponse> {
    Json(PressureLevelsResponse {
        levels: state.catalog.pressure_levels.clone(),
    })
}
