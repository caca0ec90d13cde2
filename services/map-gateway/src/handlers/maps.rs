//! Overlay and point-sample handlers.
//!
//! The two routes handle worker failure differently on purpose. A failed
//! render is replaced by a placeholder overlay so the map always has
//! something to draw. A failed sample is reported to the caller, because a
//! made-up value at a point would be indistinguishable from real data.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Extension, Json};
use tracing::{debug, info, warn};
use worker_protocol::{RenderRequest, RenderResponse, SampleRequest, SampleResponse};

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::forward::with_deadline;
use crate::metrics;
use crate::placeholder;
use crate::state::AppState;

/// POST /api/maps/generate
///
/// Always answers 200: either the worker's overlay, unchanged, or the
/// placeholder.
pub async fn generate_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Json<RenderResponse> {
    metrics::record_request("generate");

    let mut request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed render request, serving placeholder");
            metrics::record_fallback("malformed_request");
            return Json(placeholder::overlay(&rejection.body_text()));
        }
    };

    if let Err(e) = request.normalize() {
        warn!(error = %e, "Invalid render request, serving placeholder");
        metrics::record_fallback("invalid_request");
        return Json(placeholder::overlay(&e.to_string()));
    }

    note_uncatalogued(&state.catalog, &request.source, &request.variable);
    info!(
        source = %request.source,
        variable = %request.variable,
        "Forwarding render request"
    );

    let deadline = state.config.generate_timeout;
    match with_deadline("render", deadline, state.worker.render(&request)).await {
        Ok(response) => Json(response),
        Err(e) => {
            warn!(
                error = %e,
                kind = e.kind(),
                source = %request.source,
                variable = %request.variable,
                "Render failed, serving placeholder"
            );
            metrics::record_fallback(e.kind());
            Json(placeholder::overlay(&e.to_string()))
        }
    }
}

/// POST /api/maps/sample
///
/// 400 for requests that cannot be forwarded, 502 when the worker fails.
pub async fn sample_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<SampleRequest>, JsonRejection>,
) -> Result<Json<SampleResponse>, ApiError> {
    metrics::record_request("sample");

    let Json(mut request) = payload.map_err(|r| ApiError::MalformedRequest(r.body_text()))?;
    request.normalize()?;

    note_uncatalogued(&state.catalog, &request.source, &request.variable);
    info!(
        lat = request.lat,
        lon = request.lon,
        source = %request.source,
        variable = %request.variable,
        "Forwarding sample request"
    );

    let deadline = state.config.sample_timeout;
    let response = with_deadline("sample", deadline, state.worker.sample(&request))
        .await
        .map_err(|e| {
            warn!(error = %e, kind = e.kind(), "Sample failed");
            ApiError::from(e)
        })?;

    Ok(Json(response))
}

/// The worker decides what it can decode; unknown names are only logged.
fn note_uncatalogued(catalog: &Catalog, source: &str, variable: &str) {
    if catalog.source(source).is_none() {
        debug!(source, "Source not in catalog, forwarding anyway");
    }
    if catalog.variable(variable).is_none() {
        debug!(variable, "Variable not in catalog, forwarding anyway");
    }
}
