//! Scroll scene description for the browser-side animation script.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::scene::{SceneFrame, ScrollFraction, ScrollSection, SectionChange};
use crate::state::AppState;

/// Query for a sampled frame.
#[derive(Debug, Deserialize)]
pub struct FrameQuery {
    /// Scroll fraction; clamped to `[0, 1]`.
    #[serde(default)]
    pub p: f64,
    /// Section the client currently shows. Defaults to the top of the page.
    pub from: Option<ScrollSection>,
}

/// A sampled frame plus the section transition it causes, if any.
#[derive(Debug, Serialize)]
pub struct FrameResponse<'a> {
    #[serde(flatten)]
    pub frame: SceneFrame<'a>,
    pub change: Option<SectionChange>,
}

/// Full landing scene: thresholds, stages and their curves.
#[instrument(skip(state))]
pub async fn scene(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.scene().clone())
}

/// One frame of the scene sampled at `?p=`, with the transition from
/// `?from=` when the scroll crosses a section boundary.
#[instrument(skip(state))]
pub async fn frame(
    State(state): State<AppState>,
    Query(query): Query<FrameQuery>,
) -> Result<Response> {
    let scene = state.scene();
    let fraction = ScrollFraction::new(query.p);
    let frame = scene
        .frame(fraction)
        .ok_or_else(|| AppError::Internal(format!("no stage at p={}", fraction.get())))?;

    let mut coordinator = query
        .from
        .map_or_else(|| scene.coordinator(), |current| scene.coordinator_at(current));
    let change = coordinator.observe(fraction);

    Ok(Json(FrameResponse { frame, change }).into_response())
}
