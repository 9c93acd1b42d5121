//! 3D model file serving.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Serve a model file through the cached, cancellable loader.
///
/// If the client disconnects, this future is dropped along with its
/// [`crate::services::AssetLoad`], which aborts the read.
#[instrument(skip(state))]
pub async fn model(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse> {
    let asset = state.assets().load(&path)?.wait().await?;
    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        asset.bytes,
    ))
}
