//! Theme toggle route.

use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use tracing::instrument;

use crate::services::theme::preferred_scheme;
use crate::services::{CookieStorage, ThemeStore};
use crate::state::AppState;

/// Flip the theme, persist it in the `theme` cookie and go back.
#[instrument(skip(state, headers))]
pub async fn toggle(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let mut store = ThemeStore::new(CookieStorage::from_headers(&headers));
    let mode = store.toggle(preferred_scheme(&headers));
    tracing::debug!(theme = %mode, "theme toggled");

    let cookies = store
        .storage()
        .set_cookie_headers()
        .into_iter()
        .map(|value| (header::SET_COOKIE, value));
    let target = return_path(&headers, &state.config().base_url);

    (AppendHeaders(cookies), Redirect::to(&target))
}

/// Same-site path to return to after the toggle.
///
/// The `Referer` is accepted when it is a local path or lies under
/// `base_url`; anything else goes home.
fn return_path(headers: &HeaderMap, base_url: &str) -> String {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return "/".to_string();
    };

    let path = referer
        .strip_prefix(base_url.trim_end_matches('/'))
        .unwrap_or(referer);

    if path.starts_with('/') && !path.starts_with("//") {
        path.to_string()
    } else {
        "/".to_string()
    }
}
