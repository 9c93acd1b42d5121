//! Per-visitor page context: theme, cart and signed-in user.

use aitoy_core::ThemeMode;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::catalog::Catalog;
use crate::middleware::auth::current_user;
use crate::models::{Cart, User, session_keys};
use crate::services::theme::{CookieStorage, ThemeStore, preferred_scheme};
use crate::state::AppState;

/// Extractor for the visitor's current theme.
///
/// Reads the `theme` cookie, falling back to the color scheme client hint.
#[derive(Debug, Clone, Copy)]
pub struct Theme(pub ThemeMode);

impl<S> FromRequestParts<S> for Theme
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store = ThemeStore::new(CookieStorage::from_headers(&parts.headers));
        Ok(Self(store.current(preferred_scheme(&parts.headers))))
    }
}

/// Everything the shared page layout needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub user: Option<User>,
    pub cart_count: u32,
    pub theme: ThemeMode,
}

impl PageContext {
    /// Whether the dark theme is active.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Label for the theme toggle button.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if self.theme.is_dark() {
            "Switch to light mode"
        } else {
            "Switch to dark mode"
        }
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Theme(theme) = Theme::from_request_parts(parts, state).await?;
        let (user, cart_count) = match parts.extensions.get::<Session>() {
            Some(session) => (
                current_user(session).await,
                load_cart(session, state.catalog()).await.total_items(),
            ),
            None => (None, 0),
        };

        Ok(Self {
            user,
            cart_count,
            theme,
        })
    }
}

// =============================================================================
// Cart Session Helpers
// =============================================================================

/// Load the visitor's cart, dropping lines no longer in the catalog.
///
/// A missing or unreadable cart reads as empty.
pub async fn load_cart(session: &Session, catalog: &Catalog) -> Cart {
    let mut cart = match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read cart from session: {e}");
            Cart::default()
        }
    };

    let dropped = cart.retain_known(catalog);
    if dropped > 0 {
        tracing::debug!(dropped, "dropped cart lines for unknown products");
    }
    cart
}

/// Save the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}
