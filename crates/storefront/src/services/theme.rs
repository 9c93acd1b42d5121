//! Light/dark theme persistence.
//!
//! The visitor's choice is kept client-side in a long-lived `theme` cookie so
//! it survives reloads and server restarts. Reads go through
//! [`ThemeStorage`] so the same store logic runs against request cookies in
//! production and a plain map in tests.

use std::collections::HashMap;

use aitoy_core::ThemeMode;
use axum::http::{HeaderMap, HeaderValue, header};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

/// Storage key (cookie name) for the theme.
pub const THEME_KEY: &str = "theme";

/// Client hint carrying the OS-level color scheme preference.
pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

/// How long the theme cookie lives.
const THEME_COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Key/value storage that persists across page loads.
pub trait ThemeStorage {
    /// Read the raw stored value.
    fn read(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`.
    fn write(&mut self, key: &str, value: &str);
}

/// Reads and flips the theme over some [`ThemeStorage`].
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
}

impl<S: ThemeStorage> ThemeStore<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The current mode.
    ///
    /// A stored value wins. A stored value that is not `light` or `dark`
    /// reads as light. With nothing stored, `preferred` decides.
    pub fn current(&self, preferred: Option<ThemeMode>) -> ThemeMode {
        match self.storage.read(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(value = %raw, "unrecognised stored theme; using light");
                ThemeMode::Light
            }),
            None => preferred.unwrap_or_default(),
        }
    }

    /// Flip the mode, persist it and return the new value.
    pub fn toggle(&mut self, preferred: Option<ThemeMode>) -> ThemeMode {
        let next = self.current(preferred).toggled();
        self.storage.write(THEME_KEY, next.as_str());
        next
    }

    /// Borrow the storage backend.
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

/// Parse the color scheme client hint (`"dark"` / `"light"`, quoted).
#[must_use]
pub fn preferred_scheme(headers: &HeaderMap) -> Option<ThemeMode> {
    headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().trim_matches('"').parse().ok())
}

// =============================================================================
// Cookie Storage
// =============================================================================

/// [`ThemeStorage`] over the request's `Cookie` headers.
///
/// Writes are buffered and emitted as `Set-Cookie` headers by
/// [`CookieStorage::set_cookie_headers`].
#[derive(Debug, Default)]
pub struct CookieStorage {
    incoming: HashMap<String, String>,
    outgoing: Vec<Cookie<'static>>,
}

impl CookieStorage {
    /// Collect cookies sent with the request.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let incoming = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .map(|c| (c.name().to_owned(), c.value().to_owned()))
            .collect();

        Self {
            incoming,
            outgoing: Vec::new(),
        }
    }

    /// `Set-Cookie` values for every write.
    #[must_use]
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.outgoing
            .iter()
            .filter_map(|c| HeaderValue::from_str(&c.to_string()).ok())
            .collect()
    }
}

impl ThemeStorage for CookieStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.incoming.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        let cookie = Cookie::build((key.to_owned(), value.to_owned()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(Duration::days(THEME_COOKIE_MAX_AGE_DAYS))
            .build();
        self.incoming.insert(key.to_owned(), value.to_owned());
        self.outgoing.push(cookie);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Storage that outlives the store, like the browser outlives a page.
    #[derive(Debug, Default, Clone)]
    struct MemoryStorage(HashMap<String, String>);

    impl ThemeStorage for MemoryStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn write(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_owned(), value.to_owned());
        }
    }

    #[test]
    fn test_toggle_survives_reload() {
        let mut store = ThemeStore::new(MemoryStorage::default());
        assert_eq!(store.current(None), ThemeMode::Light);
        assert_eq!(store.toggle(None), ThemeMode::Dark);

        // "reload": a fresh store over the same persisted storage
        let reloaded = ThemeStore::new(store.storage().clone());
        assert_eq!(reloaded.current(None), ThemeMode::Dark);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut store = ThemeStore::new(MemoryStorage::default());
        store.toggle(None);
        assert_eq!(store.toggle(None), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_stored_value_reads_light() {
        let mut storage = MemoryStorage::default();
        storage.write(THEME_KEY, "sepia");
        let store = ThemeStore::new(storage);
        assert_eq!(store.current(Some(ThemeMode::Dark)), ThemeMode::Light);
    }

    #[test]
    fn test_preference_applies_only_when_unset() {
        let store = ThemeStore::new(MemoryStorage::default());
        assert_eq!(store.current(Some(ThemeMode::Dark)), ThemeMode::Dark);

        let mut storage = MemoryStorage::default();
        storage.write(THEME_KEY, "light");
        assert_eq!(
            ThemeStore::new(storage).current(Some(ThemeMode::Dark)),
            ThemeMode::Light
        );
    }

    #[test]
    fn test_cookie_storage_reads_request_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("aitoy_session=abc; theme=dark"),
        );
        let store = ThemeStore::new(CookieStorage::from_headers(&headers));
        assert_eq!(store.current(None), ThemeMode::Dark);
    }

    #[test]
    fn test_cookie_storage_emits_set_cookie() {
        let mut store = ThemeStore::new(CookieStorage::from_headers(&HeaderMap::new()));
        store.toggle(None);
        let headers = store.storage().set_cookie_headers();
        assert_eq!(headers.len(), 1);
        let value = headers.first().unwrap().to_str().unwrap();
        assert!(value.starts_with("theme=dark"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=31536000"));
    }

    #[test]
    fn test_color_scheme_hint() {
        let mut headers = HeaderMap::new();
        assert_eq!(preferred_scheme(&headers), None);
        headers.insert(COLOR_SCHEME_HINT, HeaderValue::from_static("\"dark\""));
        assert_eq!(preferred_scheme(&headers), Some(ThemeMode::Dark));
        headers.insert(COLOR_SCHEME_HINT, HeaderValue::from_static("no-preference"));
        assert_eq!(preferred_scheme(&headers), None);
    }
}
