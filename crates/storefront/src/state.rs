//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::scene::Scene;
use crate::services::{AssetLoader, SimulatedAuthService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; everything inside is immutable. Per-visitor
/// state (cart, signed-in user) lives in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    auth: SimulatedAuthService,
    assets: AssetLoader,
    scene: Scene,
}

impl AppState {
    /// Create application state with the built-in catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    /// Create application state with an explicit catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let auth = SimulatedAuthService::new(config.simulated_latency);
        let assets = AssetLoader::new(
            config.models_dir.clone(),
            config.asset_cache_capacity,
            config.asset_load_timeout,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                assets,
                scene: Scene::landing(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &SimulatedAuthService {
        &self.inner.auth
    }

    /// Get a reference to the model asset loader.
    #[must_use]
    pub fn assets(&self) -> &AssetLoader {
        &self.inner.assets
    }

    /// Get a reference to the landing-page scroll scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.inner.scene
    }
}
