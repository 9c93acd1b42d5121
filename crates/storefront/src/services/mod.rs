//! Services behind the route handlers.
//!
//! - `auth` - sign-in boundary (simulated)
//! - `theme` - light/dark persistence in a cookie
//! - `assets` - cancellable, cached 3D model loading

pub mod assets;
pub mod auth;
pub mod theme;

pub use assets::{Asset, AssetError, AssetLoad, AssetLoader};
pub use auth::{AuthError, AuthService, SimulatedAuthService};
pub use theme::{CookieStorage, ThemeStorage, ThemeStore};
