//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span)
//! 4. Security headers
//! 5. Session layer (tower-sessions, in-memory store)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod visitor;

pub use auth::{OptionalAuth, clear_current_user, set_current_user};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use visitor::{PageContext, Theme, load_cart, save_cart};
