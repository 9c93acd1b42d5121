//! Session keys for per-visitor state.

/// Key for the signed-in [`User`](super::User).
pub const CURRENT_USER: &str = "current_user";

/// Key for the visitor's [`Cart`](super::Cart).
pub const CART: &str = "cart";
