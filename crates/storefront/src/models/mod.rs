//! Per-visitor domain models kept in the session.

pub mod cart;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine, CartSummary};
pub use session as session_keys;
pub use user::User;
