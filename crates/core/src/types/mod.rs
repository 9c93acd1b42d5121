//! Core types for the AI Toy storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod presentation;
pub mod price;
pub mod theme;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use presentation::{ModelKind, PresentationContext};
pub use price::{CurrencyCode, Price};
pub use theme::{ThemeMode, ThemeModeError};
