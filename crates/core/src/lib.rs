//! AI Toy Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! product identifiers, prices, email addresses, the theme flag, and the
//! tags that select how a toy's 3D model is presented.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no async. This
//! keeps it lightweight and allows the presentation math in the storefront
//! to depend on it without pulling in the web stack.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, themes and model tags

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
