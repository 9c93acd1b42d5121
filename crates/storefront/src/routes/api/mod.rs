//! JSON API endpoints.

pub mod scene;
