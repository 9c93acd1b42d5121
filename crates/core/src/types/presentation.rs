//! Tags that select how a toy's 3D model is staged.
//!
//! Each catalog entry carries an explicit [`ModelKind`]; the storefront never
//! guesses the kind from the asset path.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which toy a 3D asset depicts.
///
/// The kind selects a scale/position/rotation correction profile, since the
/// source assets were authored at very different sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Elephant,
    Dino,
}

impl ModelKind {
    /// Path of the model's scene file, relative to the models mount.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::Elephant => "/models/stuffed_elephant_develeopment_phase_ii/scene.gltf",
            Self::Dino => "/models/stuffed_dino_toy/scene.gltf",
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elephant => "elephant",
            Self::Dino => "dino",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where on a page a model is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationContext {
    /// Large, interactive landing-page model.
    #[default]
    Hero,
    /// Small thumbnail inside a product card.
    Card,
    /// Product detail and informational pages.
    Detail,
}

impl PresentationContext {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Card => "card",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for PresentationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
