//! Scroll section classification and the landing-page model choreography.
//!
//! The landing page has three regions. As the visitor scrolls, exactly one
//! staged model is foregrounded per region and the outgoing model fades out
//! before the incoming one fades in. Classification is a plain threshold
//! test on every update, with no hysteresis: hovering on a boundary can flip
//! the section back and forth.
//!
//! `static/js/scene.js` runs the same classification in the browser on each
//! scroll event. `GET /api/scene/frame?p=&from=` answers from
//! [`ScrollCoordinator`] directly, so the two can be checked against each
//! other.

use aitoy_core::{ModelKind, PresentationContext};
use serde::{Deserialize, Serialize};

use super::keyframes::{Keyframes, Motion, MotionCurves};
use super::presentation::{ModelViewport, Placement};

/// Normalised scroll position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ScrollFraction(f64);

impl ScrollFraction {
    /// Top of the document.
    pub const TOP: Self = Self(0.0);

    /// Clamp `value` into `[0, 1]`; NaN reads as the top.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::TOP
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The clamped value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Named page region derived from scroll fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollSection {
    Hero,
    Text,
    Products,
}

impl ScrollSection {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Text => "text",
            Self::Products => "products",
        }
    }
}

/// Boundaries between sections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionThresholds {
    /// First fraction classified as [`ScrollSection::Text`].
    pub text_from: f64,
    /// First fraction classified as [`ScrollSection::Products`].
    pub products_from: f64,
}

impl Default for SectionThresholds {
    fn default() -> Self {
        Self {
            text_from: 0.25,
            products_from: 0.65,
        }
    }
}

impl SectionThresholds {
    /// Classify a scroll position.
    #[must_use]
    pub fn classify(&self, fraction: ScrollFraction) -> ScrollSection {
        let p = fraction.get();
        if p < self.text_from {
            ScrollSection::Hero
        } else if p < self.products_from {
            ScrollSection::Text
        } else {
            ScrollSection::Products
        }
    }
}

/// A change of foregrounded section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionChange {
    pub from: ScrollSection,
    pub to: ScrollSection,
}

/// Tracks the current section and reports transitions.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    thresholds: SectionThresholds,
    current: ScrollSection,
}

impl ScrollCoordinator {
    /// Start at the top of the page.
    #[must_use]
    pub fn new(thresholds: SectionThresholds) -> Self {
        Self {
            current: thresholds.classify(ScrollFraction::TOP),
            thresholds,
        }
    }

    /// Resume from a section the client is already showing.
    #[must_use]
    pub const fn resume(thresholds: SectionThresholds, current: ScrollSection) -> Self {
        Self {
            thresholds,
            current,
        }
    }

    /// The section currently foregrounded.
    #[must_use]
    pub const fn current(&self) -> ScrollSection {
        self.current
    }

    /// Feed one scroll update; returns the transition if the section changed.
    pub fn observe(&mut self, fraction: ScrollFraction) -> Option<SectionChange> {
        let next = self.thresholds.classify(fraction);
        if next == self.current {
            return None;
        }
        let change = SectionChange {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(change)
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(SectionThresholds::default())
    }
}

/// Pose a staged model fades from on enter, or to on exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub opacity: f64,
    /// Horizontal offset in CSS pixels.
    pub x: f64,
    pub scale: f64,
}

impl Pose {
    const fn hidden() -> Self {
        Self {
            opacity: 0.0,
            x: 0.0,
            scale: 1.0,
        }
    }
}

/// Enter/exit animation for one staged model.
///
/// The outgoing model finishes its exit before the incoming one enters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossFade {
    pub enter_from: Pose,
    pub exit_to: Pose,
    pub duration_secs: f64,
}

/// The model shown while one section is foregrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub section: ScrollSection,
    /// Classes positioning the overlay within the fixed layer.
    pub anchor_class: &'static str,
    /// Classes sizing the model box.
    pub frame_class: &'static str,
    pub model: ModelViewport,
    pub curves: MotionCurves,
    pub crossfade: CrossFade,
}

/// Full choreography for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub thresholds: SectionThresholds,
    pub stages: Vec<Stage>,
}

/// One sampled instant of the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame<'a> {
    pub progress: ScrollFraction,
    pub section: ScrollSection,
    pub stage: &'a Stage,
    pub motion: Motion,
}

impl Scene {
    /// The landing-page scene: elephant hero, elephant beside the story
    /// text, dino over the product grid.
    #[must_use]
    pub fn landing() -> Self {
        let hero = Stage {
            section: ScrollSection::Hero,
            anchor_class: "absolute inset-0 flex items-center justify-center",
            frame_class: "w-96 h-96",
            model: ModelViewport::new(ModelKind::Elephant, PresentationContext::Hero)
                .placed(Placement::new(2.5, [0.0, -0.5, 0.0])),
            curves: MotionCurves {
                y: Keyframes::new(&[0.0, 0.3], &[0.0, -200.0]),
                scale: Keyframes::new(&[0.0, 0.3], &[1.0, 0.7]),
                opacity: Keyframes::new(&[0.0, 0.25, 0.3], &[1.0, 0.8, 0.0]),
            },
            crossfade: CrossFade {
                enter_from: Pose::hidden(),
                exit_to: Pose::hidden(),
                duration_secs: 0.5,
            },
        };

        let text = Stage {
            section: ScrollSection::Text,
            anchor_class: "absolute right-1/4 top-1/2 transform -translate-y-1/2",
            frame_class: "w-80 h-80",
            model: ModelViewport::new(ModelKind::Elephant, PresentationContext::Card)
                .placed(Placement::new(1.8, [0.0, -0.3, 0.0])),
            curves: MotionCurves {
                y: Keyframes::new(&[0.25, 0.4, 0.7], &[-100.0, 0.0, -100.0]),
                scale: Keyframes::new(&[0.25, 0.4, 0.7], &[0.5, 1.0, 0.8]),
                opacity: Keyframes::new(&[0.25, 0.3, 0.65, 0.7], &[0.0, 1.0, 1.0, 0.0]),
            },
            crossfade: CrossFade {
                enter_from: Pose {
                    x: 100.0,
                    ..Pose::hidden()
                },
                exit_to: Pose {
                    x: -100.0,
                    ..Pose::hidden()
                },
                duration_secs: 0.8,
            },
        };

        let products = Stage {
            section: ScrollSection::Products,
            anchor_class: "absolute left-1/2 top-1/2 transform -translate-x-1/2 -translate-y-1/2",
            frame_class: "w-64 h-64",
            model: ModelViewport::new(ModelKind::Dino, PresentationContext::Card)
                .placed(Placement::new(1.5, [0.0, -0.2, 0.0])),
            curves: MotionCurves {
                y: Keyframes::new(&[0.65, 0.8], &[-50.0, 0.0]),
                scale: Keyframes::new(&[0.65, 0.8], &[0.6, 1.0]),
                opacity: Keyframes::new(&[0.65, 0.75], &[0.0, 1.0]),
            },
            crossfade: CrossFade {
                enter_from: Pose {
                    scale: 0.5,
                    ..Pose::hidden()
                },
                exit_to: Pose {
                    scale: 0.5,
                    ..Pose::hidden()
                },
                duration_secs: 0.8,
            },
        };

        Self {
            thresholds: SectionThresholds::default(),
            stages: vec![hero, text, products],
        }
    }

    /// The stage for a section, if the scene defines one.
    #[must_use]
    pub fn stage(&self, section: ScrollSection) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.section == section)
    }

    /// Sample the scene at `fraction`.
    ///
    /// Returns `None` only if the scene has no stage for the classified
    /// section.
    #[must_use]
    pub fn frame(&self, fraction: ScrollFraction) -> Option<SceneFrame<'_>> {
        let section = self.thresholds.classify(fraction);
        let stage = self.stage(section)?;
        Some(SceneFrame {
            progress: fraction,
            section,
            stage,
            motion: stage.curves.sample(fraction.get()),
        })
    }

    /// A coordinator using this scene's thresholds, starting at the top.
    #[must_use]
    pub fn coordinator(&self) -> ScrollCoordinator {
        ScrollCoordinator::new(self.thresholds)
    }

    /// A coordinator using this scene's thresholds, resumed at `current`.
    #[must_use]
    pub const fn coordinator_at(&self, current: ScrollSection) -> ScrollCoordinator {
        ScrollCoordinator::resume(self.thresholds, current)
    }

    /// JSON for the `data-scene` attribute.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
