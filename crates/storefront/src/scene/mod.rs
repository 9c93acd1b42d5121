//! Server-side model of the 3D toy presentation.
//!
//! The browser only draws what this module computes: placement per model
//! kind and page context, scroll-bound motion curves, and the landing-page
//! section choreography.

pub mod keyframes;
pub mod presentation;
pub mod scroll;

pub use keyframes::{Keyframes, Motion, MotionCurves};
pub use presentation::{
    AutoRotate, Camera, Entrance, ModelViewport, PARALLAX_CURVES, Placement, ScrollBinding,
    container_class, resolve_placement,
};
pub use scroll::{
    CrossFade, Pose, Scene, SceneFrame, ScrollCoordinator, ScrollFraction, ScrollSection,
    SectionChange, SectionThresholds, Stage,
};
