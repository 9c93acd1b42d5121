//! Per-model, per-context 3D presentation.
//!
//! A [`ModelViewport`] is everything the browser needs to draw one toy: the
//! asset URL, the resolved transform, the container sizing, and optional
//! auto-rotation and scroll binding. It is built on the server and embedded
//! in the page as JSON; `static/js/scene.js` applies it per animation frame
//! (yaw += [`AutoRotate::radians_per_frame`], curves sampled as in
//! [`MotionCurves::sample`]).

use aitoy_core::{ModelKind, PresentationContext};
use serde::Serialize;

use super::keyframes::{Keyframes, MotionCurves};

/// Scale, position and rotation of a model inside its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub scale: f64,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: [0.0; 3],
            rotation: [0.0; 3],
        }
    }
}

impl Placement {
    /// Placement with the given scale and position and no rotation.
    #[must_use]
    pub const fn new(scale: f64, position: [f64; 3]) -> Self {
        Self {
            scale,
            position,
            rotation: [0.0; 3],
        }
    }
}

/// Position and rotation nudges applied for one context.
#[derive(Debug, Clone, Copy)]
struct Nudge {
    position: [f64; 3],
    rotation: [f64; 3],
}

impl Nudge {
    const NONE: Self = Self {
        position: [0.0; 3],
        rotation: [0.0; 3],
    };

    const fn position(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            rotation: [0.0; 3],
        }
    }

    const fn rotation(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [0.0; 3],
            rotation: [x, y, z],
        }
    }
}

/// Correction constants for one asset.
#[derive(Debug, Clone, Copy)]
struct KindProfile {
    scale_factor: f64,
    hero: Nudge,
    card: Nudge,
    detail: Nudge,
}

const fn kind_profile(kind: ModelKind) -> KindProfile {
    match kind {
        ModelKind::Elephant => KindProfile {
            scale_factor: 0.8,
            hero: Nudge::rotation(0.0, 0.2, 0.0),
            card: Nudge::rotation(-0.1, 0.0, 0.0),
            detail: Nudge::position(0.0, -2.0, 0.0),
        },
        // The dino asset is authored roughly ten times smaller.
        ModelKind::Dino => KindProfile {
            scale_factor: 8.0,
            hero: Nudge::rotation(0.0, -0.3, 0.0),
            card: Nudge {
                position: [0.0, 1.9, 0.0],
                rotation: [0.0, 0.1, 0.0],
            },
            detail: Nudge::NONE,
        },
    }
}

const fn context_scale(context: PresentationContext) -> f64 {
    match context {
        PresentationContext::Hero => 1.0,
        PresentationContext::Card => 0.6,
        PresentationContext::Detail => 1.2,
    }
}

/// Tailwind sizing for the viewport container.
#[must_use]
pub const fn container_class(context: PresentationContext) -> &'static str {
    match context {
        PresentationContext::Hero => "w-full h-full",
        PresentationContext::Card => "w-48 h-48 mx-auto",
        PresentationContext::Detail => "w-full h-96",
    }
}

/// Apply the kind and context corrections to a base placement.
#[must_use]
pub fn resolve_placement(
    kind: ModelKind,
    context: PresentationContext,
    base: Placement,
) -> Placement {
    let profile = kind_profile(kind);
    let nudge = match context {
        PresentationContext::Hero => profile.hero,
        PresentationContext::Card => profile.card,
        PresentationContext::Detail => profile.detail,
    };

    Placement {
        scale: base.scale * profile.scale_factor * context_scale(context),
        position: add3(base.position, nudge.position),
        rotation: add3(base.rotation, nudge.rotation),
    }
}

fn add3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    let [ax, ay, az] = a;
    let [bx, by, bz] = b;
    [ax + bx, ay + by, az + bz]
}

/// Perspective camera shared by every viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub position: [f64; 3],
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            fov: 45.0,
        }
    }
}

/// Fade/scale-in played when a viewport mounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Entrance {
    pub from_opacity: f64,
    pub from_scale: f64,
    pub duration_secs: f64,
}

impl Default for Entrance {
    fn default() -> Self {
        Self {
            from_opacity: 0.0,
            from_scale: 0.8,
            duration_secs: 0.8,
        }
    }
}

/// Continuous yaw spin while the viewport is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutoRotate {
    /// Radians added to yaw on every animation frame.
    pub radians_per_frame: f64,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self {
            radians_per_frame: 0.01,
        }
    }
}

impl AutoRotate {
    /// Yaw after `frames` frames starting from `start`.
    #[must_use]
    pub fn yaw_after(&self, start: f64, frames: u32) -> f64 {
        self.radians_per_frame.mul_add(f64::from(frames), start)
    }
}

/// Curves for a viewport that shrinks and fades as the page scrolls.
pub const PARALLAX_CURVES: MotionCurves = MotionCurves {
    y: Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[0.0, -100.0, -200.0, -300.0]),
    scale: Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[1.0, 0.8, 0.6, 0.4]),
    opacity: Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[1.0, 0.9, 0.7, 0.5]),
};

/// Binds a viewport's container to global scroll fraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollBinding {
    pub curves: MotionCurves,
    /// Page section the binding tracks, when that section exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ScrollBinding {
    /// Parallax binding with no tracked section.
    #[must_use]
    pub const fn parallax() -> Self {
        Self {
            curves: PARALLAX_CURVES,
            target: None,
        }
    }

    /// Track `target` if the page declares it.
    ///
    /// A missing section leaves the binding untargeted; the scroll motion
    /// itself is unaffected.
    #[must_use]
    pub fn tracking(mut self, target: &str, page_sections: &[&str]) -> Self {
        if page_sections.contains(&target) {
            self.target = Some(target.to_owned());
        } else {
            tracing::debug!(target_section = target, "scroll target not on page; ignoring");
            self.target = None;
        }
        self
    }
}

/// Everything needed to render one 3D model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelViewport {
    pub kind: ModelKind,
    pub asset_url: &'static str,
    pub context: PresentationContext,
    pub placement: Placement,
    pub container_class: String,
    pub camera: Camera,
    pub entrance: Entrance,
    /// Floating presentation controls (drag to tilt).
    pub interactive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rotate: Option<AutoRotate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollBinding>,
}

impl ModelViewport {
    /// A viewport with the default placement, auto-rotation on.
    #[must_use]
    pub fn new(kind: ModelKind, context: PresentationContext) -> Self {
        Self {
            kind,
            asset_url: kind.asset_path(),
            context,
            placement: resolve_placement(kind, context, Placement::default()),
            container_class: container_class(context).to_owned(),
            camera: Camera::default(),
            entrance: Entrance::default(),
            interactive: context == PresentationContext::Hero,
            auto_rotate: Some(AutoRotate::default()),
            scroll: None,
        }
    }

    /// Replace the base placement (kind/context corrections are reapplied).
    #[must_use]
    pub fn placed(mut self, base: Placement) -> Self {
        self.placement = resolve_placement(self.kind, self.context, base);
        self
    }

    /// Append extra classes to the container.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if !class.is_empty() {
            self.container_class.push(' ');
            self.container_class.push_str(class);
        }
        self
    }

    /// Enable or disable auto-rotation.
    #[must_use]
    pub fn auto_rotate(mut self, enabled: bool) -> Self {
        self.auto_rotate = enabled.then(AutoRotate::default);
        self
    }

    /// Bind the container to page scroll.
    #[must_use]
    pub fn scroll_bound(mut self, binding: ScrollBinding) -> Self {
        self.scroll = Some(binding);
        self
    }

    /// JSON for the `data-viewport` attribute.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx3(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn test_elephant_scale_by_context() {
        let base = Placement::new(2.0, [0.0, -0.5, 0.0]);
        let hero = resolve_placement(ModelKind::Elephant, PresentationContext::Hero, base);
        let card = resolve_placement(ModelKind::Elephant, PresentationContext::Card, base);
        let detail = resolve_placement(ModelKind::Elephant, PresentationContext::Detail, base);
        assert!((hero.scale - 1.6).abs() < EPS);
        assert!((card.scale - 0.96).abs() < EPS);
        assert!((detail.scale - 1.92).abs() < EPS);
    }

    #[test]
    fn test_dino_is_scaled_up() {
        let placed = resolve_placement(
            ModelKind::Dino,
            PresentationContext::Hero,
            Placement::new(1.5, [0.0; 3]),
        );
        assert!((placed.scale - 12.0).abs() < EPS);
    }

    #[test]
    fn test_position_nudges() {
        let base = Placement::new(1.0, [0.0, -0.5, 0.0]);
        let elephant = resolve_placement(ModelKind::Elephant, PresentationContext::Detail, base);
        assert!(approx3(elephant.position, [0.0, -2.5, 0.0]));

        let dino = resolve_placement(ModelKind::Dino, PresentationContext::Card, base);
        assert!(approx3(dino.position, [0.0, 1.4, 0.0]));

        let dino_detail = resolve_placement(ModelKind::Dino, PresentationContext::Detail, base);
        assert!(approx3(dino_detail.position, base.position));
    }

    #[test]
    fn test_rotation_nudges() {
        let base = Placement::default();
        let r = |kind, ctx| resolve_placement(kind, ctx, base).rotation;
        assert!(approx3(r(ModelKind::Elephant, PresentationContext::Hero), [0.0, 0.2, 0.0]));
        assert!(approx3(r(ModelKind::Elephant, PresentationContext::Card), [-0.1, 0.0, 0.0]));
        assert!(approx3(r(ModelKind::Dino, PresentationContext::Hero), [0.0, -0.3, 0.0]));
        assert!(approx3(r(ModelKind::Dino, PresentationContext::Card), [0.0, 0.1, 0.0]));
        assert!(approx3(r(ModelKind::Dino, PresentationContext::Detail), [0.0; 3]));
    }

    #[test]
    fn test_container_classes() {
        let card = ModelViewport::new(ModelKind::Dino, PresentationContext::Card);
        assert_eq!(card.container_class, "w-48 h-48 mx-auto");
        let hero = ModelViewport::new(ModelKind::Elephant, PresentationContext::Hero)
            .with_class("rounded-3xl");
        assert_eq!(hero.container_class, "w-full h-full rounded-3xl");
    }

    #[test]
    fn test_only_hero_is_interactive() {
        assert!(ModelViewport::new(ModelKind::Elephant, PresentationContext::Hero).interactive);
        assert!(!ModelViewport::new(ModelKind::Elephant, PresentationContext::Detail).interactive);
    }

    #[test]
    fn test_auto_rotation_is_monotonic() {
        let rotate = AutoRotate::default();
        let mut previous = rotate.yaw_after(0.0, 0);
        for frame in 1..500 {
            let yaw = rotate.yaw_after(0.0, frame);
            assert!(yaw > previous);
            previous = yaw;
        }
        assert!((AutoRotate::default().yaw_after(0.0, 100) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_scroll_target_is_ignored() {
        let binding = ScrollBinding::parallax().tracking("products-section", &["hero"]);
        assert!(binding.target.is_none());
        assert_eq!(binding.curves, PARALLAX_CURVES);

        let found = ScrollBinding::parallax().tracking("products-section", &["products-section"]);
        assert_eq!(found.target.as_deref(), Some("products-section"));
    }

    #[test]
    fn test_parallax_curves() {
        assert!(PARALLAX_CURVES.is_valid());
        let motion = PARALLAX_CURVES.sample(0.3);
        assert!((motion.y + 100.0).abs() < EPS);
        assert!((motion.scale - 0.8).abs() < EPS);
        assert!((motion.opacity - 0.9).abs() < EPS);
    }

    #[test]
    fn test_viewport_json_shape() {
        let viewport = ModelViewport::new(ModelKind::Elephant, PresentationContext::Hero)
            .scroll_bound(ScrollBinding::parallax());
        let json: serde_json::Value = serde_json::from_str(&viewport.to_json()).unwrap();
        assert_eq!(json["kind"], "elephant");
        assert_eq!(json["context"], "hero");
        assert_eq!(json["camera"]["fov"], 45.0);
        assert!(json["scroll"]["curves"]["opacity"]["input"].is_array());
        assert!(json["scroll"].get("target").is_none());

        let still = ModelViewport::new(ModelKind::Dino, PresentationContext::Card).auto_rotate(false);
        let json: serde_json::Value = serde_json::from_str(&still.to_json()).unwrap();
        assert!(json.get("auto_rotate").is_none());
    }
}
