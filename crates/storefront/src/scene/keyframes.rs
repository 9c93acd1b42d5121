//! Piecewise-linear keyframe interpolation.
//!
//! A [`Keyframes`] table maps an input range (normally scroll fraction) to an
//! output value. Outside the table the first/last output is held, so a curve
//! defined over `[0.25, 0.7]` is flat before 0.25 and after 0.7.

use serde::Serialize;

/// A monotonic input → output table.
///
/// Serialises as `{"input": [...], "output": [...]}` so the browser script
/// can evaluate the same curve between server renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframes {
    input: &'static [f64],
    output: &'static [f64],
}

impl Keyframes {
    /// Build a table from matching input and output slices.
    ///
    /// Inputs must be non-decreasing and both slices the same non-zero
    /// length; all tables in this crate are static and checked by tests.
    #[must_use]
    pub const fn new(input: &'static [f64], output: &'static [f64]) -> Self {
        Self { input, output }
    }

    /// Input stops.
    #[must_use]
    pub const fn input(&self) -> &'static [f64] {
        self.input
    }

    /// Output values.
    #[must_use]
    pub const fn output(&self) -> &'static [f64] {
        self.output
    }

    /// Whether the table is well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.input.is_empty()
            && self.input.len() == self.output.len()
            && self.input.windows(2).all(|w| matches!(w, [a, b] if a <= b))
    }

    /// Evaluate the curve at `x`.
    #[must_use]
    pub fn sample(&self, x: f64) -> f64 {
        let (Some(&first_in), Some(&first_out)) = (self.input.first(), self.output.first()) else {
            return 0.0;
        };
        if x <= first_in {
            return first_out;
        }

        let stops = self.input.windows(2).zip(self.output.windows(2));
        for (inputs, outputs) in stops {
            let ([a, b], [from, to]) = (inputs, outputs) else {
                continue;
            };
            if x < *b {
                let span = b - a;
                if span <= f64::EPSILON {
                    return *to;
                }
                let t = (x - a) / span;
                return from + (to - from) * t;
            }
        }

        self.output.last().copied().unwrap_or(first_out)
    }
}

/// Visual state of a scroll-bound element at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    /// Vertical offset in CSS pixels (negative moves up).
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Motion {
    /// No offset, unit scale, fully opaque.
    pub const IDENTITY: Self = Self {
        y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

/// One keyframe table per animated property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionCurves {
    pub y: Keyframes,
    pub scale: Keyframes,
    pub opacity: Keyframes,
}

impl MotionCurves {
    /// Sample all three properties at `x`.
    #[must_use]
    pub fn sample(&self, x: f64) -> Motion {
        Motion {
            y: self.y.sample(x),
            scale: self.scale.sample(x),
            opacity: self.opacity.sample(x).clamp(0.0, 1.0),
        }
    }

    /// Whether every table is well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.y.is_valid() && self.scale.is_valid() && self.opacity.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    const RAMP: Keyframes = Keyframes::new(&[0.0, 0.3, 0.6, 1.0], &[0.0, -100.0, -200.0, -300.0]);

    #[test]
    fn test_hits_keyframes_exactly() {
        assert!(approx(RAMP.sample(0.0), 0.0));
        assert!(approx(RAMP.sample(0.3), -100.0));
        assert!(approx(RAMP.sample(0.6), -200.0));
        assert!(approx(RAMP.sample(1.0), -300.0));
    }

    #[test]
    fn test_interpolates_between_stops() {
        assert!(approx(RAMP.sample(0.15), -50.0));
        assert!(approx(RAMP.sample(0.8), -250.0));
    }

    #[test]
    fn test_clamps_outside_range() {
        let late = Keyframes::new(&[0.65, 0.8], &[-50.0, 0.0]);
        assert!(approx(late.sample(0.0), -50.0));
        assert!(approx(late.sample(0.65), -50.0));
        assert!(approx(late.sample(1.0), 0.0));
        assert!(approx(RAMP.sample(-1.0), 0.0));
        assert!(approx(RAMP.sample(2.0), -300.0));
    }

    #[test]
    fn test_plateau_and_fall() {
        let fade = Keyframes::new(&[0.25, 0.3, 0.65, 0.7], &[0.0, 1.0, 1.0, 0.0]);
        assert!(approx(fade.sample(0.275), 0.5));
        assert!(approx(fade.sample(0.5), 1.0));
        assert!(approx(fade.sample(0.675), 0.5));
    }

    #[test]
    fn test_single_stop_is_constant() {
        let flat = Keyframes::new(&[0.5], &[7.0]);
        assert!(approx(flat.sample(0.0), 7.0));
        assert!(approx(flat.sample(1.0), 7.0));
    }

    #[test]
    fn test_validity() {
        assert!(RAMP.is_valid());
        assert!(!Keyframes::new(&[0.5, 0.2], &[0.0, 1.0]).is_valid());
        assert!(!Keyframes::new(&[0.0, 1.0], &[0.0]).is_valid());
        assert!(!Keyframes::new(&[], &[]).is_valid());
    }

    #[test]
    fn test_motion_opacity_is_clamped() {
        let curves = MotionCurves {
            y: RAMP,
            scale: Keyframes::new(&[0.0], &[1.0]),
            opacity: Keyframes::new(&[0.0, 1.0], &[0.0, 2.0]),
        };
        let motion = curves.sample(1.0);
        assert!(approx(motion.opacity, 1.0));
        assert!(approx(motion.y, -300.0));
    }
}
