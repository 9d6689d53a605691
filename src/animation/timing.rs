//! Timing functions (interpolators) for animations.
//!
//! A timing function maps the elapsed fraction of an animation iteration to
//! the progress fraction used to interpolate values.
//!
//! ## Built-in Curves
//!
//! - [`TimingFunction::Linear`] - Constant speed
//! - [`TimingFunction::Accelerate`] - Starts slow, ends fast
//! - [`TimingFunction::Decelerate`] - Starts fast, ends slow
//! - [`TimingFunction::AccelerateDecelerate`] - Slow start and end, fast middle
//! - [`TimingFunction::Custom`] - User-defined function
//!
//! ## Example
//!
//! ```ignore
//! PropertyAnimator::of(star, TranslationY, 800.0)
//!     .timing(TimingFunction::Accelerate(1.0))
//!     .duration(Duration::from_millis(1500));
//! ```

use std::f32::consts::PI;
use std::sync::Arc;

/// Timing function that controls the animation curve
#[derive(Clone, Default)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// `t^(2 * factor)`; a factor of 1.0 gives the classic `t * t`
    Accelerate(f32),
    /// `1 - (1 - t)^(2 * factor)`; a factor of 1.0 gives `t * (2 - t)`
    Decelerate(f32),
    /// Cosine ease in and out, the default for property animators
    #[default]
    AccelerateDecelerate,
    /// Custom timing function
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::Accelerate(factor) => accelerate(t, *factor),
            TimingFunction::Decelerate(factor) => decelerate(t, *factor),
            TimingFunction::AccelerateDecelerate => accelerate_decelerate(t),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::Accelerate(factor) => write!(f, "Accelerate({})", factor),
            TimingFunction::Decelerate(factor) => write!(f, "Decelerate({})", factor),
            TimingFunction::AccelerateDecelerate => write!(f, "AccelerateDecelerate"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn accelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        t * t
    } else {
        t.powf(2.0 * factor)
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        t * (2.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

fn accelerate_decelerate(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_accelerate() {
        assert_eq!(TimingFunction::Accelerate(1.0).evaluate(0.5), 0.25);
        assert!(approx_eq(TimingFunction::Accelerate(2.0).evaluate(0.5), 0.0625));
    }

    #[test]
    fn test_decelerate() {
        assert_eq!(TimingFunction::Decelerate(1.0).evaluate(0.5), 0.75);
        assert!(approx_eq(TimingFunction::Decelerate(1.5).evaluate(1.0), 1.0));
    }

    #[test]
    fn test_accelerate_decelerate_endpoints_and_midpoint() {
        let timing = TimingFunction::default();
        assert!(approx_eq(timing.evaluate(0.0), 0.0));
        assert!(approx_eq(timing.evaluate(0.5), 0.5));
        assert!(approx_eq(timing.evaluate(1.0), 1.0));
        assert!(timing.evaluate(0.25) < 0.25);
    }

    #[test]
    fn test_custom() {
        let step = TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 });
        assert_eq!(step.evaluate(0.4), 0.0);
        assert_eq!(step.evaluate(0.6), 1.0);
        assert_eq!(format!("{:?}", step), "Custom");
    }
}
