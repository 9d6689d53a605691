use crate::view::Color;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

/// Truncates toward zero, so an integer animation only reaches `to` on the
/// final frame.
impl Animatable for i32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        (*from as f32 + (*to - *from) as f32 * t) as i32
    }
}

const GAMMA: f32 = 2.2;

/// RGB channels blend in linear light, alpha blends as stored
impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let channel = |a: f32, b: f32| {
            let a = a.max(0.0).powf(GAMMA);
            let b = b.max(0.0).powf(GAMMA);
            (a + (b - a) * t).max(0.0).powf(1.0 / GAMMA)
        };
        Color {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: from.a + (to.a - from.a) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
        // Overshoot
        assert_eq!(f32::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_i32_lerp_truncates() {
        assert_eq!(i32::lerp(&96, &196, 0.999), 195);
        assert_eq!(i32::lerp(&96, &196, 1.0), 196);
        assert_eq!(i32::lerp(&196, &96, 0.5), 146);
    }

    #[test]
    fn test_color_lerp_blends_in_linear_light() {
        let mid = Color::lerp(&Color::BLACK, &Color::RED, 0.5);
        assert_eq!(mid.to_argb(), 0xFFBA_0000);
        assert_eq!(mid.g, 0.0);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_color_lerp_endpoints_are_exact() {
        assert_eq!(Color::lerp(&Color::BLACK, &Color::RED, 0.0), Color::BLACK);
        assert_eq!(Color::lerp(&Color::BLACK, &Color::RED, 1.0), Color::RED);
        let half_alpha = Color::lerp(&Color::TRANSPARENT, &Color::BLACK, 0.5);
        assert_eq!(half_alpha.a, 0.5);
    }
}
