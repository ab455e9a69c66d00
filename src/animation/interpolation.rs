//! Interpolation methods useful in animation.
//!
//! All functions here assume `t` moves from 0 to 1.

use std::ops::{Add, Mul};

/// Linear interpolation.
pub fn lerp<T>(start: T, end: T, t: f32) -> T
where
    T: Copy + Mul<f32, Output = T> + Add<T, Output = T>,
{
    start * (1.0 - t) + end * t
}

/// Interpolation with a trigonometric ease-in/ease-out curve:
/// the blend weight is `(1 - cos(t * pi)) / 2`.
pub fn trig_interp<T>(start: T, end: T, t: f32) -> T
where
    T: Copy + Mul<f32, Output = T> + Add<T, Output = T>,
{
    lerp(start, end, trig_weight(t))
}

/// Interpolation with a smoothstep-style cubic easing curve:
/// the blend weight is `3t^2 - 2t^3`.
pub fn cubic<T>(start: T, end: T, t: f32) -> T
where
    T: Copy + Mul<f32, Output = T> + Add<T, Output = T>,
{
    lerp(start, end, smoothstep(t))
}

/// The blend weight used by [`trig_interp`], exposed for testing and reuse.
#[inline]
pub fn trig_weight(t: f32) -> f32 {
    (1.0 - (t * std::f32::consts::PI).cos()) / 2.0
}

/// The blend weight used by [`cubic`].
/// Monotonic on [0, 1] with zero derivative at both endpoints.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    const EPS: f32 = 1e-6;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).mag() < EPS,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn endpoints_are_exact() {
        let start = Vec3::new(-8.0, -5.0, 0.0);
        let end = Vec3::new(8.0, 5.0, 0.0);
        assert_close(lerp(start, end, 0.0), start);
        assert_close(lerp(start, end, 1.0), end);
        assert_close(trig_interp(start, end, 0.0), start);
        assert_close(trig_interp(start, end, 1.0), end);
        assert_close(cubic(start, end, 0.0), start);
        assert_close(cubic(start, end, 1.0), end);
    }

    #[test]
    fn lerp_stays_on_segment() {
        let start = Vec3::new(-8.0, -5.0, 0.0);
        let end = Vec3::new(8.0, 5.0, 0.0);
        let dir = (end - start).normalized();
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let p = lerp(start, end, t);
            // distance from the line through start and end
            let off = (p - start) - dir * (p - start).dot(dir);
            assert!(off.mag() < EPS);
        }
    }

    #[test]
    fn weights_hit_half_at_midpoint() {
        assert!((smoothstep(0.5) - 0.5).abs() < EPS);
        assert!((trig_weight(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn smoothstep_is_monotonic() {
        let mut prev = smoothstep(0.0);
        for i in 1..=1000 {
            let w = smoothstep(i as f32 / 1000.0);
            assert!(w >= prev);
            prev = w;
        }
    }

    #[test]
    fn smoothstep_has_flat_endpoints() {
        // central difference around each endpoint, clamped inside [0, 1]
        let h = 1e-3;
        let d0 = (smoothstep(h) - smoothstep(0.0)) / h;
        let d1 = (smoothstep(1.0) - smoothstep(1.0 - h)) / h;
        assert!(d0.abs() < 1e-2);
        assert!(d1.abs() < 1e-2);
    }
}
