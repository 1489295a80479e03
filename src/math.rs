// Scalar/vector helpers the kernel leans on everywhere.
// `fract` here is floor-based (GLSL semantics): Rust's own `f32::fract` is
// trunc-based and would mirror tile cells for negative coordinates.

use glam::{Mat2, Vec2, Vec3};

/// Fractional part in [0, 1) for any finite input.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

#[inline]
pub fn fract3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// Hermite 0 to 1 ramp across [e0, e1]; flat outside the band.
/// A zero-width band degenerates to a step instead of a NaN.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e0 == e1 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear mix, written so f=0 returns `a` and f=1 returns `b` exactly.
#[inline]
pub fn mix(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + b * f
}

/// 2-D rotation by `a` radians.
#[inline]
pub fn rot(a: f32) -> Mat2 {
    Mat2::from_angle(a)
}

/// Component-wise cosine (glam has no elementwise cos).
#[inline]
pub fn cos3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.cos(), v.y.cos(), v.z.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn fract_is_floor_based_for_negatives() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(2.5) - 0.5).abs() < 1e-6);
        assert_eq!(fract(3.0), 0.0);
        let v = fract2(vec2(-1.25, 1.25));
        assert!((v.x - 0.75).abs() < 1e-6);
        assert!((v.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn fract_stays_in_unit_range() {
        for &x in &[-123.456f32, -1.0, 0.0, 0.999, 17.03, 81920.7] {
            let f = fract(x);
            assert!((0.0..1.0).contains(&f), "fract({x}) = {f}");
        }
    }

    #[test]
    fn smoothstep_clamps_and_interpolates() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mix_is_exact_at_endpoints() {
        assert_eq!(mix(0.3, 0.9, 0.0), 0.3);
        assert_eq!(mix(0.3, 0.9, 1.0), 0.9);
    }

    #[test]
    fn rot_quarter_turn() {
        let v = rot(std::f32::consts::FRAC_PI_2) * vec2(1.0, 0.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y.abs() - 1.0).abs() < 1e-6);
    }
}
