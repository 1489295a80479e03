// Deterministic hash primitives: coordinates in, pseudo-random [0,1) out.
// These are the only source of variation in the whole effect, so they must be
// pure (same input, same output, across calls and runs) with no hidden seed.
// The mixing sequence is fixed: fractional scaling, self-dot feedback, final
// fractional reduction.

use crate::math::{fract, fract2, fract3};
use glam::{Vec2, Vec3, vec3};

pub fn hash11(p: f32) -> f32 {
    let mut p = fract(p * 0.1031);
    p *= p + 33.33;
    p *= p + p;
    fract(p)
}

pub fn hash12(p: Vec2) -> f32 {
    let mut p3 = fract3(vec3(p.x, p.y, p.x) * 0.1031);
    p3 += Vec3::splat(p3.dot(vec3(p3.y, p3.z, p3.x) + Vec3::splat(33.33)));
    fract((p3.x + p3.y) * p3.z)
}

pub fn hash13(p: Vec3) -> f32 {
    let mut p3 = fract3(p * 0.1031);
    p3 += Vec3::splat(p3.dot(vec3(p3.z, p3.y, p3.x) + Vec3::splat(31.32)));
    fract((p3.x + p3.y) * p3.z)
}

/// Per-cell hash used by the star field's domain repetition.
pub fn hash21(p: Vec2) -> f32 {
    let mut p = fract2(p * Vec2::new(123.34, 145.54));
    p += Vec2::splat(p.dot(p + Vec2::splat(45.23)));
    fract(p.x * p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn hashes_are_deterministic() {
        for i in 0..32 {
            let s = i as f32 * 7.31 - 11.0;
            assert_eq!(hash11(s), hash11(s));
            assert_eq!(hash12(vec2(s, -s * 0.5)), hash12(vec2(s, -s * 0.5)));
            assert_eq!(hash13(vec3(s, s * 0.2, 3.0 - s)), hash13(vec3(s, s * 0.2, 3.0 - s)));
            assert_eq!(hash21(vec2(-s, s * 1.7)), hash21(vec2(-s, s * 1.7)));
        }
    }

    #[test]
    fn hashes_stay_in_unit_range() {
        for i in -50..50 {
            let p = vec2(i as f32 * 13.7, i as f32 * -4.2 + 0.5);
            for h in [hash12(p), hash21(p), hash11(p.x), hash13(p.extend(p.x * 0.3))] {
                assert!((0.0..1.0).contains(&h), "hash out of range: {h}");
            }
        }
    }

    #[test]
    fn degenerate_zero_input_is_valid() {
        for h in [hash11(0.0), hash12(Vec2::ZERO), hash13(Vec3::ZERO), hash21(Vec2::ZERO)] {
            assert!((0.0..1.0).contains(&h));
        }
    }

    #[test]
    fn nearby_cells_decorrelate() {
        // Neighboring integer cells must not produce near-identical values.
        let a = hash21(vec2(10.0, 10.0));
        let b = hash21(vec2(11.0, 10.0));
        let c = hash21(vec2(10.0, 11.0));
        assert!((a - b).abs() > 1e-3);
        assert!((a - c).abs() > 1e-3);
    }
}
