// Star/particle field built from domain repetition: the plane is tiled into
// unit cells, each cell hashes to one jittered star, and every sample sums
// the 3x3 cell neighborhood so stars never pop at cell seams. Several layers
// at different scales respawn on looping lifetimes for the parallax drift.

use crate::config::{KernelConfig, StarTint};
use crate::hash::hash21;
use crate::math::{fract, fract2, fract3, mix, rot, smoothstep};
use crate::palette::{fill, iridescent};
use crate::types::Color4;
use glam::{Vec2, Vec3, vec2, vec3};
use std::f32::consts::TAU;

/// Jittered star positions stay this far inside their cell (of half-width .5),
/// which keeps the 3x3 neighborhood sufficient.
const CELL_JITTER: f32 = 0.7;
/// Sharpness of the four-pointed cross arms.
const CROSS_GAIN: f32 = 1e3;
/// Falloff exponent applied to the cross arms.
const SPARKLE_POW: i32 = 4;
/// Core brightness is 1/distance, capped here.
const CORE_CLAMP: f32 = 5.0;
const CORE_GAIN: f32 = 1e-2;
/// Per-star twinkle frequency.
const TWINKLE_RATE: f32 = 20.0;
/// Decorrelates the layers' cell grids.
const LAYER_PHASE: f32 = 134.53;
/// A star's influence fades out between these cell distances.
const NEIGHBOR_FADE: (f32, f32) = (1.5, 0.8);
/// Structural guard for the burst-mode radial divisor.
const BURST_EPS: f32 = 1e-9;

/// Brightness of one star at offset `uv` from its center: the max of two
/// rotated cross terms raised to the 4th power, plus a clamped 1/d core glow.
pub fn star(uv: Vec2, a: f32, sparkle: f32) -> f32 {
    let av1 = uv.abs();
    let av2 = (rot(a) * uv).abs();

    let d = uv.length();
    let cross = (av1.x * av1.y).max(av2.x * av2.y);
    let cross = (1.0 - cross * CROSS_GAIN).max(0.0);

    let m = (CORE_GAIN / d).min(CORE_CLAMP);

    m + cross.powi(SPARKLE_POW) * sparkle
}

/// One tiled layer of the star field. Returns (color, alpha) accumulated from
/// the 3x3 cell neighborhood around `uv`. Both contributions carry the same
/// smooth distance falloff, so sums stay continuous across cell boundaries.
/// `tint` overrides the per-star palette color when the config asks for the
/// iridescent mode (it is constant per sample, so the kernel precomputes it).
pub fn star_layer(
    cfg: &KernelConfig,
    uv: Vec2,
    t: f32,
    sparkle: f32,
    tint: Option<Vec3>,
) -> (Vec3, f32) {
    let gv = fract2(uv) - Vec2::splat(0.5);
    let id = uv.floor();
    let mut col = Vec3::ZERO;
    let mut alpha = 0.0;

    for y in -1..=1 {
        for x in -1..=1 {
            let offs = vec2(x as f32, y as f32);
            let n = hash21(id - offs);
            let nn = fract3(Vec3::splat(n) * vec3(10.0, 100.0, 1000.0));
            let p = (vec2(nn.x, nn.y) - Vec2::splat(0.5)) * CELL_JITTER;

            let brightness = star(gv - p + offs, n * TAU + t, sparkle);
            let base = match tint {
                Some(c) => c,
                None => fill(cfg.palette, cfg.fill_lo, cfg.fill_hi, p.x * 0.5 + 0.5),
            };
            let mut s = brightness * base * nn.z * nn.z;
            s *= 1.0 + ((t + n) * TWINKLE_RATE).sin()
                * smoothstep(t.sin() * 0.5 + 0.5, 1.0, fract(10.0 * n));

            let dist = (gv + offs).length();
            let falloff = smoothstep(NEIGHBOR_FADE.0, NEIGHBOR_FADE.1, dist);

            col += s * falloff;
            alpha += brightness * falloff;
        }
    }

    (col, alpha)
}

/// Full particle field at panel-local `coord`: layered star fields at
/// receding scales, each weighted by a triangular fade over its looping
/// lifetime so layers respawn seamlessly. Burst mode remaps the domain
/// radially and adds ray streaks and a pull-through color.
pub fn particles(
    cfg: &KernelConfig,
    coord: Vec2,
    angle: f32,
    surface_phase: f32,
    time: f32,
) -> Color4 {
    let t = -time * 0.3;
    let mut uv = rot(-t * 0.2) * coord;
    uv *= 2.0 + (t * 0.05).sin();

    let tint = match cfg.star_tint {
        StarTint::Iridescent => Some(iridescent(angle + surface_phase)),
        StarTint::Palette => None,
    };

    // Burst-mode domain remap. The divisor is an offset quantity (samples sit
    // at pixel centers, off the panel origin) and is floored besides.
    let mut bla = 0.0;
    let mut d0 = 0.0;
    let mut polar = 0.0;
    let mut burst = 0.0;
    if cfg.burst {
        bla = (t + (t + t.sin() * 0.5).sin()).sin() * 0.5 + 0.5;
        d0 = uv.dot(uv).max(BURST_EPS);
        polar = uv.x.atan2(uv.y);
        uv /= d0;
        burst = (time * 0.05).sin();
        uv *= burst + 0.2;
    }

    let speed = if cfg.burst { 0.1 } else { cfg.star_speed };
    let layer_t = if cfg.burst { t } else { 0.0 };

    let mut col = Vec3::ZERO;
    let mut alpha = 0.0;
    let stp = 1.0 / cfg.star_layers as f32;
    for i in 0..cfg.star_layers {
        let phase = i as f32 * stp;
        let lt = fract(t * speed + phase);
        let scale = mix(cfg.layer_scale.0, cfg.layer_scale.1, lt);
        let fade = smoothstep(0.0, 0.4, lt) * smoothstep(1.0, 0.95, lt);

        let sv = uv * scale + Vec2::splat(phase * LAYER_PHASE);
        let (c, a) = star_layer(cfg, sv, layer_t, fade, tint);
        col += c * fade;
        alpha += a * fade;
    }

    if cfg.burst {
        let burst_fade = smoothstep(0.0, 0.02, burst.abs());
        let size = 0.9 * t.sin() + 1.0;
        let size = size.max(size.sqrt());
        let pull = size / d0;

        col *= mix(1.0, pull, burst_fade);
        col += pull * 0.2 * vec3(1.0, 0.5, 0.1) * bla * burst_fade;
        alpha += pull * burst_fade;

        let t2 = t * 1.5;
        let mut rays = (polar * 5.0 + t2 * 3.0).sin() - (polar * 7.0 - t2).cos();
        rays *= (polar + t2 + (polar * 4.0).sin() * 10.0).sin() * 0.5 + 0.5;
        col += Vec3::splat(rays * bla * 0.1 * burst_fade);
        col += Vec3::splat(1.0 - burst_fade);
    } else {
        col *= 4.0;
    }

    Color4::new(col, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EffectPreset, KernelConfig};

    fn cfg() -> KernelConfig {
        KernelConfig::preset(EffectPreset::Glass)
    }

    #[test]
    fn star_core_is_clamped_at_the_center() {
        // Exactly on the star the 1/d core must clamp, not blow up.
        let b = star(Vec2::ZERO, 1.3, 0.5);
        assert!(b.is_finite());
        assert!(b >= CORE_CLAMP && b <= CORE_CLAMP + 1.0 + 1e-3);
    }

    #[test]
    fn star_brightness_decays_with_distance() {
        let near = star(vec2(0.05, 0.0), 0.0, 0.0);
        let far = star(vec2(0.4, 0.3), 0.0, 0.0);
        assert!(near > far);
    }

    #[test]
    fn layer_is_continuous_across_cell_boundaries() {
        // Samples a hair on either side of an integer cell line must agree
        // to O(eps); the 3x3 accumulation with the shared falloff weight is
        // what makes the handoff seamless.
        let c = cfg();
        let eps = 1e-5f32;
        for &(bx, y) in &[(3.0f32, 0.37f32), (-2.0, 0.21), (7.0, -0.43)] {
            let (ca, aa) = star_layer(&c, vec2(bx - eps, y), 0.0, 0.8, None);
            let (cb, ab) = star_layer(&c, vec2(bx + eps, y), 0.0, 0.8, None);
            assert!((ca - cb).length() < 0.05, "color seam at x={bx}: {ca:?} vs {cb:?}");
            assert!((aa - ab).abs() < 0.05, "alpha seam at x={bx}: {aa} vs {ab}");
        }
        // Same across a horizontal boundary.
        let (ca, aa) = star_layer(&c, vec2(0.31, 5.0 - eps), 0.0, 0.8, None);
        let (cb, ab) = star_layer(&c, vec2(0.31, 5.0 + eps), 0.0, 0.8, None);
        assert!((ca - cb).length() < 0.05);
        assert!((aa - ab).abs() < 0.05);
    }

    #[test]
    fn layer_is_deterministic() {
        let c = cfg();
        let a = star_layer(&c, vec2(1.7, -0.4), 0.0, 0.6, None);
        let b = star_layer(&c, vec2(1.7, -0.4), 0.0, 0.6, None);
        assert_eq!(a, b);
    }

    #[test]
    fn particles_evaluable_at_time_zero() {
        let p = particles(&cfg(), vec2(0.3, 0.1), 0.0, 0.0, 0.0);
        assert!(p.rgb.x.is_finite() && p.rgb.y.is_finite() && p.rgb.z.is_finite());
        assert!(p.a.is_finite() && p.a >= 0.0);
    }

    #[test]
    fn burst_mode_is_finite_even_at_the_origin() {
        let c = cfg().with_burst(true);
        for t in [0.0f32, 1.5, 31.4, 62.8] {
            let p = particles(&c, Vec2::ZERO, 0.0, 0.0, t);
            assert!(p.rgb.x.is_finite() && p.rgb.y.is_finite() && p.rgb.z.is_finite(), "t={t}");
            assert!(p.a.is_finite(), "t={t}");
        }
    }

    #[test]
    fn layer_count_comes_from_config() {
        // More layers accumulate at least as much alpha on average.
        let three = cfg();
        let five = KernelConfig { star_layers: 5, ..three };
        let mut a3 = 0.0;
        let mut a5 = 0.0;
        for i in 0..16 {
            let p = vec2(i as f32 * 0.37 - 2.0, i as f32 * 0.11);
            a3 += particles(&three, p, 0.0, 0.0, 2.0).a;
            a5 += particles(&five, p, 0.0, 0.0, 2.0).a;
        }
        assert!(a3.is_finite() && a5.is_finite());
        assert!(a3 > 0.0 && a5 > 0.0);
    }
}
