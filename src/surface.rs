// Surface shading for the glass panel: glow and rect masks, drop shadow,
// fake refraction from the SDF normal, the moving highlight sweep, and the
// breathing radial pulse. All pure functions of (uv, time, uniforms).

use crate::math::{cos3, smoothstep};
use crate::sdf;
use crate::types::Color4;
use glam::{Vec2, Vec3, vec3};
use std::f32::consts::TAU;

/// Shadow probe offset along the light direction, in normalized units.
const SHADOW_REACH: f32 = 0.1;
/// Softness band of the shadow edge.
const SHADOW_SOFT: f32 = 0.1;

/// Anti-aliased panel mask: ~0 strictly inside, ~1 strictly outside, with a
/// transition band sized by the local SDF derivative so the edge stays one or
/// two pixels wide at any resolution.
pub fn rect_mask(d: f32, band: f32) -> f32 {
    smoothstep(0.0, band, d)
}

/// Glow around the panel boundary. The hash dither breaks up banding in the
/// wide falloff; `band` gives the smoothstep edges, `dither` is a [0,1) hash
/// sample and `amp` its amplitude.
pub fn glow(d: f32, dither: f32, amp: f32, band: (f32, f32)) -> f32 {
    let glowmask = 0.95 * (1.0 - d) + dither * amp;
    smoothstep(band.0, band.1, glowmask)
}

/// Soft drop shadow: the same SDF probed at a position offset against the
/// light direction, squashed to [0,1] and attenuated.
pub fn drop_shadow(uv: Vec2, half: Vec2, radius: f32, light_dir: Vec2, strength: f32) -> f32 {
    let probe = uv - light_dir * SHADOW_REACH;
    let d = sdf::rounded_box(probe, half, radius);
    let shadow = smoothstep(-SHADOW_SOFT, SHADOW_SOFT, d);
    (1.0 - shadow).max(0.0) * strength
}

/// Fresnel-like grazing factor from the SDF normal's depth component,
/// remapped for a soft falloff. Returns the glass intensity in [0, 0.4].
pub fn glass_factor(n: Vec3) -> f32 {
    let g = 1.0 - n.z.abs();
    let g = g * 0.8 / (g * 0.8 - g + 1.0);
    0.4 * g
}

/// Moving highlight sweep across the glass. The phase loops seamlessly every
/// `period` seconds; resolution feeds in so the sweep travels in screen terms.
pub fn reflection(uv: Vec2, resolution: Vec2, time: f32, period: f32) -> Vec3 {
    let refl = uv * 2.0;
    let looped = time.rem_euclid(period) * TAU / period;
    let move_x = looped * resolution.x * 0.01;
    let move_y = looped * resolution.y * 0.01;
    let sweep = (refl.x + refl.y + move_x - move_y + looped).sin() * 0.5 + 0.5;
    Vec3::splat(sweep.powi(3) * 0.3)
}

/// Breathing highlight: a radial pulse that swells and fades with time,
/// tinted by a slowly cycling cosine ramp.
pub fn breath(uv: Vec2, time: f32, rate: f32) -> Color4 {
    let mask = (1.0 - uv.length()).clamp(0.0, 1.0);
    let mask = smoothstep(0.25, 1.0, mask) * ((time * rate).sin() * 1.5).abs().powi(3);
    let col = Vec3::splat(0.5)
        + 0.5 * cos3(Vec3::splat(time * 1.0123) + vec3(uv.x, uv.y, uv.x) + vec3(0.0, 2.0, 4.0));
    Color4::new(col * mask, 1.0)
}
