// Periodic color ramps. Both cosine families follow a + b*cos(2*pi*(c*x + d))
// and are bounded in [0,1] for any real phase; the fill mix is a plain lerp
// between two configured endpoints.

use crate::config::PaletteKind;
use crate::math::cos3;
use glam::{Vec3, vec3};
use std::f32::consts::TAU;

/// Iridescent hue: hue shifts through the full spectrum once per unit phase.
pub fn iridescent(x: f32) -> Vec3 {
    let d = vec3(0.0, 0.334, 0.667);
    Vec3::splat(0.5) + 0.5 * cos3(TAU * (Vec3::splat(x) + d))
}

/// Full cosine ramp variant of the fill palette.
pub fn cosine_ramp(x: f32) -> Vec3 {
    let c = vec3(2.0, 1.0, 0.0);
    let d = vec3(0.5, 0.20, 0.25);
    Vec3::splat(0.5) + 0.5 * cos3(TAU * (c * x + d))
}

/// Panel fill color for a phase in [0,1], by configured palette kind.
pub fn fill(kind: PaletteKind, lo: Vec3, hi: Vec3, x: f32) -> Vec3 {
    match kind {
        PaletteKind::PurpleBlue => lo.lerp(hi, x),
        PaletteKind::CosineRamp => cosine_ramp(x),
    }
}
