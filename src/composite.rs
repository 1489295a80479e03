// Compositing operators that merge two color+alpha layers into one.
// All three act channel-wise on all four channels. Nothing here clamps
// unless asked to; alpha accumulation is the caller's policy.

use crate::types::Color4;
use glam::Vec3;

fn clamp01(c: Color4) -> Color4 {
    Color4::new(c.rgb.clamp(Vec3::ZERO, Vec3::ONE), c.a.clamp(0.0, 1.0))
}

/// Channel-wise sum; commutative when unclamped.
pub fn add(src: Color4, dst: Color4, clamped: bool) -> Color4 {
    let out = Color4::new(src.rgb + dst.rgb, src.a + dst.a);
    if clamped { clamp01(out) } else { out }
}

/// Linear interpolation by `f`. Written as src*(1-f) + dst*f so f=0 yields
/// `src` exactly and f=1 yields `dst` exactly.
pub fn blend(src: Color4, dst: Color4, f: f32) -> Color4 {
    Color4::new(src.rgb * (1.0 - f) + dst.rgb * f, src.a * (1.0 - f) + dst.a * f)
}

/// Screen blend: 1 - (1-src)(1-dst).
pub fn screen(src: Color4, dst: Color4, clamped: bool) -> Color4 {
    let rgb = Vec3::ONE - (Vec3::ONE - src.rgb) * (Vec3::ONE - dst.rgb);
    let a = 1.0 - (1.0 - src.a) * (1.0 - dst.a);
    let out = Color4::new(rgb, a);
    if clamped { clamp01(out) } else { out }
}
