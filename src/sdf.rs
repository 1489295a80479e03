// Signed distance to a rounded rectangle, plus the screen-space derivative
// helpers built on it. Sign convention: d < 0 inside, d = 0 on the boundary,
// d > 0 outside. Every mask in the effect branches or interpolates on that
// sign, so it must not change.

use glam::{Vec2, Vec3, vec2};

/// Distance from `p` to the boundary of an axis-aligned rectangle with
/// half-extents `half` and corners rounded by `radius`.
pub fn rounded_box(p: Vec2, half: Vec2, radius: f32) -> f32 {
    let q = p.abs() - half + Vec2::splat(radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

/// One-pixel forward differences of the SDF, the CPU stand-in for dFdx/dFdy.
/// `step` is the size of one pixel in normalized units (1 / resolution.y).
pub fn derivatives(p: Vec2, half: Vec2, radius: f32, step: f32) -> Vec2 {
    let d = rounded_box(p, half, radius);
    vec2(
        rounded_box(p + vec2(step, 0.0), half, radius) - d,
        rounded_box(p + vec2(0.0, step), half, radius) - d,
    )
}

/// Width of the anti-aliasing band at `p`: |dx| + |dy|, the fwidth analogue.
pub fn band_width(p: Vec2, half: Vec2, radius: f32, step: f32) -> f32 {
    let g = derivatives(p, half, radius, step);
    g.x.abs() + g.y.abs()
}

/// Surface normal estimated from the SDF. `smoothness` damps the depth
/// component (soft edges). A degenerate gradient yields the zero vector
/// instead of faulting; consumers read n.z and treat 0 as fully grazing.
pub fn normal(p: Vec2, half: Vec2, radius: f32, step: f32, smoothness: f32) -> Vec3 {
    let d = rounded_box(p, half, radius);
    let g = derivatives(p, half, radius, step);
    Vec3::new(g.x, g.y, d * (1.0 - smoothness)).normalize_or_zero()
}
