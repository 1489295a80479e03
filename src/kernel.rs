// The per-pixel frame kernel. One evaluation per pixel per frame, a pure
// function of (uniforms, pixel); no pixel depends on another, so whole rows
// fan out across cores. The merge order of the layers is fixed per config,
// with the finishing operator chosen by the preset.

use crate::composite::{add, blend, screen};
use crate::config::{FinishOp, KernelConfig};
use crate::gamma::GammaLut;
use crate::hash::hash12;
use crate::math::fract;
use crate::palette::fill;
use crate::sdf;
use crate::starfield::particles;
use crate::surface;
use crate::types::{Color4, FrameBuffer, FrameUniforms};
use glam::{Vec2, Vec3, vec2};
use rayon::prelude::*;
use std::f32::consts::PI;

pub struct FrameKernel {
    cfg: KernelConfig,
}

impl FrameKernel {
    pub fn new(cfg: KernelConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.cfg
    }

    /// Color+alpha for the pixel at (px, py) under the given uniforms.
    /// Samples at the pixel center, which also keeps panel-local coordinates
    /// off the exact origin. Degenerate resolution yields transparency; the
    /// host cannot intervene mid-frame, so this must not fault.
    pub fn evaluate(&self, u: &FrameUniforms, px: u32, py: u32) -> Color4 {
        if !(u.resolution.x > 0.0 && u.resolution.y > 0.0) {
            return Color4::TRANSPARENT;
        }
        let cfg = &self.cfg;

        let frag = vec2(px as f32 + 0.5, py as f32 + 0.5);
        let st = frag / u.resolution;

        // Panel-local frame: origin at the panel center, units of surface
        // height (this is the aspect-corrected normalized coordinate).
        let uv = (frag - u.panel_center()) / u.resolution.y;
        let half = u.target_size * 0.5 / u.resolution.y;
        let px_step = 1.0 / u.resolution.y;

        // All geometry masks derive from the one SDF.
        let d = sdf::rounded_box(uv, half, u.corner_radius);
        let band = sdf::band_width(uv, half, u.corner_radius, px_step);
        let rectmask = surface::rect_mask(d, band);
        let glass_mask = 1.0 - rectmask;

        let dither = hash12(frag * 1024.0 + Vec2::splat(u.time));
        let glow = surface::glow(d, dither, cfg.dither_amp, cfg.glow_band);

        // Fill phase winds around the panel and drifts with time.
        let centered = st - Vec2::splat(0.5);
        let angle = centered.y.atan2(centered.x) / PI;
        let fill_phase = (angle * PI * 4.0 + u.time * 0.5).sin() * 0.5 + 0.5;
        let glow_rgb = fill(cfg.palette, cfg.fill_lo, cfg.fill_hi, fill_phase) * glow;

        // Fake refraction: SDF normal -> grazing factor -> glass body,
        // plus the looping highlight sweep masked to the glass region.
        let n = sdf::normal(uv, half, u.corner_radius, px_step, cfg.normal_smoothness);
        let glass = surface::glass_factor(n);
        let refl = surface::reflection(uv, u.resolution, u.time, cfg.reflection_period) * 1.5;

        // The panel occludes its own shadow; only the offset crescent shows.
        let shadow =
            surface::drop_shadow(uv, half, u.corner_radius, cfg.light_dir, cfg.shadow_strength)
                * rectmask;

        let surface_phase = fract(u.time * 0.125 + centered.length());
        let stars = particles(cfg, uv, angle, surface_phase, u.time);

        // Merge: glass body, then stars (additive, seen through the glass),
        // the two breathing passes, the shadow, and finally the glow layer
        // through the configured finish operator.
        let body = Color4::new(Vec3::splat(glass * 0.75) + refl * glass_mask, 0.0);
        let star_layer = Color4::new(stars.rgb * refl * glass_mask, stars.a * glass_mask);
        let mut out = add(body, star_layer, false);

        // Wide pulse outside the panel, tight pulse on the glass itself.
        let breath_wide = surface::breath(uv * 0.5, u.time, cfg.breath_rate);
        let breath_tight = surface::breath(uv, u.time, cfg.breath_rate);
        out = add(out, Color4::new(breath_wide.rgb * rectmask * 0.25, 0.0), false);
        out = add(out, Color4::new(breath_tight.rgb * refl * glass_mask * 0.1, 0.0), false);

        out = blend(out, Color4::new(Vec3::ZERO, shadow), shadow);

        let glow_layer = Color4::new(glow_rgb, glow);
        match cfg.finish {
            FinishOp::Add => add(out, glow_layer, false),
            FinishOp::Screen => screen(out, glow_layer, true),
        }
    }

    /// Evaluate the whole surface into `fb`, rows in parallel, compositing
    /// source-over onto `backdrop` (linear RGB) and encoding through the
    /// sRGB LUT. This is the per-frame entry point for the window loop.
    pub fn render_into(&self, u: &FrameUniforms, fb: &mut FrameBuffer, lut: &GammaLut, backdrop: Vec3) {
        let width = fb.width;
        if width == 0 || fb.height == 0 {
            return;
        }
        fb.pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    let c = self.evaluate(u, x as u32, y as u32);
                    let a = c.a.clamp(0.0, 1.0);
                    let rgb = c.rgb.clamp(Vec3::ZERO, Vec3::ONE);
                    let lin = rgb * a + backdrop * (1.0 - a);
                    *px = lut.pack_linear_rgb(lin);
                }
            });
    }

    /// Straight-alpha RGBA bytes of the whole surface (for snapshots);
    /// color channels sRGB-encoded, alpha linear.
    pub fn render_rgba(&self, u: &FrameUniforms, width: usize, height: usize, lut: &GammaLut) -> Vec<u8> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let mut out = vec![0u8; width * height * 4];
        out.par_chunks_mut(width * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..width {
                    let c = self.evaluate(u, x as u32, y as u32);
                    let rgb = c.rgb.clamp(Vec3::ZERO, Vec3::ONE);
                    let i = x * 4;
                    row[i] = lut.linear_to_srgb_u8(rgb.x);
                    row[i + 1] = lut.linear_to_srgb_u8(rgb.y);
                    row[i + 2] = lut.linear_to_srgb_u8(rgb.z);
                    row[i + 3] = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EffectPreset, KernelConfig};

    const RATIO: f32 = 8.0 / 3.0;

    fn uniforms(w: f32, h: f32, time: f32) -> FrameUniforms {
        // Centered target box at the reference panel proportions.
        let size = vec2(0.8 * RATIO * h, 0.6 * h);
        FrameUniforms {
            resolution: vec2(w, h),
            target_offset: (vec2(w, h) - size) * 0.5,
            target_size: size,
            corner_radius: 0.05,
            time,
        }
    }

    fn kernel() -> FrameKernel {
        FrameKernel::new(KernelConfig::preset(EffectPreset::Glass))
    }

    #[test]
    fn center_pixel_is_inside_and_corner_is_outside() {
        let u = uniforms(800.0, 300.0, 0.0);
        let k = kernel();

        // Reconstruct the kernel's own geometry for the two probe pixels.
        let check = |px: u32, py: u32| {
            let frag = vec2(px as f32 + 0.5, py as f32 + 0.5);
            let uv = (frag - u.panel_center()) / u.resolution.y;
            let half = u.target_size * 0.5 / u.resolution.y;
            let d = sdf::rounded_box(uv, half, u.corner_radius);
            let band = sdf::band_width(uv, half, u.corner_radius, 1.0 / u.resolution.y);
            (d, surface::rect_mask(d, band))
        };

        let (d_center, mask_center) = check(400, 150);
        assert!(d_center < 0.0);
        assert!(mask_center < 1e-3);

        let (d_corner, mask_corner) = check(0, 0);
        assert!(d_corner > 0.0);
        assert!(mask_corner > 1.0 - 1e-3);

        // And the kernel itself produces finite output at both.
        for (x, y) in [(400u32, 150u32), (0, 0)] {
            let c = k.evaluate(&u, x, y);
            assert!(c.rgb.x.is_finite() && c.rgb.y.is_finite() && c.rgb.z.is_finite());
            assert!(c.a.is_finite());
        }
    }

    #[test]
    fn degenerate_resolution_is_transparent() {
        let mut u = uniforms(800.0, 300.0, 1.0);
        u.resolution = Vec2::ZERO;
        assert_eq!(kernel().evaluate(&u, 10, 10), Color4::TRANSPARENT);
    }

    #[test]
    fn evaluation_is_deterministic_per_time() {
        let u = uniforms(320.0, 120.0, 4.2);
        let k = kernel();
        let lut = GammaLut::new();
        let mut a = FrameBuffer::new(320, 120);
        let mut b = FrameBuffer::new(320, 120);
        k.render_into(&u, &mut a, &lut, Vec3::ZERO);
        k.render_into(&u, &mut b, &lut, Vec3::ZERO);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn any_finite_time_is_valid() {
        let k = kernel();
        for t in [-5.0f32, 0.0, 0.016, 1e4] {
            let u = uniforms(64.0, 64.0, t);
            let c = k.evaluate(&u, 32, 32);
            assert!(c.rgb.x.is_finite() && c.a.is_finite(), "t={t}");
        }
    }

    #[test]
    fn presets_produce_distinct_output() {
        let u = uniforms(800.0, 300.0, 2.0);
        let glass = FrameKernel::new(KernelConfig::preset(EffectPreset::Glass));
        let pulse = FrameKernel::new(KernelConfig::preset(EffectPreset::Pulse));
        let mut differs = false;
        for (x, y) in [(400u32, 150u32), (100, 60), (700, 250)] {
            if glass.evaluate(&u, x, y) != pulse.evaluate(&u, x, y) {
                differs = true;
            }
        }
        assert!(differs);
    }

    #[test]
    fn empty_framebuffer_render_is_a_noop() {
        let u = uniforms(0.0, 0.0, 0.0);
        let mut fb = FrameBuffer::new(0, 0);
        kernel().render_into(&u, &mut fb, &GammaLut::new(), Vec3::ZERO);
        assert!(fb.pixels.is_empty());
    }

    #[test]
    fn rgba_snapshot_has_expected_length() {
        let u = uniforms(32.0, 16.0, 1.0);
        let bytes = kernel().render_rgba(&u, 32, 16, &GammaLut::new());
        assert_eq!(bytes.len(), 32 * 16 * 4);
    }
}
