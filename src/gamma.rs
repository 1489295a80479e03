// Speeds up gamma-correct presentation by replacing powf with table lookups.
// The kernel works in linear light; the window wants packed sRGB pixels.

use glam::{Vec3, vec3};

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        // sRGB -> linear
        let mut s2l = [0.0f32; 256];
        for v in 0..=255 {
            let c = v as f32 / 255.0;
            s2l[v] = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        // linear -> sRGB (quantized to 4096 steps)
        let mut l2s = [0u8; 4096];
        for i in 0..4096 {
            let l = (i as f32) / 4095.0; // 0..1
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            let v = (s * 255.0).round().clamp(0.0, 255.0) as u8;
            l2s[i] = v;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        // Quantize to 0..4095 index
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Pack a linear RGB color into the window's 0x00RRGGBB layout.
    #[inline]
    pub fn pack_linear_rgb(&self, lin: Vec3) -> u32 {
        let r = self.linear_to_srgb_u8(lin.x) as u32;
        let g = self.linear_to_srgb_u8(lin.y) as u32;
        let b = self.linear_to_srgb_u8(lin.z) as u32;
        (r << 16) | (g << 8) | b
    }

    /// Unpack a 0x00RRGGBB sRGB color into linear RGB (for the backdrop).
    #[inline]
    pub fn unpack_srgb(&self, px: u32) -> Vec3 {
        vec3(
            self.srgb_u8_to_linear(((px >> 16) & 0xFF) as u8),
            self.srgb_u8_to_linear(((px >> 8) & 0xFF) as u8),
            self.srgb_u8_to_linear((px & 0xFF) as u8),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let lut = GammaLut::new();
        assert_eq!(lut.linear_to_srgb_u8(0.0), 0);
        assert_eq!(lut.linear_to_srgb_u8(1.0), 255);
        assert_eq!(lut.srgb_u8_to_linear(0), 0.0);
        assert!((lut.srgb_u8_to_linear(255) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn roundtrip_is_close() {
        let lut = GammaLut::new();
        for v in (0..=255).step_by(17) {
            let l = lut.srgb_u8_to_linear(v);
            let back = lut.linear_to_srgb_u8(l);
            assert!((back as i32 - v as i32).abs() <= 1, "{v} -> {back}");
        }
    }

    #[test]
    fn pack_unpack_agree() {
        let lut = GammaLut::new();
        let px = 0x00_3A_7F_C0;
        let lin = lut.unpack_srgb(px);
        let repacked = lut.pack_linear_rgb(lin);
        // Channel-wise within one quantization step.
        for shift in [16, 8, 0] {
            let a = ((px >> shift) & 0xFF) as i32;
            let b = ((repacked >> shift) & 0xFF) as i32;
            assert!((a - b).abs() <= 1);
        }
    }
}
