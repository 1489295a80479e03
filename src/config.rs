// Kernel configuration. Everything that used to be a tweakable constant in
// the effect lives here, fixed at kernel construction: palette endpoints,
// star layer count, light direction, merge finish, burst flag.

use glam::{Vec2, Vec3, vec2, vec3};

/// Named presets for the two composition styles the effect ships with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectPreset {
    /// Glass body with additive glow, 3 star layers, purple-blue fill.
    #[default]
    Glass,
    /// Screen-combined glow, 5 star layers, cosine ramp + iridescent stars.
    Pulse,
}

impl EffectPreset {
    /// All available presets, in cycle order.
    pub fn all() -> &'static [EffectPreset] {
        &[EffectPreset::Glass, EffectPreset::Pulse]
    }

    /// Display name for the HUD (uppercase, fits the 5x7 glyph set).
    pub fn name(&self) -> &'static str {
        match self {
            EffectPreset::Glass => "GLASS",
            EffectPreset::Pulse => "PULSE",
        }
    }

    /// String ID for the command line.
    pub fn id(&self) -> &'static str {
        match self {
            EffectPreset::Glass => "glass",
            EffectPreset::Pulse => "pulse",
        }
    }

    /// Parse from a string ID (e.g. "glass").
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "glass" => Some(EffectPreset::Glass),
            "pulse" => Some(EffectPreset::Pulse),
            _ => None,
        }
    }

    /// Next preset in cycle order (for the P key).
    pub fn next(&self) -> Self {
        match self {
            EffectPreset::Glass => EffectPreset::Pulse,
            EffectPreset::Pulse => EffectPreset::Glass,
        }
    }
}

/// Which ramp tints the panel fill and glow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteKind {
    /// Linear mix between the two configured fill endpoints.
    PurpleBlue,
    /// Full cosine ramp a + b*cos(2*pi*(c*x + d)).
    CosineRamp,
}

/// Where a star's color comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarTint {
    /// Per-star phase through the fill palette.
    Palette,
    /// Iridescent hue from the sample's surface angle and time.
    Iridescent,
}

/// Operator that merges the glow layer into the accumulated scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishOp {
    /// Channel-wise sum, unclamped.
    Add,
    /// Screen blend, clamped to displayable range.
    Screen,
}

/// Immutable kernel configuration, fixed for the kernel's lifetime.
#[derive(Clone, Copy, Debug)]
pub struct KernelConfig {
    pub palette: PaletteKind,
    pub star_tint: StarTint,
    pub star_layers: u32,       // depth layers in the particle field
    pub star_speed: f32,        // layer respawn speed (negative = inward drift)
    pub burst: bool,            // radial burst mode
    pub light_dir: Vec2,        // drop-shadow light direction (unit-ish)
    pub shadow_strength: f32,   // shadow attenuation factor
    pub finish: FinishOp,
    pub glow_band: (f32, f32),  // smoothstep edges for the glow mask
    pub dither_amp: f32,        // hash dither folded into the glow mask
    pub normal_smoothness: f32, // damping of the SDF normal's depth component
    pub reflection_period: f32, // seconds per seamless highlight sweep loop
    pub breath_rate: f32,       // pulse rate of the breathing highlight
    pub layer_scale: (f32, f32),// star layer scale at lifetime 0 and 1
    pub fill_lo: Vec3,          // fill mix endpoint at phase 0
    pub fill_hi: Vec3,          // fill mix endpoint at phase 1
}

impl KernelConfig {
    /// The configuration behind a named preset.
    pub fn preset(preset: EffectPreset) -> Self {
        let base = Self {
            palette: PaletteKind::PurpleBlue,
            star_tint: StarTint::Palette,
            star_layers: 3,
            star_speed: -0.2,
            burst: false,
            light_dir: vec2(0.0, -1.0),
            shadow_strength: 0.5,
            finish: FinishOp::Add,
            glow_band: (0.8, 1.0),
            dither_amp: 0.025,
            normal_smoothness: 0.85,
            reflection_period: 60.0,
            breath_rate: 0.888,
            layer_scale: (10.0, 0.25),
            fill_lo: vec3(0.45, 0.07, 0.61),
            fill_hi: vec3(0.36, 0.12, 0.93),
        };
        match preset {
            EffectPreset::Glass => base,
            EffectPreset::Pulse => Self {
                palette: PaletteKind::CosineRamp,
                star_tint: StarTint::Iridescent,
                star_layers: 5,
                light_dir: vec2(0.0, 1.0),
                finish: FinishOp::Screen,
                ..base
            },
        }
    }

    /// Same configuration with burst mode switched.
    pub fn with_burst(mut self, burst: bool) -> Self {
        self.burst = burst;
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::preset(EffectPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_roundtrip() {
        for p in EffectPreset::all() {
            assert_eq!(EffectPreset::from_id(p.id()), Some(*p));
        }
        assert_eq!(EffectPreset::from_id("GLASS"), Some(EffectPreset::Glass));
        assert_eq!(EffectPreset::from_id("nope"), None);
    }

    #[test]
    fn preset_cycle_covers_all() {
        let mut p = EffectPreset::default();
        let n = EffectPreset::all().len();
        let mut seen = Vec::new();
        for _ in 0..n {
            seen.push(p);
            p = p.next();
        }
        assert_eq!(p, EffectPreset::default());
        for q in EffectPreset::all() {
            assert!(seen.contains(q));
        }
    }

    #[test]
    fn presets_differ_where_the_variants_did() {
        let glass = KernelConfig::preset(EffectPreset::Glass);
        let pulse = KernelConfig::preset(EffectPreset::Pulse);
        assert_ne!(glass.star_layers, pulse.star_layers);
        assert_ne!(glass.finish, pulse.finish);
        // The variants disagreed on the light-direction sign; both survive.
        assert!(glass.light_dir.y * pulse.light_dir.y < 0.0);
    }

    #[test]
    fn with_burst_only_touches_burst() {
        let cfg = KernelConfig::default().with_burst(true);
        assert!(cfg.burst);
        assert_eq!(cfg.star_layers, KernelConfig::default().star_layers);
    }
}
