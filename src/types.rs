// Core value types shared by the kernel and the host loop.

use glam::{Vec2, Vec3};

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Color plus coverage, the universal layer type.
/// Alpha accumulates additively across layers; nothing clamps it unless a
/// compositing operator is asked to (`clamped = true`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color4 {
    pub rgb: Vec3,
    pub a: f32,
}

impl Color4 {
    pub const TRANSPARENT: Color4 = Color4 { rgb: Vec3::ZERO, a: 0.0 };

    pub fn new(rgb: Vec3, a: f32) -> Self {
        Self { rgb, a }
    }
}

/// Per-frame inputs, supplied once per frame by the host loop.
/// `time` is read from one monotonic clock, but the kernel is a pure function
/// of it; any finite value is a valid input.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub resolution: Vec2,    // output surface size in device pixels
    pub target_offset: Vec2, // top-left of the panel's on-surface rectangle, pixels
    pub target_size: Vec2,   // size of that rectangle, pixels
    pub corner_radius: f32,  // normalized (units of surface height)
    pub time: f32,           // elapsed seconds
}

impl FrameUniforms {
    /// Center of the panel rectangle in pixels.
    pub fn panel_center(&self) -> Vec2 {
        self.target_offset + self.target_size * 0.5
    }
}
