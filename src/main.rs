// What you SEE now:
// • A glowing rounded glass panel over a drifting star field, animated forever.
// • P cycles the effect preset (GLASS / PULSE). B toggles burst mode.
// • S saves the current frame as a transparent PNG. ESC quits.
// • Resizing the window just changes the next frame's uniforms.

mod composite;
mod config;
mod draw;
mod error;
mod gamma;
mod hash;
mod kernel;
mod math;
mod palette;
mod sdf;
mod snapshot;
mod starfield;
mod surface;
mod types;

use config::{EffectPreset, KernelConfig};
use draw::{Drawer, draw_text_5x7};
use error::Error;
use gamma::GammaLut;
use glam::vec2;
use kernel::FrameKernel;
use std::time::{Duration, Instant};
use types::{FrameBuffer, FrameUniforms};

// Reference panel proportions: an 8:3 box filling the surface minus margins.
const PANEL_RATIO: f32 = 8.0 / 3.0;
const CORNER_RADIUS: f32 = 0.05;
// The "page" behind the effect, as packed sRGB.
const BACKDROP_SRGB: u32 = 0x00_0B_0C_14;

/// Map window geometry to this frame's uniforms: the panel tracks a centered
/// target box derived from the surface height, like the UI element it backs.
fn frame_uniforms(width: usize, height: usize, time: f32) -> FrameUniforms {
    let resolution = vec2(width as f32, height as f32);
    let target_size = vec2(0.8 * PANEL_RATIO * resolution.y, 0.6 * resolution.y);
    FrameUniforms {
        resolution,
        target_offset: (resolution - target_size) * 0.5,
        target_size,
        corner_radius: CORNER_RADIUS,
        time,
    }
}

fn main() -> Result<(), Error> {
    /* --- CLI: optional preset id, optional --burst ---
       Visual: picks which composition style the window opens with. */
    let mut preset = EffectPreset::default();
    let mut burst = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--burst" => burst = true,
            other => {
                preset = EffectPreset::from_id(other).ok_or_else(|| Error::BadPreset(other.into()))?;
            }
        }
    }

    /* --- Window setup ---
       Visual: window opens dark, then animates from frame one. */
    let mut drawer = Drawer::new("Nebula Panel — Cosmic Glass", 800, 300)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(800, 300);

    /* --- Gamma LUT (linear-light kernel -> sRGB window pixels) ---
       Visual: correct brightness for the glow falloffs, no gray haze. */
    let lut = GammaLut::new();
    let backdrop = lut.unpack_srgb(BACKDROP_SRGB);

    /* --- The frame kernel ---
       All effect constants are fixed here at construction; toggling burst or
       cycling presets swaps in a freshly constructed kernel. */
    let mut frame_kernel = FrameKernel::new(KernelConfig::preset(preset).with_burst(burst));

    /* --- Clock / HUD / FPS ---
       Visual: small text shows the active preset + FPS. */
    let start = Instant::now();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut snapshot_count: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Track the window size. A resize only changes the uniforms (and
           the buffer) for this frame onward; the kernel itself never changes. */
        let (w, h) = drawer.size();
        if w != screen.width || h != screen.height {
            screen = FrameBuffer::new(w, h);
        }

        /* 2) Inputs */
        if drawer.b_pressed_once() {
            // Visual: the star field collapses into the radial burst (or back).
            burst = !burst;
            frame_kernel = FrameKernel::new(KernelConfig::preset(preset).with_burst(burst));
        }
        if drawer.p_pressed_once() {
            // Visual: palette, star density and composition switch styles.
            preset = preset.next();
            frame_kernel = FrameKernel::new(KernelConfig::preset(preset).with_burst(burst));
        }

        /* 3) This frame's uniforms: one monotonic clock, current geometry. */
        let uniforms = frame_uniforms(screen.width, screen.height, start.elapsed().as_secs_f32());

        /* 4) Evaluate the kernel for every pixel (rows in parallel) and
           composite the result over the backdrop.
           Visual: the whole animated effect appears in the buffer. */
        frame_kernel.render_into(&uniforms, &mut screen, &lut, backdrop);

        /* 5) Snapshot on demand (straight alpha, without the backdrop). */
        if drawer.s_pressed_once() {
            snapshot_count += 1;
            let path = format!("nebula-{snapshot_count:04}.png");
            snapshot::save_png(&frame_kernel, &uniforms, &lut, &path)?;
            println!("Saved {path}");
        }

        /* 6) HUD text on top */
        let mut hud = format!("{} | {}", preset.name(), hud_fps_text);
        if burst {
            hud.push_str(" | BURST");
        }
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 7) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 8) FPS counter (prints to terminal + HUD once per second) */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            println!("FPS: {:.1}", fps);                   // terminal
            hud_fps_text = format!("FPS: {:.1}", fps);     // HUD part
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
