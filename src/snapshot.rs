// Saves one rendered frame as a straight-alpha RGBA PNG.
// Visual: the file shows the effect exactly as the kernel produced it,
// including transparency, without the window's backdrop composite.

use crate::error::Error;
use crate::gamma::GammaLut;
use crate::kernel::FrameKernel;
use crate::types::FrameUniforms;
use image::{ImageBuffer, Rgba};

pub fn save_png(
    kernel: &FrameKernel,
    uniforms: &FrameUniforms,
    lut: &GammaLut,
    path: &str,
) -> Result<(), Error> {
    let width = uniforms.resolution.x as usize;
    let height = uniforms.resolution.y as usize;
    if width == 0 || height == 0 {
        return Err(Error::Snapshot("zero-sized surface".into()));
    }

    let bytes = kernel.render_rgba(uniforms, width, height, lut);
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width as u32, height as u32, bytes)
            .ok_or_else(|| Error::Snapshot("buffer size mismatch".into()))?;

    img.save(path).map_err(|e| Error::Snapshot(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KernelConfig;
    use glam::vec2;

    #[test]
    fn zero_surface_is_rejected_not_rendered() {
        let kernel = FrameKernel::new(KernelConfig::default());
        let uniforms = FrameUniforms {
            resolution: vec2(0.0, 0.0),
            target_offset: vec2(0.0, 0.0),
            target_size: vec2(0.0, 0.0),
            corner_radius: 0.05,
            time: 0.0,
        };
        let lut = GammaLut::new();
        assert!(save_png(&kernel, &uniforms, &lut, "/tmp/never-written.png").is_err());
    }
}
