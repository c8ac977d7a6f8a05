//! Conversion of the frame buffer to 8-bit images

use std::path::Path;

use crate::rasterizer::{RasterError, RasterResult, Rasterizer, Vec3};

fn channel_to_u8(c: f32) -> u8 {
    // NaN clamps to NaN; treat it as black
    if c.is_nan() {
        return 0;
    }
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert one color to RGBA bytes (opaque)
pub fn color_to_rgba(c: Vec3) -> [u8; 4] {
    [channel_to_u8(c.x), channel_to_u8(c.y), channel_to_u8(c.z), 255]
}

/// Frame buffer as RGBA8, top row first
pub fn to_rgba8(raster: &Rasterizer) -> Vec<u8> {
    raster
        .frame_buffer()
        .iter()
        .flat_map(|&c| color_to_rgba(c))
        .collect()
}

/// Frame size as 16-bit texture dimensions, for presenting on a GPU texture
pub fn texture_size(raster: &Rasterizer) -> RasterResult<(u16, u16)> {
    let (width, height) = (raster.width(), raster.height());
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RasterError::InvalidDimensions { width, height }),
    }
}

/// Encode the frame buffer as a PNG file
pub fn save_png<P: AsRef<Path>>(raster: &Rasterizer, path: P) -> RasterResult<()> {
    let path = path.as_ref();
    let img = image::RgbaImage::from_raw(raster.width() as u32, raster.height() as u32, to_rgba8(raster))
        .ok_or(RasterError::InvalidDimensions { width: raster.width(), height: raster.height() })?;
    img.save(path)?;
    log::info!("wrote {}x{} frame to {}", raster.width(), raster.height(), path.display());
    Ok(())
}
