//! PNG encoding of pipeline buffers.

use std::io::Cursor;

use depth_colorize::{ChannelOrder, FrameBuffers, RainbowPalette, RampPalette};

use crate::error::ViewerError;

/// Height in pixels of each band in the palette strip.
pub const PALETTE_BAND_HEIGHT: u32 = 32;

fn dimension(value: usize) -> Result<u32, ViewerError> {
    u32::try_from(value)
        .map_err(|_| ViewerError::PngEncode(format!("dimension {value} too large")))
}

/// Encode 8-bit pixel data of the given color type.
pub fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, ViewerError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ViewerError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ViewerError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Equalized depth as an 8-bit grayscale image.
pub fn grayscale_png(buffers: &FrameBuffers) -> Result<Vec<u8>, ViewerError> {
    encode_png(
        dimension(buffers.width())?,
        dimension(buffers.height())?,
        png::ColorType::Grayscale,
        buffers.grayscale(),
    )
}

/// Interleaved color bytes in `order`, written as an RGB image.
pub fn color_png(
    width: usize,
    height: usize,
    color: &[u8],
    order: ChannelOrder,
) -> Result<Vec<u8>, ViewerError> {
    let rgb: Vec<u8> = match order {
        ChannelOrder::Rgb => color.to_vec(),
        ChannelOrder::Bgr => color
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
    };
    encode_png(
        dimension(width)?,
        dimension(height)?,
        png::ColorType::Rgb,
        &rgb,
    )
}

/// A 256-pixel wide strip: the rainbow palette on top, the ramp palette
/// (every eighth entry) below.
pub fn palette_png(rainbow: &RainbowPalette, ramp: &RampPalette) -> Result<Vec<u8>, ViewerError> {
    let mut rainbow_row = Vec::with_capacity(256 * 3);
    let mut ramp_row = Vec::with_capacity(256 * 3);
    for i in 0..=255u8 {
        rainbow_row.extend_from_slice(&rainbow.get(i).to_bytes());
        let entry = ramp.get(i as u16 * 8).unwrap_or_default();
        ramp_row.extend_from_slice(&entry.to_bytes());
    }

    let mut data = Vec::with_capacity(256 * 3 * 2 * PALETTE_BAND_HEIGHT as usize);
    for _ in 0..PALETTE_BAND_HEIGHT {
        data.extend_from_slice(&rainbow_row);
    }
    for _ in 0..PALETTE_BAND_HEIGHT {
        data.extend_from_slice(&ramp_row);
    }

    encode_png(256, PALETTE_BAND_HEIGHT * 2, png::ColorType::Rgb, &data)
}
