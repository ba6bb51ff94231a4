//! Texture inspection.

use crate::error::Result;
use std::io::Cursor;

/// Fallback dimensions when a model has no readable raster texture.
pub const DEFAULT_TEXTURE_SIZE: (u32, u32) = (16, 16);

/// Read the width and height of an encoded texture without decoding pixels.
pub fn texture_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 255, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
