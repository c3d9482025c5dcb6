use image::RgbImage;
use thiserror::Error;

use super::color::RgbColor;

/// Why image bytes could not be turned into colors.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("image is empty")]
    Empty,

    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
}

/// A decoded, non-empty 8-bit RGB raster.
pub struct DecodedImage {
    pixels: RgbImage,
}

impl DecodedImage {
    /// Decodes JPEG or PNG bytes, sniffing the format from the content.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let dynamic = image::load_from_memory(bytes)?;
        Self::from_rgb(dynamic.to_rgb8())
    }

    pub fn from_rgb(pixels: RgbImage) -> Result<Self, DecodeError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(DecodeError::Empty);
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Colors on a `stride` x `stride` grid starting at the top-left pixel,
    /// row by row.
    pub fn sample_grid(&self, stride: u32) -> impl Iterator<Item = RgbColor> + '_ {
        let step = stride.max(1) as usize;
        (0..self.height()).step_by(step).flat_map(move |y| {
            (0..self.width())
                .step_by(step)
                .map(move |x| RgbColor::from(*self.pixels.get_pixel(x, y)))
        })
    }
}
