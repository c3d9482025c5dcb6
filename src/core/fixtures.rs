//! In-memory test images.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

use super::color::RgbColor;

pub fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

pub fn solid(width: u32, height: u32, color: RgbColor) -> RgbImage {
    RgbImage::from_pixel(width, height, image::Rgb([color.0, color.1, color.2]))
}

pub fn solid_png(width: u32, height: u32, color: RgbColor) -> Vec<u8> {
    encode(solid(width, height, color), ImageFormat::Png)
}

pub fn solid_jpeg(width: u32, height: u32, color: RgbColor) -> Vec<u8> {
    encode(solid(width, height, color), ImageFormat::Jpeg)
}

/// Columns left of `split_x` are `left`, the rest `right`.
pub fn split(width: u32, height: u32, split_x: u32, left: RgbColor, right: RgbColor) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let c = if x < split_x { left } else { right };
        image::Rgb([c.0, c.1, c.2])
    })
}
