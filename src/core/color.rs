use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a 24-bit RGB color
///
/// Always fully opaque; the alpha byte only appears when formatted for the bar.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub fn from_tuple((r, g, b): (u8, u8, u8)) -> Self {
        Self(r, g, b)
    }

    /// Perceived brightness in thousandths (`299R + 587G + 114B`).
    ///
    /// Integer so that threshold comparisons at whole values are exact.
    pub fn luminance_milli(self) -> u32 {
        299 * u32::from(self.0) + 587 * u32::from(self.1) + 114 * u32::from(self.2)
    }

    /// Perceived brightness (ITU-R BT.601), 0.0 - 255.0
    pub fn luminance(self) -> f64 {
        f64::from(self.luminance_milli()) / 1000.0
    }

    pub fn is_too_dark(self, dark_threshold: f64) -> bool {
        self.luminance() < dark_threshold
    }

    pub fn is_too_close_to_white(self, white_threshold: u8) -> bool {
        self.0 > white_threshold && self.1 > white_threshold && self.2 > white_threshold
    }

    pub fn is_usable(self, dark_threshold: f64, white_threshold: u8) -> bool {
        !self.is_too_dark(dark_threshold) && !self.is_too_close_to_white(white_threshold)
    }

    /// Multiplies every channel by `factor`, truncating.
    pub fn darken(self, factor: f64) -> Self {
        // `as u8` saturates, so factors above 1.0 clamp at 255
        let scale = |c: u8| (f64::from(c) * factor) as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }

    /// `0xFFRRGGBB`, the literal sketchybar expects.
    pub fn to_argb_hex(self) -> String {
        format!("0xFF{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl From<image::Rgb<u8>> for RgbColor {
    fn from(px: image::Rgb<u8>) -> Self {
        Self(px[0], px[1], px[2])
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_argb_hex())
    }
}
