use super::color::RgbColor;
use super::decoder::DecodedImage;
use super::histogram::ColorHistogram;
use super::output::ThemeColors;
use crate::utils::config::ExtractorConfig;
use crate::utils::logger;

/// Derives bar colors from an image.
pub struct ColorExtractor {
    config: ExtractorConfig,
}

impl ColorExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Most frequent usable color on the sampling grid.
    ///
    /// Falls back to the unfiltered grid when every sample is too dark or too
    /// close to white, so a non-empty image always has a dominant color.
    pub fn extract_dominant(&self, image: &DecodedImage) -> RgbColor {
        let stride = self.config.dominant_stride;
        let mut hist = ColorHistogram::new();

        for color in image.sample_grid(stride) {
            if color.is_usable(self.config.dark_threshold, self.config.white_threshold) {
                hist.add(color);
            }
        }

        if hist.is_empty() {
            logger::debug("no usable samples, retrying without filter");
            for color in image.sample_grid(stride) {
                hist.add(color);
            }
        }

        logger::debug(&format!("dominant histogram: {} distinct colors", hist.distinct()));
        // the grid always includes (0, 0)
        hist.mode().unwrap_or_default()
    }

    /// Darkened mean of the sampling grid.
    pub fn extract_background(&self, image: &DecodedImage) -> RgbColor {
        let (mut r_sum, mut g_sum, mut b_sum, mut count) = (0u64, 0u64, 0u64, 0u64);

        for RgbColor(r, g, b) in image.sample_grid(self.config.background_stride) {
            r_sum += u64::from(r);
            g_sum += u64::from(g);
            b_sum += u64::from(b);
            count += 1;
        }

        let count = count.max(1);
        let mean = RgbColor(
            (r_sum / count) as u8,
            (g_sum / count) as u8,
            (b_sum / count) as u8,
        );
        mean.darken(self.config.darken_factor)
    }

    /// Near-black on bright backgrounds, near-white otherwise.
    pub fn readable_text_color(&self, background: RgbColor) -> RgbColor {
        if background.luminance() > self.config.contrast_threshold {
            self.config.dark_text
        } else {
            self.config.light_text
        }
    }

    pub fn extract(&self, image: &DecodedImage, with_text: bool) -> ThemeColors {
        let dominant = self.extract_dominant(image);
        let background = self.extract_background(image);
        let text = with_text.then(|| self.readable_text_color(background));

        ThemeColors { dominant, background, text }
    }
}

impl Default for ColorExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
