pub mod cache;
pub mod color;
pub mod decoder;
pub mod extractor;
pub mod histogram;
pub mod output;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cache::ColorCache;
pub use decoder::DecodedImage;
pub use extractor::ColorExtractor;
pub use output::ThemeColors;
