use serde::{Deserialize, Serialize};

use super::color::RgbColor;
use crate::shared::constants;

/// Colors handed to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub dominant: RgbColor,
    pub background: RgbColor,
    /// Used for both the label and the icon.
    pub text: Option<RgbColor>,
}

impl ThemeColors {
    /// `KEY=0xFFRRGGBB` lines in the order the bar scripts read them.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}={}", constants::KEY_DOMINANT, self.dominant.to_argb_hex()),
            format!("{}={}", constants::KEY_BACKGROUND, self.background.to_argb_hex()),
        ];
        if let Some(text) = self.text {
            lines.push(format!("{}={}", constants::KEY_LABEL, text.to_argb_hex()));
            lines.push(format!("{}={}", constants::KEY_ICON, text.to_argb_hex()));
        }
        lines
    }

    pub fn render(&self) -> String {
        let mut out = self.to_lines().join("\n");
        out.push('\n');
        out
    }
}
