pub const APP_NAME: &str = "barhue";

pub const CONFIG_FILE: &str = "barhue.config";
pub const CACHE_FILE: &str = "colors.json";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Read the image from stdin when given as the input path.
pub const STDIN_PATH: &str = "-";

pub const DEFAULT_DOMINANT_STRIDE: u32 = 5;
pub const DEFAULT_BACKGROUND_STRIDE: u32 = 8;

// Luminance below this is too dark to be a dominant color.
pub const DEFAULT_DARK_THRESHOLD: f64 = 100.0;
// All three channels above this is too close to white.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;

pub const DEFAULT_DARKEN_FACTOR: f64 = 0.75;
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 140.0;

pub const DARK_TEXT: (u8, u8, u8) = (20, 20, 20);
pub const LIGHT_TEXT: (u8, u8, u8) = (240, 240, 240);

pub const KEY_DOMINANT: &str = "DOMINANT";
pub const KEY_BACKGROUND: &str = "BACKGROUND";
pub const KEY_LABEL: &str = "LABEL";
pub const KEY_ICON: &str = "ICON";
