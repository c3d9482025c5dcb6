mod core;
mod shared;
mod utils;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::{ColorCache, ColorExtractor, DecodedImage, ThemeColors};
use crate::utils::config::ExtractorConfig;
use crate::utils::{file_utils, logger};

#[derive(Parser)]
#[command(author, version, about = "Bar theme colors from album art or wallpapers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CacheArgs {
    /// Directory holding the color cache (defaults to the user cache dir)
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(Args, Default)]
struct SettingsArgs {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dominant_stride: Option<u32>,
    #[arg(long)]
    background_stride: Option<u32>,
    #[arg(long)]
    darken_factor: Option<f64>,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<ExtractorConfig> {
        ExtractorConfig::load(self.config.as_deref())?.with_overrides(
            self.dominant_stride,
            self.background_stride,
            self.darken_factor,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print DOMINANT/BACKGROUND/LABEL/ICON colors for an image
    Extract {
        /// JPEG or PNG file, `-` or nothing for stdin
        input: Option<String>,
        /// Identity of the image (track id, wallpaper path); reuses colors computed for it
        #[arg(short = 'k', long)]
        cache_key: Option<String>,
        #[command(flatten)]
        cache: CacheArgs,
        /// Only print DOMINANT and BACKGROUND
        #[arg(long, default_value_t = false)]
        no_text: bool,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print cached colors for an identity, nothing on a miss
    Lookup {
        #[arg(short = 'k', long)]
        cache_key: String,
        #[command(flatten)]
        cache: CacheArgs,
        /// Only print DOMINANT and BACKGROUND
        #[arg(long, default_value_t = false)]
        no_text: bool,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Forget cached colors
    ClearCache {
        #[command(flatten)]
        cache: CacheArgs,
    },
    /// Show the effective extraction settings
    Config {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = crate::core::cache::default_dir() {
        logger::init(&dir);
    }

    let result = run(cli.command, &mut io::stdout().lock());
    if let Err(e) = &result {
        logger::error(&format!("{:#}", e));
    }
    result
}

/// Runs one command, writing bar lines to `out`.
///
/// Unreadable or undecodable images are logged and leave `out` empty; the bar
/// scripts read missing keys as "keep the current colors". Only usage, config
/// and cache errors are returned.
fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Extract {
            input,
            cache_key,
            cache,
            no_text,
            settings,
        } => {
            let config = settings.resolve()?;

            let cache = match &cache_key {
                Some(key) => {
                    crate::core::cache::validate_identity(key)?;
                    Some(ColorCache::open(cache.cache_dir.as_deref())?)
                }
                None => None,
            };

            if let (Some(cache), Some(key)) = (&cache, &cache_key) {
                if let Some(colors) = cache.lookup(key, &config) {
                    write!(out, "{}", with_text(colors, !no_text).render())?;
                    return Ok(());
                }
            }

            // cached entries always carry the text color so either output mode can reuse them
            let colors = match compute(input.as_deref(), config.clone()) {
                Ok(colors) => colors,
                Err(e) => {
                    logger::error(&format!("no colors: {:#}", e));
                    return Ok(());
                }
            };
            write!(out, "{}", with_text(colors, !no_text).render())?;

            if let (Some(cache), Some(key)) = (&cache, &cache_key) {
                if let Err(e) = cache.store(key, &config, &colors) {
                    logger::warn(&format!("{:#}", e));
                }
            }
        }
        Commands::Lookup {
            cache_key,
            cache,
            no_text,
            settings,
        } => {
            let config = settings.resolve()?;
            let cache = ColorCache::open(cache.cache_dir.as_deref())?;
            if let Some(colors) = cache.lookup(&cache_key, &config) {
                write!(out, "{}", with_text(colors, !no_text).render())?;
            }
        }
        Commands::ClearCache { cache } => {
            let cache = ColorCache::open(cache.cache_dir.as_deref())?;
            cache.clear()?;
            logger::info(&format!("cleared {}", cache.path().display()));
        }
        Commands::Config { settings } => {
            let config = settings.resolve()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        }
    }

    Ok(())
}

fn compute(input: Option<&str>, config: ExtractorConfig) -> Result<ThemeColors> {
    let bytes = file_utils::read_input(input)?;
    let image = DecodedImage::decode(&bytes).context("Failed to decode image")?;
    logger::info(&format!(
        "decoded {}x{} image ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    ));
    Ok(ColorExtractor::new(config).extract(&image, true))
}

fn with_text(mut colors: ThemeColors, wanted: bool) -> ThemeColors {
    if !wanted {
        colors.text = None;
    }
    colors
}
