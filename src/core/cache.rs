use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::output::ThemeColors;
use crate::shared::constants;
use crate::utils::config::ExtractorConfig;
use crate::utils::logger;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    identity: String,
    config: ExtractorConfig,
    colors: ThemeColors,
    computed_at: String,
}

/// Last computed colors, keyed by a caller-supplied identity
/// (track id, wallpaper path, ...).
///
/// Holds a single entry: storing a new identity invalidates the previous one.
/// Entries are only served for the settings they were computed with.
pub struct ColorCache {
    path: PathBuf,
}

impl ColorCache {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(constants::CACHE_FILE) }
    }

    /// `<cache dir>/barhue`, or `dir` when given.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_dir().context("no cache directory available on this platform")?,
        };
        Ok(Self::new(&dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Colors stored for `identity` under `config`. Anything else, including
    /// an unreadable cache file, is a miss.
    pub fn lookup(&self, identity: &str, config: &ExtractorConfig) -> Option<ThemeColors> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                logger::warn(&format!("failed to read {}: {}", self.path.display(), e));
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) if entry.identity == identity && entry.config == *config => {
                logger::debug(&format!("cache hit for `{}` ({})", identity, entry.computed_at));
                Some(entry.colors)
            }
            Ok(entry) if entry.identity == identity => {
                logger::debug(&format!("settings changed since `{}` was cached", identity));
                None
            }
            Ok(entry) => {
                logger::debug(&format!("cache holds `{}`, wanted `{}`", entry.identity, identity));
                None
            }
            Err(e) => {
                logger::warn(&format!("discarding corrupt cache {}: {}", self.path.display(), e));
                None
            }
        }
    }

    pub fn store(
        &self,
        identity: &str,
        config: &ExtractorConfig,
        colors: &ThemeColors,
    ) -> Result<()> {
        validate_identity(identity)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let entry = CacheEntry {
            identity: identity.to_string(),
            config: config.clone(),
            colors: *colors,
            computed_at: chrono::Local::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

pub fn default_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(constants::APP_NAME))
}

pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.trim().is_empty() {
        bail!("cache key must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::RgbColor;

    fn colors(seed: u8) -> ThemeColors {
        ThemeColors {
            dominant: RgbColor(seed, 100, 200),
            background: RgbColor(10, seed, 30),
            text: Some(RgbColor(240, 240, 240)),
        }
    }

    fn settings() -> ExtractorConfig {
        ExtractorConfig::default()
    }

    fn temp_cache(name: &str) -> ColorCache {
        let dir = std::env::temp_dir().join(name);
        let cache = ColorCache::new(&dir);
        cache.clear().unwrap();
        cache
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = temp_cache("barhue_test_cache_hit");
        assert_eq!(cache.lookup("spotify:track:1", &settings()), None);

        cache.store("spotify:track:1", &settings(), &colors(1)).unwrap();
        assert_eq!(cache.lookup("spotify:track:1", &settings()), Some(colors(1)));
        assert_eq!(cache.lookup("spotify:track:2", &settings()), None);
    }

    #[test]
    fn test_new_identity_invalidates_previous() {
        let cache = temp_cache("barhue_test_cache_replace");
        cache.store("a", &settings(), &colors(1)).unwrap();
        cache.store("b", &settings(), &colors(2)).unwrap();

        assert_eq!(cache.lookup("a", &settings()), None);
        assert_eq!(cache.lookup("b", &settings()), Some(colors(2)));
    }

    #[test]
    fn test_clear() {
        let cache = temp_cache("barhue_test_cache_clear");
        cache.store("a", &settings(), &colors(3)).unwrap();
        cache.clear().unwrap();
        assert!(!cache.path().exists());
        assert_eq!(cache.lookup("a", &settings()), None);
        // clearing twice is fine
        cache.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let cache = temp_cache("barhue_test_cache_corrupt");
        fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        fs::write(cache.path(), "{ not json").unwrap();
        assert_eq!(cache.lookup("a", &settings()), None);

        // and is overwritten by the next store
        cache.store("a", &settings(), &colors(4)).unwrap();
        assert_eq!(cache.lookup("a", &settings()), Some(colors(4)));
    }

    #[test]
    fn test_empty_identity_rejected() {
        let cache = temp_cache("barhue_test_cache_empty_key");
        assert!(cache.store("  ", &settings(), &colors(5)).is_err());
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_changed_settings_are_a_miss() {
        let cache = temp_cache("barhue_test_cache_settings");
        cache.store("spotify:track:1", &settings(), &colors(6)).unwrap();

        let darker = settings().with_overrides(None, None, Some(0.5)).unwrap();
        assert_eq!(cache.lookup("spotify:track:1", &darker), None);

        let mut coarser = settings();
        coarser.dominant_stride = 9;
        assert_eq!(cache.lookup("spotify:track:1", &coarser), None);

        // recomputing under the new settings replaces the entry
        cache.store("spotify:track:1", &darker, &colors(7)).unwrap();
        assert_eq!(cache.lookup("spotify:track:1", &darker), Some(colors(7)));
        assert_eq!(cache.lookup("spotify:track:1", &settings()), None);
    }
}
