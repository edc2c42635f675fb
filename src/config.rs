//! Tool configuration.
//!
//! Handles loading, validating, and merging `gallery.toml`. Every key is
//! optional: a missing file means stock defaults, and a sparse file is laid
//! over the defaults table by table before deserializing.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! min_marker = "-min"        # Stem suffix marking the minified copy
//!
//! [manifest]
//! source_root = "../assets/wallpapers"     # Folder of collection folders
//! output_dir = "../data"                   # Where the manifest is written
//! output_file = "gallery_data.json"
//! fallback_path = "/portfolio/assets/no_image.png"
//! url_prefix = "/portfolio"                # Prepended to every image URL
//! extensions = ["png", "jpg", "jpeg", "webp"]
//!
//! [rename]
//! extensions = ["jpg", "jpeg"]
//! target_extension = "jpg"   # Every renamed file gets this extension
//! separator = "-"            # Between --prefix and the theme word
//! policy = "exhausting"      # or "cycle"
//! vocabulary = ["autumn", "harvest", ...]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::rename::{FALL_WORDS, Policy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Stem suffix identifying the minified copy of an image.
    pub min_marker: String,
    /// Manifest builder settings.
    pub manifest: ManifestConfig,
    /// Themed renamer settings.
    pub rename: RenameConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            min_marker: "-min".to_string(),
            manifest: ManifestConfig::default(),
            rename: RenameConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_marker.is_empty() {
            return Err(ConfigError::Validation("min_marker must not be empty".into()));
        }
        if self.manifest.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "manifest.extensions must not be empty".into(),
            ));
        }
        if self.manifest.output_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "manifest.output_file must not be empty".into(),
            ));
        }
        if self.rename.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "rename.extensions must not be empty".into(),
            ));
        }
        if self.rename.target_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "rename.target_extension must not be empty".into(),
            ));
        }
        if self.rename.vocabulary.is_empty() {
            return Err(ConfigError::Validation(
                "rename.vocabulary must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for word in &self.rename.vocabulary {
            if word.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "rename.vocabulary must not contain empty words".into(),
                ));
            }
            if !seen.insert(word.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "rename.vocabulary lists '{word}' twice"
                )));
            }
        }
        Ok(())
    }
}

/// Manifest builder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Directory whose subfolders are collections. Also the middle segment
    /// of every image URL.
    pub source_root: String,
    /// Directory the manifest is written to (created if missing).
    pub output_dir: String,
    /// Manifest file name inside `output_dir`.
    pub output_file: String,
    /// Image shown by the front end when an entry fails to load.
    pub fallback_path: String,
    /// URL prefix for `image_path` / `download_path`.
    pub url_prefix: String,
    /// Recognized image extensions, matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            source_root: "../assets/wallpapers".to_string(),
            output_dir: "../data".to_string(),
            output_file: "gallery_data.json".to_string(),
            fallback_path: "/portfolio/assets/no_image.png".to_string(),
            url_prefix: "/portfolio".to_string(),
            extensions: ["png", "jpg", "jpeg", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ManifestConfig {
    /// Full path of the manifest file.
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(&self.output_file)
    }
}

/// Themed renamer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Extensions picked up by the renamer, matched case-insensitively.
    pub extensions: Vec<String>,
    /// Extension every renamed file gets, whatever it had before.
    pub target_extension: String,
    /// Joins `--prefix` and the theme word.
    pub separator: String,
    /// How theme words are handed out once per group.
    pub policy: Policy,
    /// Theme words. Shuffled once per run.
    pub vocabulary: Vec<String>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            target_extension: "jpg".to_string(),
            separator: "-".to_string(),
            policy: Policy::default(),
            vocabulary: FALL_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    match overlay {
        Some(_) => tracing::debug!(path = %path.display(), "loading config"),
        None => tracing::debug!(path = %path.display(), "no config file, using defaults"),
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Wallpaper Gallery Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Stem suffix that marks the minified copy of an image:
#   sunset.jpg      -> full variant of "sunset"
#   sunset-min.jpg  -> minified variant of "sunset"
min_marker = "-min"

# ---------------------------------------------------------------------------
# Manifest builder (`wallpaper-gal build`)
# ---------------------------------------------------------------------------
[manifest]
# Folder containing one subfolder per collection.
source_root = "../assets/wallpapers"

# The manifest is written to <output_dir>/<output_file>.
output_dir = "../data"
output_file = "gallery_data.json"

# Image the front end shows when an entry fails to load.
fallback_path = "/portfolio/assets/no_image.png"

# Image URLs are <url_prefix>/<source_root>/<collection>/<file>.
url_prefix = "/portfolio"

# Recognized image extensions (case-insensitive).
extensions = ["png", "jpg", "jpeg", "webp"]

# ---------------------------------------------------------------------------
# Themed renamer (`wallpaper-gal rename <FOLDER>`)
# ---------------------------------------------------------------------------
[rename]
# Extensions picked up by the renamer (case-insensitive).
extensions = ["jpg", "jpeg"]

# Every renamed file gets this extension, whatever it had before.
target_extension = "jpg"

# Joins --prefix and the theme word: "fall" + "-" + "maple" -> "fall-maple".
separator = "-"

# "exhausting": each word used once, then reused as word-1, word-2, ...
# "cycle":      words repeat in shuffled order once the list runs out.
policy = "exhausting"

# Theme words, shuffled once per run.
vocabulary = [
    "autumn", "harvest", "pumpkin", "maple", "crisp", "cozy",
    "scarecrow", "hayride", "cider", "bonfire", "sweater", "leaves",
    "orange", "golden", "acorn", "squash", "gourd", "chilly",
    "october", "november", "rustic", "foliage", "cranberry", "nutmeg",
    "cinnamon", "plaid", "corn", "woods", "orchard", "spice",
    "amber", "bronze", "chestnut", "copper", "warm", "woodland",
]
"##
}
