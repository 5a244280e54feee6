//! rune-ttf configuration
//!
//! Rendering defaults loaded from `rune-ttf.toml`, with environment
//! variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune-ttf.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneTtfConfig {
    /// Which font to open
    pub font: FontConfig,
    /// Render call inputs
    pub render: RenderConfig,
    /// Style bits applied after opening
    pub style: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a .ttf/.otf/.ttc file
    pub path: Option<PathBuf>,
    /// Point size at 72 DPI
    pub point_size: u32,
    /// Face index within a collection
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub antialias: bool,
    /// `[r, g, b]`
    pub foreground: [u8; 3],
    /// `[r, g, b]`; absent means transparent
    pub background: Option<[u8; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleConfig {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            point_size: 16,
            index: 0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            foreground: [255, 255, 255],
            background: None,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneTtfConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `rune-ttf.toml` from the current directory, or defaults if it
    /// is missing or invalid.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(font) = lookup("RUNE_TTF_FONT") {
            self.font.path = Some(PathBuf::from(font));
        }
        if let Some(val) = lookup("RUNE_TTF_SIZE") {
            match val.parse::<u32>() {
                Ok(size) if size > 0 => self.font.point_size = size,
                _ => log::warn!("ignoring RUNE_TTF_SIZE={val}"),
            }
        }
        if let Some(val) = lookup("RUNE_TTF_ANTIALIAS") {
            self.render.antialias = parse_flag(&val);
        }
        if let Some(val) = lookup("RUNE_TTF_BOLD") {
            self.style.bold = parse_flag(&val);
        }
        if let Some(val) = lookup("RUNE_TTF_ITALIC") {
            self.style.italic = parse_flag(&val);
        }
        if let Some(val) = lookup("RUNE_TTF_UNDERLINE") {
            self.style.underline = parse_flag(&val);
        }
    }

    /// Load from `rune-ttf.toml` (or defaults), then apply environment
    /// overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
