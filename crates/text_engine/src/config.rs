//! Engine configuration
//!
//! Configuration for the text engine, serialized with serde and parsed
//! from TOML. The main knob is the glyph warm-up range: which code
//! points are rasterized eagerly when a font is loaded, so that first-use
//! rasterization latency lands outside per-frame draw calls.

use serde::{Deserialize, Serialize};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// A field failed validation
    #[error("Invalid config value: {0}")]
    ValidationError(String),
}

/// Inclusive range of code points rasterized eagerly on font load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmupRange {
    /// First code point in the range
    pub first: u32,
    /// Last code point in the range (inclusive)
    pub last: u32,
}

impl WarmupRange {
    /// Printable ASCII, space through DEL
    pub const ASCII: Self = Self { first: 32, last: 127 };

    /// Iterate the characters of the range, skipping invalid code points
    pub fn chars(self) -> impl Iterator<Item = char> {
        (self.first..=self.last).filter_map(char::from_u32)
    }
}

/// Text engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEngineConfig {
    /// Code points rasterized eagerly when a font is loaded.
    ///
    /// `None` disables warm-up entirely; every glyph is then rasterized
    /// lazily on first use during draw or measure calls.
    pub warmup: Option<WarmupRange>,
}

impl Default for TextEngineConfig {
    fn default() -> Self {
        Self {
            warmup: Some(WarmupRange::ASCII),
        }
    }
}

impl TextEngineConfig {
    /// Parse a configuration from a TOML document
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(range) = self.warmup {
            if range.first > range.last {
                return Err(ConfigError::ValidationError(format!(
                    "warm-up range is inverted: {}..={}",
                    range.first, range.last
                )));
            }
            if range.last > char::MAX as u32 {
                return Err(ConfigError::ValidationError(format!(
                    "warm-up range exceeds the code point space: {}",
                    range.last
                )));
            }
        }
        Ok(())
    }
}
