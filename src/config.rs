//! Process-wide capture and rendering settings
//!
//! Applications that want non-default behaviour install [`Settings`] once during
//! start-up, typically from a section of their own TOML configuration:
//!
//! ```rust,no_run
//! use errs::config::{self, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_toml_str("max_depth = 32\nframe_paths = \"base\"")?;
//!     config::install(settings)?;
//!     Ok(())
//! }
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::FramePaths;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound accepted for [`Settings::max_depth`].
pub const MAX_DEPTH_LIMIT: usize = 256;

static INSTALLED: OnceCell<Settings> = OnceCell::new();

static DEFAULTS: Settings = Settings {
    max_depth: DEFAULT_MAX_DEPTH,
    frame_paths: FramePaths::Full,
};

/// Settings consulted by stack capture and by `{:#}` rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of frames kept per captured stack.
    pub max_depth: usize,
    /// Frame path style used by the alternate (`{:#}`) rendering of an error.
    pub frame_paths: FramePaths,
}

impl Default for Settings {
    fn default() -> Self {
        DEFAULTS.clone()
    }
}

/// Errors raised while building or installing [`Settings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_depth must be between 1 and {limit}, got {value}")]
    InvalidMaxDepth { value: usize, limit: usize },

    #[error("settings have already been installed")]
    AlreadyInstalled,

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Settings {
    /// Parses settings from TOML and validates them. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidMaxDepth`] for an out-of-range depth.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::InvalidMaxDepth {
                value: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

/// Installs process-wide settings. Only the first successful call takes effect.
///
/// # Errors
///
/// Fails when the settings do not validate or when settings were already installed.
pub fn install(settings: Settings) -> Result<(), ConfigError> {
    install_into(&INSTALLED, settings)
}

fn install_into(cell: &OnceCell<Settings>, settings: Settings) -> Result<(), ConfigError> {
    settings.validate()?;
    cell.set(settings).map_err(|_| ConfigError::AlreadyInstalled)?;
    tracing::debug!("error capture settings installed");
    Ok(())
}

/// The installed settings, or the defaults when nothing was installed.
pub fn settings() -> &'static Settings {
    INSTALLED.get().unwrap_or(&DEFAULTS)
}
