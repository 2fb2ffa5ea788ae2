use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building a [`crate::config::ToastConfig`].
///
/// Runtime toast operations never fail; only configuration is validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid toast configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown animation style `{0}` (expected up_in_up_out, right_in_out or zoom_in_out)")]
    UnknownAnimationStyle(String),

    #[error("unknown animation `{0}`")]
    UnknownAnimation(String),

    #[error("unknown position `{0}` (expected top, center or bottom)")]
    UnknownPosition(String),

    #[error("unknown severity `{0}` (expected info, success, warn or error)")]
    UnknownSeverity(String),

    #[error("unknown theme `{0}` (expected light or dark)")]
    UnknownTheme(String),

    #[error("unknown color `{0}`")]
    UnknownColor(String),

    #[error("backdrop_opacity must be within 0.0..=1.0, got {0}")]
    InvalidOpacity(f32),

    #[error("toast size {width}x{height} is below the minimum {min_width}x{min_height}")]
    InvalidSize {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}
