//! Error types for Tessera.
//!
//! Menu resolution and selection never fail; errors only come from loading
//! menu definitions and configuration.

use std::path::PathBuf;

/// Result type alias for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building menus from definitions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A menu definition entry cannot be turned into a menu item.
    #[error("Invalid menu item at {path}: {message}")]
    InvalidMenuItem { path: String, message: String },

    /// A configuration value is out of range.
    #[error("Invalid menu configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("Failed to parse menu configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read menu configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid menu item error.
    pub fn invalid_menu_item(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidMenuItem {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
