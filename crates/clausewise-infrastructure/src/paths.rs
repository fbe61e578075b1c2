//! Unified path management for clausewise data files.
//!
//! All durable state lives under one base directory so the stores stay
//! consistent across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for clausewise.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/clausewise/        # Base directory
/// ├── secret.toml              # API keys (optional; env var wins)
/// ├── documents/               # One TOML file per ingested document
/// │   └── <uid>.toml
/// └── sessions/                # One TOML file per conversation session
///     └── <session-id>.toml
/// ```
pub struct ClausewisePaths;

impl ClausewisePaths {
    /// Returns the clausewise base directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: path to the base directory (e.g., `~/.config/clausewise/`)
    /// - `Err(PathError::HomeDirNotFound)`: could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("clausewise"))
            .ok_or(PathError::HomeDirNotFound)
    }
}
