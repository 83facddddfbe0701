//! Backend and location configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! [write]
//! mode = "direct"      # "direct" (default) or "read_only"
//! file_mode = 0o644
//! dir_mode = 0o755
//!
//! [locations]
//! global = ["/srv/app/content/languages"]
//! themes = ["/srv/app/content/themes"]
//! plugins = ["/srv/app/content/plugins"]
//! core = ["/srv/app/content", "/srv/app"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FsResult;
use crate::location::RootList;

/// How the direct backend treats mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// Mutations are real local syscalls.
    #[default]
    Direct,
    /// Every entry reports unwritable and every mutation is refused.
    ReadOnly,
}

/// Write backend configuration, shared by every entity of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    pub mode: ContextMode,
    /// Permissions applied to files created by `put_contents`.
    pub file_mode: u32,
    /// Permissions applied to directories created by `mkdir`.
    pub dir_mode: u32,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            mode: ContextMode::Direct,
            file_mode: 0o644,
            dir_mode: 0o755,
        }
    }
}

impl WriteConfig {
    /// Read-only variant of the defaults.
    pub fn read_only() -> Self {
        Self {
            mode: ContextMode::ReadOnly,
            ..Self::default()
        }
    }
}

/// Configured root directories, one list per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locations {
    /// Global languages directory.
    pub global: RootList,
    pub themes: RootList,
    pub plugins: RootList,
    /// Content and install roots.
    pub core: RootList,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub write: WriteConfig,
    pub locations: Locations,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml(text: &str) -> FsResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading config");
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationRegistry;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.write.mode, ContextMode::Direct);
        assert_eq!(config.write.file_mode, 0o644);
        assert_eq!(config.write.dir_mode, 0o755);
        assert!(config.locations.core.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml(
            r#"
            [write]
            mode = "read_only"
            dir_mode = 0o700

            [locations]
            global = ["/srv/app/languages/"]
            plugins = ["C:\\www\\plugins"]
            "#,
        )
        .unwrap();
        assert_eq!(config.write.mode, ContextMode::ReadOnly);
        assert_eq!(config.write.file_mode, 0o644);
        assert_eq!(config.write.dir_mode, 0o700);
        assert!(config.locations.global.check("/srv/app/languages/x.po"));
        assert!(config.locations.plugins.check("C:/www/plugins/foo"));
    }

    #[test]
    fn test_bad_mode_rejected() {
        let err = Config::from_toml("[write]\nmode = \"ftp\"").unwrap_err();
        assert!(matches!(err, crate::FsError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fsentity.toml");
        std::fs::write(&path, "[write]\nfile_mode = 0o600\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.write.file_mode, 0o600);
    }
}
