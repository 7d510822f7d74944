//! Resolver configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::asset_paths::is_absolute_url;
use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "kawaii-assets.json";

/// Explicit configuration injected into the resolver at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Path to the build manifest, relative paths are resolved against the project directory.
  pub manifest_path: PathBuf,
  /// Public URL prefix of the production build output.
  pub base_url: String,
  /// Origin of the development server.
  pub dev_server_url: String,
  /// Debug flag allowing development mode when no manifest exists.
  pub debug: bool,
  /// Theme version handed to the host with each enqueue for cache busting.
  pub version: Option<String>,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      manifest_path: PathBuf::from("dist/.vite/manifest.json"),
      base_url: "/dist".into(),
      dev_server_url: "http://localhost:3000".into(),
      debug: false,
      version: None,
    }
  }
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided project directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall back to default
  /// values. The manifest path is anchored to `project_dir` either way.
  pub fn discover(project_dir: &Path) -> Self {
    let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
    let mut config = Self::from_path(&candidate).unwrap_or_else(|| {
      tracing::debug!(path = %candidate.display(), "using default resolver configuration");
      Self::default()
    });
    config.manifest_path = config.manifest_path_in(project_dir);
    config
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Manifest path anchored to `project_dir` when it is relative.
  pub fn manifest_path_in(&self, project_dir: &Path) -> PathBuf {
    if self.manifest_path.is_absolute() {
      self.manifest_path.clone()
    } else {
      project_dir.join(&self.manifest_path)
    }
  }

  /// Check the URL settings before they are used to compose asset URLs.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.base_url.trim().is_empty() {
      return Err(ConfigError::EmptyBaseUrl);
    }
    if !is_absolute_url(&self.dev_server_url) {
      return Err(ConfigError::InvalidDevServerUrl(self.dev_server_url.clone()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_follow_theme_layout() {
    let config = ResolverConfig::default();
    assert_eq!(config.manifest_path, PathBuf::from("dist/.vite/manifest.json"));
    assert_eq!(config.base_url, "/dist");
    assert_eq!(config.dev_server_url, "http://localhost:3000");
    assert!(!config.debug);
    assert_eq!(config.version, None);
    assert_eq!(config.validate(), Ok(()));
  }

  #[test]
  fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = ResolverConfig::discover(dir.path());
    assert_eq!(
      config.manifest_path,
      dir.path().join("dist/.vite/manifest.json")
    );
    assert_eq!(config.base_url, "/dist");
  }

  #[test]
  fn discover_reads_partial_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{
        "base_url": "https://example.com/wp-content/themes/kawaii/dist",
        "debug": true,
        "version": "1.2.0"
      }"#,
    )
    .unwrap();

    let config = ResolverConfig::discover(dir.path());
    assert_eq!(
      config.base_url,
      "https://example.com/wp-content/themes/kawaii/dist"
    );
    assert!(config.debug);
    assert_eq!(config.version.as_deref(), Some("1.2.0"));
    assert_eq!(config.dev_server_url, "http://localhost:3000");
  }

  #[test]
  fn discover_ignores_unparsable_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "debug = true").unwrap();

    let config = ResolverConfig::discover(dir.path());
    assert!(!config.debug);
  }

  #[test]
  fn validate_rejects_bad_urls() {
    let config = ResolverConfig {
      dev_server_url: "localhost:3000".into(),
      ..ResolverConfig::default()
    };
    assert_eq!(
      config.validate(),
      Err(ConfigError::InvalidDevServerUrl("localhost:3000".into()))
    );

    let config = ResolverConfig {
      base_url: "  ".into(),
      ..ResolverConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::EmptyBaseUrl));
  }
}
