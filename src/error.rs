//! Error types for the strict loading paths.
//!
//! Resolution itself never fails: these errors only reach callers that explicitly ask for
//! strict behaviour through [`crate::Manifest::load`] or [`crate::ResolverConfig::validate`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the build manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The manifest could not be read from disk (usually because the build has not run).
  #[error("manifest unavailable at {}", path.display())]
  Unavailable {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The manifest exists but is not valid manifest JSON.
  #[error("malformed manifest at {}", path.display())]
  Malformed {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl ManifestError {
  /// Path of the manifest that failed to load.
  pub fn path(&self) -> &std::path::Path {
    match self {
      Self::Unavailable { path, .. } | Self::Malformed { path, .. } => path,
    }
  }
}

/// Errors reported when validating a [`crate::ResolverConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  /// The dev server origin is not an absolute http(s) URL.
  #[error("dev server url must be an absolute http(s) url, got {0:?}")]
  InvalidDevServerUrl(String),
  /// No production base URL was configured.
  #[error("asset base url must not be empty")]
  EmptyBaseUrl,
}
