//! Reading the manifest from disk, strictly or leniently.

use std::fs;
use std::path::Path;

use super::Manifest;
use crate::error::ManifestError;

impl Manifest {
  /// Parse a manifest from a JSON string.
  pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  /// Load a manifest from disk, reporting why it could not be loaded.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Unavailable {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_json_str(&content).map_err(|source| ManifestError::Malformed {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load a manifest from disk, degrading to `None` when it is missing or malformed.
  ///
  /// A missing manifest is the normal state before the first build, so it is only logged at
  /// debug level. A malformed manifest usually means a broken build and is logged as a warning.
  pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
    match Self::load(path) {
      Ok(manifest) => {
        tracing::debug!(entries = manifest.len(), "loaded asset manifest");
        Some(manifest)
      }
      Err(err @ ManifestError::Unavailable { .. }) => {
        tracing::debug!(path = %err.path().display(), "no asset manifest, assets unavailable");
        None
      }
      Err(ManifestError::Malformed { path, source }) => {
        tracing::warn!(
          path = %path.display(),
          error = %source,
          "ignoring malformed asset manifest"
        );
        None
      }
    }
  }
}
