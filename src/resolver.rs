//! Per-entry asset resolution against the dev server or the build manifest.

use std::path::Path;

use serde::Serialize;

use crate::asset_paths::join_url;
use crate::config::ResolverConfig;
use crate::manifest::Manifest;
use crate::mode::DeliveryMode;

/// URLs to load for one logical entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
  /// Script (or compiled output) URL, absent when the entry was not built.
  pub script_url: Option<String>,
  /// Stylesheets the entry depends on, in manifest order.
  pub css_urls: Vec<String>,
}

/// Translates logical entry names into concrete asset URLs.
///
/// The manifest is read once when the resolver is created and never changes afterwards.
#[derive(Debug, Clone)]
pub struct AssetResolver {
  manifest: Option<Manifest>,
  base_url: String,
  dev_server_url: String,
  debug: bool,
}

impl AssetResolver {
  /// Create a resolver, loading the manifest at `manifest_path` if it exists and parses.
  pub fn new(
    manifest_path: impl AsRef<Path>,
    base_url: impl Into<String>,
    dev_server_url: impl Into<String>,
  ) -> Self {
    Self::with_manifest(
      Manifest::load_optional(manifest_path),
      base_url,
      dev_server_url,
    )
  }

  /// Create a resolver from an already loaded (or absent) manifest.
  pub fn with_manifest(
    manifest: Option<Manifest>,
    base_url: impl Into<String>,
    dev_server_url: impl Into<String>,
  ) -> Self {
    Self {
      manifest,
      base_url: base_url.into(),
      dev_server_url: dev_server_url.into(),
      debug: false,
    }
  }

  /// Create a resolver from configuration, including its debug flag.
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self::new(
      &config.manifest_path,
      config.base_url.clone(),
      config.dev_server_url.clone(),
    )
    .with_debug(config.debug)
  }

  /// Set the debug flag used by [`AssetResolver::mode`] and the resolution methods.
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  /// Whether `debug` together with the manifest state selects development mode.
  pub fn is_development_mode(&self, debug: bool) -> bool {
    DeliveryMode::select(debug, self.manifest.is_some()).is_development()
  }

  /// Delivery mode for the stored debug flag.
  pub fn mode(&self) -> DeliveryMode {
    DeliveryMode::select(self.debug, self.manifest.is_some())
  }

  /// Loaded manifest, if any.
  pub fn manifest(&self) -> Option<&Manifest> {
    self.manifest.as_ref()
  }

  /// URL of the script (or compiled output) for `entry`.
  pub fn resolve_script(&self, entry: &str) -> Option<String> {
    self.script_in(self.mode(), entry)
  }

  /// Stylesheet URLs `entry` depends on.
  pub fn resolve_styles(&self, entry: &str) -> Vec<String> {
    self.styles_in(self.mode(), entry)
  }

  /// Script and stylesheets for `entry`, resolved under a single mode decision.
  pub fn resolve(&self, entry: &str) -> ResolvedAsset {
    let mode = self.mode();
    ResolvedAsset {
      script_url: self.script_in(mode, entry),
      css_urls: self.styles_in(mode, entry),
    }
  }

  fn script_in(&self, mode: DeliveryMode, entry: &str) -> Option<String> {
    match mode {
      DeliveryMode::Development => Some(join_url(&self.dev_server_url, entry)),
      DeliveryMode::Production => {
        let file = self
          .manifest
          .as_ref()
          .and_then(|manifest| manifest.get(entry))
          .and_then(|chunk| chunk.file());
        if file.is_none() {
          tracing::debug!(entry, "asset entry not present in manifest");
        }
        file.map(|file| join_url(&self.base_url, file))
      }
    }
  }

  fn styles_in(&self, mode: DeliveryMode, entry: &str) -> Vec<String> {
    if mode.is_development() {
      return Vec::new();
    }

    self
      .manifest
      .as_ref()
      .and_then(|manifest| manifest.get(entry))
      .map(|chunk| {
        chunk
          .css()
          .iter()
          .map(|css| join_url(&self.base_url, css))
          .collect()
      })
      .unwrap_or_default()
  }
}
