//! Typed model of the build tool's `manifest.json`.
//!
//! The manifest maps logical entry paths (`src/js/main.js`) to the hashed output the build
//! produced for them. Only `file` and `css` drive resolution; the remaining fields are kept so
//! callers can inspect the build graph.

mod loading;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Output record for a single manifest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestChunk {
  /// Output file relative to the asset base URL.
  #[serde(default)]
  pub file: Option<String>,
  /// Stylesheets extracted from the entry, in load order.
  #[serde(default, deserialize_with = "null_as_empty")]
  pub css: Vec<String>,
  /// Source path the chunk was built from.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub src: Option<String>,
  /// Entry name assigned by the build tool.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Whether the chunk is a build entry point.
  #[serde(default)]
  pub is_entry: bool,
  /// Manifest keys of statically imported chunks.
  #[serde(
    default,
    deserialize_with = "null_as_empty",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub imports: Vec<String>,
  /// Manifest keys of dynamically imported chunks.
  #[serde(
    default,
    deserialize_with = "null_as_empty",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub dynamic_imports: Vec<String>,
  /// Static assets (fonts, images) emitted for the chunk.
  #[serde(
    default,
    deserialize_with = "null_as_empty",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub assets: Vec<String>,
}

impl ManifestChunk {
  /// Output file, when the build recorded one.
  pub fn file(&self) -> Option<&str> {
    self.file.as_deref().filter(|file| !file.is_empty())
  }

  /// Declared stylesheets in manifest order.
  pub fn css(&self) -> &[String] {
    &self.css
  }

  /// Whether the build tool marked this chunk as an entry point.
  pub fn is_entry(&self) -> bool {
    self.is_entry
  }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Immutable build manifest keyed by logical entry path.
///
/// Entries are decoded one by one: an entry that is not a chunk record is skipped with a
/// warning and the rest of the manifest stays usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
  entries: BTreeMap<String, ManifestChunk>,
}

impl<'de> Deserialize<'de> for Manifest {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let entries = raw
      .into_iter()
      .filter_map(|(key, value)| match serde_json::from_value::<ManifestChunk>(value) {
        Ok(chunk) => Some((key, chunk)),
        Err(err) => {
          tracing::warn!(entry = %key, error = %err, "skipping unreadable manifest entry");
          None
        }
      })
      .collect();
    Ok(Self { entries })
  }
}

impl Manifest {
  /// Look up the record for an entry.
  pub fn get(&self, entry: &str) -> Option<&ManifestChunk> {
    self.entries.get(entry)
  }

  /// Iterate over all entries sorted by key.
  pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestChunk)> {
    self
      .entries
      .iter()
      .map(|(key, chunk)| (key.as_str(), chunk))
  }

  /// Number of entries in the manifest.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true when the manifest lists no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
