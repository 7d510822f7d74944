//! Delivery mode selection.

use std::fmt;

use serde::Serialize;

/// Where assets are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
  /// Unbundled sources served by a live dev server.
  Development,
  /// Hashed build output resolved through the manifest.
  Production,
}

impl DeliveryMode {
  /// Development only when debugging and no build output exists.
  pub fn select(debug: bool, manifest_present: bool) -> Self {
    if debug && !manifest_present {
      Self::Development
    } else {
      Self::Production
    }
  }

  /// Returns `true` for [`DeliveryMode::Development`].
  pub fn is_development(self) -> bool {
    matches!(self, Self::Development)
  }
}

impl fmt::Display for DeliveryMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Development => f.write_str("development"),
      Self::Production => f.write_str("production"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::DeliveryMode;

  #[test]
  fn selection_table() {
    assert_eq!(DeliveryMode::select(true, false), DeliveryMode::Development);
    assert_eq!(DeliveryMode::select(true, true), DeliveryMode::Production);
    assert_eq!(DeliveryMode::select(false, false), DeliveryMode::Production);
    assert_eq!(DeliveryMode::select(false, true), DeliveryMode::Production);
  }

  #[test]
  fn displays_lowercase_names() {
    assert_eq!(DeliveryMode::Development.to_string(), "development");
    assert_eq!(DeliveryMode::Production.to_string(), "production");
  }
}
