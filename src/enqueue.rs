//! Explicit registry of host events and the asset bundles enqueued for them.
//!
//! The host owns the actual enqueue mechanism. This module only decides which handles and URLs
//! to hand over, in which order, for each event.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::resolver::AssetResolver;

/// Host events that trigger asset enqueueing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
  /// Public pages.
  FrontEnd,
  /// Admin screens.
  Admin,
  /// The block editor canvas.
  BlockEditor,
  /// Block assets shared by the editor and public pages.
  BlockAssets,
}

impl HookEvent {
  /// All events in registration order.
  pub const ALL: [HookEvent; 4] = [
    HookEvent::FrontEnd,
    HookEvent::Admin,
    HookEvent::BlockEditor,
    HookEvent::BlockAssets,
  ];

  /// Stable kebab-case name.
  pub fn as_str(self) -> &'static str {
    match self {
      HookEvent::FrontEnd => "front-end",
      HookEvent::Admin => "admin",
      HookEvent::BlockEditor => "block-editor",
      HookEvent::BlockAssets => "block-assets",
    }
  }
}

impl fmt::Display for HookEvent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for HookEvent {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    HookEvent::ALL
      .into_iter()
      .find(|event| event.as_str() == value)
      .ok_or_else(|| format!("unknown hook event {value:?}"))
  }
}

/// Kind of asset handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// JavaScript.
  Script,
  /// Stylesheet.
  Style,
}

/// Declaration of one asset to enqueue for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
  /// Host handle name.
  pub handle: String,
  /// Logical manifest entry.
  pub entry: String,
  /// Whether the entry is a script or a stylesheet source.
  pub kind: AssetKind,
  /// Host handles this asset depends on.
  pub deps: Vec<String>,
  /// Load scripts at the end of the document body.
  pub in_footer: bool,
}

impl AssetSpec {
  /// Script entry, loaded in the footer with no dependencies.
  pub fn script(handle: impl Into<String>, entry: impl Into<String>) -> Self {
    Self {
      handle: handle.into(),
      entry: entry.into(),
      kind: AssetKind::Script,
      deps: Vec::new(),
      in_footer: true,
    }
  }

  /// Stylesheet entry with no dependencies.
  pub fn style(handle: impl Into<String>, entry: impl Into<String>) -> Self {
    Self {
      handle: handle.into(),
      entry: entry.into(),
      kind: AssetKind::Style,
      deps: Vec::new(),
      in_footer: false,
    }
  }

  /// Add host dependencies.
  pub fn with_deps<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.deps.extend(deps.into_iter().map(Into::into));
    self
  }
}

/// Concrete enqueue instruction for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnqueueRequest {
  /// Host handle name.
  pub handle: String,
  /// URL to load.
  pub url: String,
  /// Script or stylesheet.
  pub kind: AssetKind,
  /// Host handles this asset depends on.
  pub deps: Vec<String>,
  /// Load at the end of the document body.
  pub in_footer: bool,
  /// Cache-busting version passed to the host, if configured.
  pub version: Option<String>,
}

/// Admin screens on which theme admin assets are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminScreens {
  allowed: BTreeSet<String>,
}

impl Default for AdminScreens {
  fn default() -> Self {
    Self::new([
      "customize.php",
      "appearance_page_theme-options",
      "themes.php",
      "widgets.php",
    ])
  }
}

impl AdminScreens {
  /// Allow exactly the given screen hooks.
  pub fn new<I, S>(screens: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      allowed: screens.into_iter().map(Into::into).collect(),
    }
  }

  /// Whether admin assets belong on `screen`.
  pub fn allows(&self, screen: &str) -> bool {
    self.allowed.contains(screen)
  }
}

/// Event to asset bundle registry owned by the composition root.
#[derive(Debug, Clone, Default)]
pub struct EnqueueRegistry {
  specs: BTreeMap<HookEvent, Vec<AssetSpec>>,
  admin_screens: AdminScreens,
  version: Option<String>,
}

impl EnqueueRegistry {
  /// Empty registry with the default admin screen allowlist.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registry pre-filled with the theme's asset bundles.
  pub fn kawaii_defaults() -> Self {
    let editor_deps = ["wp-blocks", "wp-components", "wp-element", "wp-editor"];
    let mut registry = Self::new();
    registry
      .register(
        HookEvent::FrontEnd,
        AssetSpec::style("kawaii-ultra-style", "src/css/style.scss"),
      )
      .register(
        HookEvent::FrontEnd,
        AssetSpec::script("kawaii-ultra-navigation", "src/js/navigation.js"),
      )
      .register(
        HookEvent::FrontEnd,
        AssetSpec::script(
          "kawaii-ultra-skip-link-focus-fix",
          "src/js/skip-link-focus-fix.js",
        ),
      )
      .register(
        HookEvent::Admin,
        AssetSpec::style("kawaii-ultra-admin", "src/css/admin.scss"),
      )
      .register(
        HookEvent::Admin,
        AssetSpec::script("kawaii-ultra-admin", "src/js/admin.js").with_deps(["jquery"]),
      )
      .register(
        HookEvent::BlockEditor,
        AssetSpec::script("kawaii-ultra-blocks", "src/js/blocks.js").with_deps(editor_deps),
      )
      .register(
        HookEvent::BlockEditor,
        AssetSpec::style("kawaii-ultra-blocks-editor", "src/css/blocks-editor.scss"),
      )
      .register(
        HookEvent::BlockAssets,
        AssetSpec::style("kawaii-ultra-blocks", "src/css/blocks.scss"),
      )
      .register(
        HookEvent::BlockAssets,
        AssetSpec::script("kawaii-ultra-blocks-frontend", "src/js/blocks-frontend.js")
          .with_deps(["jquery"]),
      );
    registry
  }

  /// Replace the admin screen allowlist.
  pub fn with_admin_screens(mut self, screens: AdminScreens) -> Self {
    self.admin_screens = screens;
    self
  }

  /// Attach a version to every planned request.
  pub fn with_version(mut self, version: Option<String>) -> Self {
    self.version = version;
    self
  }

  /// Append an asset to the bundle for `event`.
  pub fn register(&mut self, event: HookEvent, spec: AssetSpec) -> &mut Self {
    self.specs.entry(event).or_default().push(spec);
    self
  }

  /// Assets registered for `event`, in registration order.
  pub fn specs(&self, event: HookEvent) -> &[AssetSpec] {
    self.specs.get(&event).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Resolve every asset registered for `event` into enqueue requests.
  ///
  /// Entries the resolver cannot find are skipped. A script's extracted stylesheets follow it
  /// as `<handle>-css-<n>` in manifest order.
  pub fn plan(&self, event: HookEvent, resolver: &AssetResolver) -> Vec<EnqueueRequest> {
    let mut requests = Vec::new();

    for spec in self.specs(event) {
      match spec.kind {
        AssetKind::Script => {
          let resolved = resolver.resolve(&spec.entry);
          if let Some(url) = resolved.script_url {
            requests.push(EnqueueRequest {
              handle: spec.handle.clone(),
              url,
              kind: AssetKind::Script,
              deps: spec.deps.clone(),
              in_footer: spec.in_footer,
              version: self.version.clone(),
            });
          }
          for (index, url) in resolved.css_urls.into_iter().enumerate() {
            requests.push(EnqueueRequest {
              handle: format!("{}-css-{index}", spec.handle),
              url,
              kind: AssetKind::Style,
              deps: Vec::new(),
              in_footer: false,
              version: self.version.clone(),
            });
          }
        }
        AssetKind::Style => {
          if let Some(url) = resolver.resolve_script(&spec.entry) {
            requests.push(EnqueueRequest {
              handle: spec.handle.clone(),
              url,
              kind: AssetKind::Style,
              deps: spec.deps.clone(),
              in_footer: false,
              version: self.version.clone(),
            });
          }
        }
      }
    }

    tracing::debug!(%event, count = requests.len(), "planned asset enqueue");
    requests
  }

  /// Plan admin assets for `screen`, empty unless the screen is allowlisted.
  pub fn plan_admin(&self, screen: &str, resolver: &AssetResolver) -> Vec<EnqueueRequest> {
    if !self.admin_screens.allows(screen) {
      return Vec::new();
    }
    self.plan(HookEvent::Admin, resolver)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::Manifest;

  fn production() -> AssetResolver {
    let manifest = Manifest::from_json_str(
      r#"{
        "src/js/blocks.js": {
          "file": "js/blocks.1.js",
          "css": ["css/blocks-a.2.css", "css/blocks-b.3.css"]
        },
        "src/css/blocks-editor.scss": { "file": "css/blocks-editor.4.css" },
        "src/js/admin.js": { "file": "js/admin.5.js" }
      }"#,
    )
    .unwrap();
    AssetResolver::with_manifest(Some(manifest), "/dist", "http://localhost:3000")
  }

  fn handles(requests: &[EnqueueRequest]) -> Vec<&str> {
    requests.iter().map(|request| request.handle.as_str()).collect()
  }

  #[test]
  fn parses_event_names() {
    for event in HookEvent::ALL {
      assert_eq!(event.as_str().parse::<HookEvent>(), Ok(event));
    }
    assert!("wp_head".parse::<HookEvent>().is_err());
  }

  #[test]
  fn block_editor_plan_fans_out_css_in_order() {
    let registry = EnqueueRegistry::kawaii_defaults();
    let plan = registry.plan(HookEvent::BlockEditor, &production());

    assert_eq!(
      handles(&plan),
      [
        "kawaii-ultra-blocks",
        "kawaii-ultra-blocks-css-0",
        "kawaii-ultra-blocks-css-1",
        "kawaii-ultra-blocks-editor",
      ]
    );
    assert_eq!(plan[0].url, "/dist/js/blocks.1.js");
    assert_eq!(plan[0].deps, ["wp-blocks", "wp-components", "wp-element", "wp-editor"]);
    assert!(plan[0].in_footer);
    assert_eq!(plan[1].url, "/dist/css/blocks-a.2.css");
    assert_eq!(plan[2].url, "/dist/css/blocks-b.3.css");
    assert_eq!(plan[3].kind, AssetKind::Style);
    assert_eq!(plan[3].url, "/dist/css/blocks-editor.4.css");
  }

  #[test]
  fn plan_skips_entries_missing_from_manifest() {
    let registry = EnqueueRegistry::kawaii_defaults();
    assert!(registry.plan(HookEvent::FrontEnd, &production()).is_empty());
  }

  #[test]
  fn development_plan_points_at_dev_server() {
    let resolver =
      AssetResolver::with_manifest(None, "/dist", "http://localhost:3000").with_debug(true);
    let plan = EnqueueRegistry::kawaii_defaults().plan(HookEvent::BlockAssets, &resolver);

    let urls: Vec<&str> = plan.iter().map(|request| request.url.as_str()).collect();
    assert_eq!(
      urls,
      [
        "http://localhost:3000/src/css/blocks.scss",
        "http://localhost:3000/src/js/blocks-frontend.js",
      ]
    );
  }

  #[test]
  fn admin_plan_respects_screen_allowlist() {
    let registry = EnqueueRegistry::kawaii_defaults();
    let resolver = production();

    assert!(registry.plan_admin("edit.php", &resolver).is_empty());
    assert_eq!(
      handles(&registry.plan_admin("customize.php", &resolver)),
      ["kawaii-ultra-admin"]
    );

    let registry = registry.with_admin_screens(AdminScreens::new(["edit.php"]));
    assert!(registry.plan_admin("customize.php", &resolver).is_empty());
    assert_eq!(registry.plan_admin("edit.php", &resolver).len(), 1);
  }

  #[test]
  fn admin_style_and_script_share_the_theme_handle() {
    let specs = EnqueueRegistry::kawaii_defaults();
    let admin = specs.specs(HookEvent::Admin);
    assert_eq!(admin.len(), 2);
    assert!(admin.iter().all(|spec| spec.handle == "kawaii-ultra-admin"));
    assert_eq!(admin[0].kind, AssetKind::Style);
    assert_eq!(admin[1].kind, AssetKind::Script);
  }

  #[test]
  fn front_end_bundle_matches_theme_handles() {
    let registry = EnqueueRegistry::kawaii_defaults();
    let handles: Vec<&str> = registry
      .specs(HookEvent::FrontEnd)
      .iter()
      .map(|spec| spec.handle.as_str())
      .collect();
    assert_eq!(
      handles,
      [
        "kawaii-ultra-style",
        "kawaii-ultra-navigation",
        "kawaii-ultra-skip-link-focus-fix",
      ]
    );
  }

  #[test]
  fn version_is_attached_to_every_request() {
    let registry = EnqueueRegistry::kawaii_defaults().with_version(Some("1.0.0".into()));
    let plan = registry.plan(HookEvent::BlockEditor, &production());
    assert_eq!(plan.len(), 4);
    assert!(plan.iter().all(|request| request.version.as_deref() == Some("1.0.0")));

    let plan = EnqueueRegistry::kawaii_defaults().plan(HookEvent::BlockEditor, &production());
    assert!(plan.iter().all(|request| request.version.is_none()));
  }

  #[test]
  fn register_appends_in_order() {
    let mut registry = EnqueueRegistry::new();
    registry
      .register(HookEvent::FrontEnd, AssetSpec::script("a", "src/a.js"))
      .register(HookEvent::FrontEnd, AssetSpec::style("b", "src/b.scss"));

    let specs = registry.specs(HookEvent::FrontEnd);
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].handle, "a");
    assert_eq!(specs[1].kind, AssetKind::Style);
    assert!(registry.specs(HookEvent::Admin).is_empty());
  }
}
