#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod enqueue;
pub mod error;
pub mod manifest;
pub mod mode;
pub mod resolver;

pub use config::ResolverConfig;
pub use enqueue::{AdminScreens, AssetKind, AssetSpec, EnqueueRegistry, EnqueueRequest, HookEvent};
pub use error::{ConfigError, ManifestError};
pub use manifest::{Manifest, ManifestChunk};
pub use mode::DeliveryMode;
pub use resolver::{AssetResolver, ResolvedAsset};
