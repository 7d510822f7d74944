//! Helpers for composing asset URLs.
//!
//! URL joining and URL classification live in separate submodules so the resolver, the
//! configuration validation and the enqueue planner all agree on one set of rules.

mod filters;
mod join;

pub use filters::is_absolute_url;
pub use join::join_url;
