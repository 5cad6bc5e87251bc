//! # Collaborator Traits
//!
//! The seams where callers plug behaviour into file handles.
//!
//! ## Quick Reference
//!
//! | Trait | Role | Used by |
//! |-------|------|---------|
//! | [`AssetSource`] | Opens read-only streams for packaged assets | every packaged read |
//! | [`NameFilter`] | Predicate over (directory, child name) | [`FileHandle::list_by_name`](crate::FileHandle::list_by_name) |
//! | [`PathFilter`] | Predicate over a child's physical path | [`FileHandle::list_by_path`](crate::FileHandle::list_by_path) |
//!
//! ## Thread Safety
//!
//! [`AssetSource`] requires `Send + Sync` because one source is shared by every
//! packaged handle. Filters are borrowed for the duration of a single listing and
//! carry no such bound; they may hold mutable state.

mod asset_source;
mod filters;

pub use asset_source::AssetSource;
pub(crate) use asset_source::NoAssets;
pub use filters::{NameFilter, PathFilter};
