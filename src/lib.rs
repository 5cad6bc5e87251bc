//! # assetfs
//!
//! Uniform **file handles** over two storage classes that have little in common:
//!
//! - **Mutable** storage: the real filesystem. Browsable, writable, with real sizes
//!   and timestamps.
//! - **Packaged** storage: read-only assets bundled with the application. Reached by
//!   name only, read through a stream supplied by an [`AssetSource`], and stored on
//!   disk with a packaging suffix (`.xnb` by default) that never shows up in paths.
//!
//! One [`FileHandle`] type covers both. Call sites navigate, read, list and copy
//! without branching on the backend; the handle dispatches per operation.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use assetfs::{FileRoots, Files, FsError};
//!
//! fn backup_save(files: &Files) -> Result<(), FsError> {
//!     let save = files.mutable("saves/slot1.dat");
//!     if save.exists() {
//!         save.copy_to(&files.mutable("backups/"))?;
//!     }
//!     for child in files.mutable("saves").list_with_suffix(".dat")? {
//!         println!("{} ({} bytes)", child.name(), child.length());
//!     }
//!     Ok(())
//! }
//!
//! let files = Files::mutable_only(FileRoots::new("Content/", "/tmp/assetfs-demo/"));
//! # let _ = backup_save(&files);
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FileHandle`] | One file or directory in one storage class |
//! | [`Files`] | Hands out handles per storage class |
//! | [`FileRoots`] | Root prefixes and packaging suffix |
//! | [`Root`] | Shared root descriptor behind every handle |
//! | [`StorageClass`] | `Packaged` or `Mutable` |
//! | [`AssetSource`] | Supplies streams for packaged assets |
//! | [`FsError`] | Error type with context |
//!
//! ---
//!
//! ## Behaviour by Storage Class
//!
//! | Operation | Mutable | Packaged |
//! |-----------|---------|----------|
//! | `read*` | opens the file | [`AssetSource::open_stream`] |
//! | `write*`, `mkdirs`, `delete*`, `move_to` | native calls | [`FsError::NotSupported`] |
//! | `list*` | files then directories | always empty |
//! | `copy_to` | source or destination | source only |
//! | `last_modified` | file timestamp | always 0 |
//!
//! Directory handles reject every read and write with [`FsError::IsADirectory`].
//!
//! ---
//!
//! ## Error Handling
//!
//! Contract violations are errors; recoverable outcomes are booleans:
//!
//! ```rust
//! use assetfs::{FsError, StorageClass};
//!
//! let err = FsError::NotSupported { operation: "delete", storage: StorageClass::Packaged };
//! assert_eq!(err.to_string(), "delete: not supported for packaged storage");
//! ```
//!
//! [`FileHandle::delete`] returns `Ok(false)` for a non-empty directory, and
//! [`FileHandle::delete_directory`] returns `Ok(false)` when the native delete
//! fails. Everything else from the operating system surfaces as [`FsError::Io`].
//!
//! ---
//!
//! ## Staleness
//!
//! A handle probes whether it is a directory once, when it is built. It does not
//! notice later changes on disk. Build a fresh handle when you need fresh state.
//! There is no locking: concurrent writers to the same path get whatever the
//! operating system gives them.
//!
//! ---
//!
//! ## Logging
//!
//! Mutating operations emit `tracing` events (`debug` for actions, `warn` for
//! swallowed failures, `trace` for stream opens). Install any subscriber to see them.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | [`FileRoots`] (de)serialization and the `FileHandleJson` helpers |

// Private modules
mod config;
mod error;
#[cfg(feature = "serde")]
mod ext;
mod files;
mod handle;
mod traits;
mod types;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{DEFAULT_PACKAGING_SUFFIX, Root, StorageClass, TextEncoding};

// Public re-exports - handles
pub use files::Files;
pub use handle::FileHandle;

// Public re-exports - collaborator traits
pub use traits::{AssetSource, NameFilter, PathFilter};

// Public re-exports - configuration
pub use config::FileRoots;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FileHandleJson;
