//! Entry point that hands out root handles per storage class.

use std::sync::Arc;

use tracing::debug;

use crate::traits::NoAssets;
use crate::{AssetSource, FileHandle, FileRoots, Root, StorageClass};

/// Factory for file handles, one root per storage class.
///
/// Build one at startup and pass it (or clones of its handles) to the code
/// that needs files. Cloning a `Files` is cheap; roots are shared.
///
/// # Example
///
/// ```rust
/// use assetfs::{FileRoots, Files, StorageClass};
///
/// let files = Files::mutable_only(FileRoots::new("", "/tmp/"));
/// let save = files.mutable("save.dat");
/// assert_eq!(save.storage(), StorageClass::Mutable);
/// assert_eq!(save.path(), "save.dat");
/// assert!(files.packaged("hero").read_bytes().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Files {
    roots: FileRoots,
    packaged: Arc<Root>,
    mutable: Arc<Root>,
}

impl Files {
    /// Files backed by `roots`, with packaged reads served by `assets`.
    pub fn new(roots: FileRoots, assets: impl AssetSource + 'static) -> Self {
        debug!(
            packaged_root = %roots.packaged_root,
            mutable_root = %roots.mutable_root,
            packaging_suffix = %roots.packaging_suffix,
            "configuring file roots"
        );
        let packaged = Root::packaged(
            roots.packaged_root.clone(),
            roots.packaging_suffix.clone(),
            Arc::new(assets),
        );
        let mutable = Root::mutable(roots.mutable_root.clone());
        Self {
            roots,
            packaged,
            mutable,
        }
    }

    /// Files with no packaged assets: every packaged read reports
    /// [`FsError::AssetNotFound`](crate::FsError::AssetNotFound).
    pub fn mutable_only(roots: FileRoots) -> Self {
        Self::new(roots, NoAssets)
    }

    /// Handle for a packaged asset.
    pub fn packaged(&self, path: &str) -> FileHandle {
        FileHandle::new(Arc::clone(&self.packaged), path)
    }

    /// Handle for a writable file or directory.
    pub fn mutable(&self, path: &str) -> FileHandle {
        FileHandle::new(Arc::clone(&self.mutable), path)
    }

    /// Handle for `path` in the given storage class.
    pub fn handle(&self, storage: StorageClass, path: &str) -> FileHandle {
        match storage {
            StorageClass::Packaged => self.packaged(path),
            StorageClass::Mutable => self.mutable(path),
        }
    }

    /// Root handle of the packaged tree.
    pub fn packaged_root(&self) -> FileHandle {
        self.packaged("")
    }

    /// Root handle of the writable tree.
    pub fn mutable_root(&self) -> FileHandle {
        self.mutable("")
    }

    /// The configuration these files were built from.
    pub fn roots(&self) -> &FileRoots {
        &self.roots
    }
}
