//! # File Handles
//!
//! [`FileHandle`] addresses one file or directory within one storage class.
//!
//! ## Operation Groups
//!
//! | Group | Methods | Module |
//! |-------|---------|--------|
//! | Navigation | `child`, `parent`, `sibling` | here |
//! | Accessors | `path`, `name`, `extension`, `exists`, `length`, `last_modified` | here |
//! | Reading | `read`, `read_string`, `read_bytes`, `read_bytes_into`, `read_all_lines` | `read` |
//! | Writing | `write`, `write_string`, `write_bytes`, `write_bytes_range`, `write_from` | `write` |
//! | Listing | `list`, `list_with_suffix`, `list_by_name`, `list_by_path` | `dir` |
//! | Tree mutation | `mkdirs`, `delete`, `delete_directory`, `empty_directory`, `copy_to`, `move_to` | `tree` |
//!
//! ## Classification Snapshot
//!
//! Whether a handle is a directory is probed exactly once, when the handle is
//! built. Later changes on disk are not observed: a handle created before its
//! directory existed keeps answering `is_directory() == false` until it is
//! replaced by a fresh handle, or until [`FileHandle::mkdirs`] is called on it.

mod dir;
mod read;
mod tree;
mod write;

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::{FsError, Root, StorageClass};

/// Separators accepted inside logical paths.
pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// A lightweight descriptor of one location in one storage class.
///
/// Handles are cheap to clone and never own the file they point at: dropping a
/// handle leaves the file alone, and removing the file is an explicit call to
/// [`delete`](Self::delete) or [`delete_directory`](Self::delete_directory).
///
/// Two handles are equal when their storage class and logical path are equal.
/// The root prefix takes no part in equality.
///
/// # Example
///
/// ```rust
/// use assetfs::{FileHandle, Root};
///
/// let root = FileHandle::new(Root::mutable("/var/game/"), "");
/// let save = root.child("saves").child("slot1.dat");
/// assert_eq!(save.path(), "saves/slot1.dat");
/// assert_eq!(save.name(), "slot1.dat");
/// assert_eq!(save.extension(), "dat");
/// assert_eq!(save.parent().path(), "saves");
/// ```
#[derive(Clone)]
pub struct FileHandle {
    root: Arc<Root>,
    path: String,
    absolute: PathBuf,
    is_dir: bool,
    metadata: Option<fs::Metadata>,
}

impl FileHandle {
    /// Build a handle for `path` under `root`, probing whether it is a directory.
    ///
    /// A path that does not exist yet is a valid handle; it classifies as a file.
    pub fn new(root: Arc<Root>, path: impl Into<String>) -> Self {
        let path = path.into();
        let absolute = root.resolve(&path);
        let metadata = match root.storage() {
            StorageClass::Mutable => fs::metadata(&absolute).ok(),
            StorageClass::Packaged => None,
        };
        let is_dir = match &metadata {
            Some(meta) => meta.is_dir(),
            None => root.storage() == StorageClass::Packaged && absolute.is_dir(),
        };
        Self {
            root,
            path,
            absolute,
            is_dir,
            metadata,
        }
    }

    /// Storage class of this handle.
    #[inline]
    pub fn storage(&self) -> StorageClass {
        self.root.storage()
    }

    /// The root this handle and all its descendants resolve against.
    #[inline]
    pub fn root(&self) -> &Arc<Root> {
        &self.root
    }

    /// Logical path, without the root prefix.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Physical path: root prefix followed by the logical path.
    #[inline]
    pub fn absolute_path(&self) -> &Path {
        &self.absolute
    }

    /// Same as [`path`](Self::path). `.`, `..` and separators are left as given.
    #[inline]
    pub fn normalize(&self) -> &str {
        self.path()
    }

    /// Final path segment. For the root handle, the last segment of the prefix.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches(is_separator);
        if trimmed.is_empty() {
            return self
                .absolute
                .file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("");
        }
        trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
    }

    /// Text after the last `.` of the name. Empty for directories and dotless names.
    pub fn extension(&self) -> &str {
        if self.is_dir {
            return "";
        }
        let name = self.name();
        name.rfind('.').map_or("", |dot| &name[dot + 1..])
    }

    /// Name with its extension removed. Directories keep their name verbatim.
    pub fn name_without_extension(&self) -> &str {
        let name = self.name();
        match self.extension() {
            "" if !name.ends_with('.') || self.is_dir => name,
            ext => &name[..name.len() - ext.len() - 1],
        }
    }

    /// Logical path with the extension removed.
    ///
    /// Whenever [`extension`](Self::extension) is non-empty,
    /// `path_without_extension() + "." + extension() == path()`.
    pub fn path_without_extension(&self) -> &str {
        let ext = self.extension();
        if ext.is_empty() {
            return &self.path;
        }
        let trimmed = self.path.trim_end_matches(is_separator);
        &trimmed[..trimmed.len() - ext.len() - 1]
    }

    /// Whether the path was a directory when this handle was built (or after `mkdirs`).
    #[inline]
    pub fn is_directory(&self) -> bool {
        self.is_dir
    }

    /// Metadata captured when this handle was built. Always `None` for packaged handles.
    #[inline]
    pub fn cached_metadata(&self) -> Option<&fs::Metadata> {
        self.metadata.as_ref()
    }

    /// Whether the location exists as the kind this handle was classified as.
    ///
    /// A file handle whose path has since become a directory reports `false`.
    /// Packaged files are looked up through the asset source.
    pub fn exists(&self) -> bool {
        if self.is_dir {
            return self.absolute.is_dir();
        }
        match self.storage() {
            StorageClass::Mutable => self.absolute.is_file(),
            StorageClass::Packaged => self
                .root
                .assets("exists")
                .is_ok_and(|assets| assets.exists(&self.path)),
        }
    }

    /// Handle for `name` inside this one.
    pub fn child(&self, name: &str) -> FileHandle {
        let path = if self.path.is_empty() {
            name.to_string()
        } else if self.path.ends_with(is_separator) {
            format!("{}{name}", self.path)
        } else {
            format!("{}/{name}", self.path)
        };
        FileHandle::new(Arc::clone(&self.root), path)
    }

    /// Handle for the containing directory. The parent of a top-level path is the root.
    pub fn parent(&self) -> FileHandle {
        let trimmed = self.path.trim_end_matches(is_separator);
        let parent = match trimmed.rfind(is_separator) {
            Some(0) => &trimmed[..1],
            Some(idx) => &trimmed[..idx],
            None => "",
        };
        FileHandle::new(Arc::clone(&self.root), parent)
    }

    /// Handle for `name` next to this one.
    pub fn sibling(&self, name: &str) -> FileHandle {
        self.parent().child(name)
    }

    /// Size in bytes. Zero for directories, missing files, and unreadable metadata.
    pub fn length(&self) -> u64 {
        if self.is_dir {
            return 0;
        }
        match self.storage() {
            StorageClass::Mutable => fs::metadata(&self.absolute)
                .ok()
                .filter(fs::Metadata::is_file)
                .map_or(0, |meta| meta.len()),
            StorageClass::Packaged => match self
                .root
                .assets("length")
                .and_then(|a| a.len(&self.path))
            {
                Ok(len) => len,
                Err(err) => {
                    debug!(path = %self.path, error = %err, "packaged asset length unavailable");
                    0
                }
            },
        }
    }

    /// Last modification time in milliseconds since the Unix epoch.
    ///
    /// Zero for packaged handles and for handles that do not exist.
    pub fn last_modified(&self) -> u64 {
        if self.storage() == StorageClass::Packaged || !self.exists() {
            return 0;
        }
        fs::metadata(&self.absolute)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    /// Fails with [`FsError::NotSupported`] on read-only storage.
    pub(crate) fn ensure_writable(&self, operation: &'static str) -> Result<(), FsError> {
        if self.storage().is_read_only() {
            return Err(FsError::NotSupported {
                operation,
                storage: self.storage(),
            });
        }
        Ok(())
    }

    /// Fails with [`FsError::IsADirectory`] on directory handles.
    pub(crate) fn ensure_file(&self, operation: &'static str) -> Result<(), FsError> {
        if self.is_dir {
            return Err(FsError::IsADirectory {
                operation,
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn io_error(&self, operation: &'static str, source: std::io::Error) -> FsError {
        FsError::io(operation, self.absolute.clone(), source)
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.storage() == other.storage() && self.path == other.path
    }
}

impl Eq for FileHandle {}

impl Hash for FileHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage().hash(state);
        self.path.hash(state);
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("storage", &self.storage())
            .field("path", &self.path)
            .field("absolute", &self.absolute)
            .field("is_dir", &self.is_dir)
            .finish()
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
