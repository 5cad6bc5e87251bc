//! Error types for the assetfs file handle abstraction.

use std::path::PathBuf;

use crate::StorageClass;

/// File handle error type with contextual variants.
///
/// Two families matter to callers:
///
/// - Contract violations ([`NotSupported`](FsError::NotSupported),
///   [`IsADirectory`](FsError::IsADirectory)) are raised before any I/O is
///   attempted. Retrying them is pointless.
/// - Native failures ([`Io`](FsError::Io)) carry the operating system error
///   unmodified as their source, plus the operation and physical path.
///
/// Recoverable outcomes such as "directory not empty" on
/// [`FileHandle::delete`](crate::FileHandle::delete) are reported as
/// `Ok(false)`, never through this type.
///
/// # Examples
///
/// ```rust
/// use assetfs::{FsError, StorageClass};
///
/// let err = FsError::NotSupported { operation: "write", storage: StorageClass::Packaged };
/// assert_eq!(err.to_string(), "write: not supported for packaged storage");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Contract errors
    /// The operation cannot be performed against this storage class.
    #[error("{operation}: not supported for {storage} storage")]
    NotSupported {
        /// The rejected operation.
        operation: &'static str,
        /// The storage class of the handle that rejected it.
        storage: StorageClass,
    },

    /// A read or write was attempted on a directory handle.
    #[error("{operation}: cannot operate on a directory: {path}")]
    IsADirectory {
        /// The rejected operation.
        operation: &'static str,
        /// The logical path of the directory.
        path: String,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The physical path that is not a directory.
        path: PathBuf,
    },

    /// A buffer range lies outside the buffer.
    #[error("range {offset}..{offset}+{size} out of bounds for buffer of {len} bytes")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        size: usize,
        /// Length of the buffer.
        len: usize,
    },

    // Asset errors
    /// The asset source has no asset under this logical path.
    #[error("asset not found: {path}")]
    AssetNotFound {
        /// The logical asset path.
        path: String,
    },

    // Data errors
    /// The requested text encoding is not known.
    #[error("unsupported encoding: {label}")]
    UnsupportedEncoding {
        /// The encoding label as given by the caller.
        label: String,
    },

    /// Content could not be decoded.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The logical path of the offending file.
        path: String,
        /// Details about the invalid data.
        details: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    // Native errors
    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The physical path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap a native error with the operation and path it came from.
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        FsError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// The [`ErrorKind`](std::io::ErrorKind) of a native failure, if this is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            FsError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Returns `true` if the operation was rejected because of the storage class.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, FsError::NotSupported { .. })
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        FsError::Io {
            operation: "io",
            path: PathBuf::new(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_supported_display() {
        let err = FsError::NotSupported {
            operation: "mkdirs",
            storage: StorageClass::Packaged,
        };
        assert_eq!(err.to_string(), "mkdirs: not supported for packaged storage");
        assert!(err.is_not_supported());
    }

    #[test]
    fn is_a_directory_display() {
        let err = FsError::IsADirectory {
            operation: "read",
            path: "levels".into(),
        };
        assert_eq!(err.to_string(), "read: cannot operate on a directory: levels");
        assert!(!err.is_not_supported());
    }

    #[test]
    fn out_of_bounds_display() {
        let err = FsError::OutOfBounds {
            offset: 4,
            size: 8,
            len: 10,
        };
        assert!(err.to_string().contains("10 bytes"));
    }

    #[test]
    fn io_keeps_source_and_context() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FsError::io("open", "/data/save.bin", source);
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::PermissionDenied));
        assert!(err.to_string().starts_with("open failed for /data/save.bin"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn from_io_preserves_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let fs_err = FsError::from(io_err);
        assert_eq!(fs_err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn non_io_has_no_kind() {
        let err = FsError::AssetNotFound {
            path: "sprites/hero".into(),
        };
        assert_eq!(err.io_kind(), None);
    }
}
