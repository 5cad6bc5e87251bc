//! Read-only stream provider for packaged assets.

use std::io::{self, Read};
use std::sync::Arc;

use crate::FsError;

/// Supplies byte streams for packaged assets.
///
/// Packaged handles never touch their files directly: every read funnels
/// through [`open_stream`](Self::open_stream) with the handle's logical path.
/// Any packaging suffix has already been stripped from that path, and any
/// decoding of the packaged format is the source's business.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single source is shared by every
/// packaged handle through an `Arc`.
///
/// # Object Safety
///
/// This trait is object-safe and is stored as `Arc<dyn AssetSource>`.
///
/// # Example
///
/// ```rust
/// use assetfs::{AssetSource, FsError};
/// use std::io::{Cursor, Read};
///
/// struct Embedded;
///
/// impl AssetSource for Embedded {
///     fn open_stream(&self, path: &str) -> Result<Box<dyn Read + Send>, FsError> {
///         match path {
///             "strings/en" => Ok(Box::new(Cursor::new(b"hello".to_vec()))),
///             _ => Err(FsError::AssetNotFound { path: path.to_string() }),
///         }
///     }
/// }
///
/// assert!(Embedded.exists("strings/en"));
/// assert_eq!(Embedded.len("strings/en").unwrap(), 5);
/// ```
pub trait AssetSource: Send + Sync {
    /// Open a sequential stream over the asset at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::AssetNotFound`] if no asset is registered under `path`
    /// - [`FsError::Io`] if the underlying storage fails
    fn open_stream(&self, path: &str) -> Result<Box<dyn Read + Send>, FsError>;

    /// Check whether an asset exists.
    ///
    /// The default implementation opens and immediately drops a stream.
    fn exists(&self, path: &str) -> bool {
        self.open_stream(path).is_ok()
    }

    /// Size of the asset in bytes.
    ///
    /// The default implementation drains a fresh stream.
    ///
    /// # Errors
    ///
    /// Whatever [`open_stream`](Self::open_stream) or reading the stream reports.
    fn len(&self, path: &str) -> Result<u64, FsError> {
        let mut stream = self.open_stream(path)?;
        io::copy(&mut stream, &mut io::sink()).map_err(|e| FsError::io("len", path, e))
    }
}

impl<T: AssetSource + ?Sized> AssetSource for Arc<T> {
    fn open_stream(&self, path: &str) -> Result<Box<dyn Read + Send>, FsError> {
        (**self).open_stream(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn len(&self, path: &str) -> Result<u64, FsError> {
        (**self).len(path)
    }
}

/// Source that resolves nothing. Used when an application has no packaged assets.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoAssets;

impl AssetSource for NoAssets {
    fn open_stream(&self, path: &str) -> Result<Box<dyn Read + Send>, FsError> {
        Err(FsError::AssetNotFound {
            path: path.to_string(),
        })
    }
}
