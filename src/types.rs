//! Core types for the assetfs file handle abstraction.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{AssetSource, FsError};

/// Packaging suffix appended to packaged assets on disk unless configured otherwise.
pub const DEFAULT_PACKAGING_SUFFIX: &str = ".xnb";

/// Storage class of a handle: which backend serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StorageClass {
    /// Read-only assets bundled with the application, served by an [`AssetSource`].
    Packaged,
    /// Read-write files on the real filesystem.
    Mutable,
}

impl StorageClass {
    /// Returns `true` if handles of this class reject every mutation.
    #[inline]
    pub const fn is_read_only(self) -> bool {
        matches!(self, StorageClass::Packaged)
    }

    /// Lowercase name of the storage class.
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageClass::Packaged => "packaged",
            StorageClass::Mutable => "mutable",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of one storage class, shared by every handle derived from it.
///
/// A root fixes the storage class, the physical prefix prepended to every
/// logical path, and for packaged storage the asset source and the on-disk
/// packaging suffix. Resolution is plain string concatenation: a prefix that
/// should act as a directory must end with a separator.
pub struct Root {
    storage: StorageClass,
    prefix: String,
    packaging_suffix: String,
    assets: Option<Arc<dyn AssetSource>>,
}

impl Root {
    /// Root for read-write files under `prefix`.
    pub fn mutable(prefix: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            storage: StorageClass::Mutable,
            prefix: prefix.into(),
            packaging_suffix: String::new(),
            assets: None,
        })
    }

    /// Root for packaged assets stored under `prefix` and opened through `assets`.
    pub fn packaged(
        prefix: impl Into<String>,
        packaging_suffix: impl Into<String>,
        assets: Arc<dyn AssetSource>,
    ) -> Arc<Self> {
        Arc::new(Self {
            storage: StorageClass::Packaged,
            prefix: prefix.into(),
            packaging_suffix: packaging_suffix.into(),
            assets: Some(assets),
        })
    }

    /// Storage class served by this root.
    #[inline]
    pub fn storage(&self) -> StorageClass {
        self.storage
    }

    /// Physical prefix prepended to logical paths.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// On-disk suffix stripped from packaged names. Empty for mutable roots.
    #[inline]
    pub fn packaging_suffix(&self) -> &str {
        &self.packaging_suffix
    }

    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, path))
    }

    /// Drops the packaging suffix from a packaged name; other names pass through.
    pub(crate) fn strip_packaging_suffix<'a>(&self, name: &'a str) -> &'a str {
        if self.storage != StorageClass::Packaged || self.packaging_suffix.is_empty() {
            return name;
        }
        name.strip_suffix(self.packaging_suffix.as_str()).unwrap_or(name)
    }

    pub(crate) fn assets(&self, operation: &'static str) -> Result<&dyn AssetSource, FsError> {
        self.assets.as_deref().ok_or(FsError::NotSupported {
            operation,
            storage: self.storage,
        })
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("storage", &self.storage)
            .field("prefix", &self.prefix)
            .field("packaging_suffix", &self.packaging_suffix)
            .field("assets", &self.assets.is_some())
            .finish()
    }
}

/// Character encoding for string reads and writes.
///
/// Labels follow the common WHATWG/IANA spellings and are matched
/// case-insensitively by [`TextEncoding::for_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8. A leading byte order mark is skipped when decoding.
    #[default]
    Utf8,
    /// UTF-16, big endian unless a little endian byte order mark is present.
    /// Encoding writes a big endian byte order mark.
    Utf16,
    /// UTF-16 little endian.
    Utf16Le,
    /// UTF-16 big endian.
    Utf16Be,
    /// ISO-8859-1.
    Latin1,
}

impl TextEncoding {
    /// Look up an encoding by label.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnsupportedEncoding`] if the label is not recognised
    pub fn for_label(label: &str) -> Result<Self, FsError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-16" | "utf16" => Ok(TextEncoding::Utf16),
            "utf-16le" | "utf16le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" => Ok(TextEncoding::Latin1),
            _ => Err(FsError::UnsupportedEncoding {
                label: label.to_string(),
            }),
        }
    }

    pub(crate) fn decode(self, bytes: &[u8], path: &str) -> Result<String, FsError> {
        let invalid = |details: String| FsError::InvalidData {
            path: path.to_string(),
            details,
        };
        match self {
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| invalid(e.to_string()))
            }
            TextEncoding::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            }
            .map_err(invalid),
            TextEncoding::Utf16Le => {
                let bytes = bytes.strip_prefix(&[0xFF, 0xFE]).unwrap_or(bytes);
                decode_utf16(bytes, u16::from_le_bytes).map_err(invalid)
            }
            TextEncoding::Utf16Be => {
                let bytes = bytes.strip_prefix(&[0xFE, 0xFF]).unwrap_or(bytes);
                decode_utf16(bytes, u16::from_be_bytes).map_err(invalid)
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    pub(crate) fn encode(self, text: &str, path: &str) -> Result<Vec<u8>, FsError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16 => {
                let mut out = vec![0xFE, 0xFF];
                out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                Ok(out)
            }
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| FsError::InvalidData {
                        path: path.to_string(),
                        details: format!("character {c:?} is not representable in ISO-8859-1"),
                    })
                })
                .collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!("odd byte count {} for UTF-16", bytes.len()));
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| e.to_string())
}
