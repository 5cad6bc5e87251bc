//! Root configuration for the two storage classes.

use crate::types::DEFAULT_PACKAGING_SUFFIX;
#[cfg(feature = "serde")]
use crate::FsError;

/// Where each storage class lives, and how packaged assets are named on disk.
///
/// Prefixes are prepended to logical paths verbatim. A prefix meant as a
/// directory must end with a separator (`"content/"`, not `"content"`).
///
/// # Example
///
/// ```rust
/// use assetfs::FileRoots;
///
/// let roots = FileRoots::new("Content/", "/home/player/.mygame/");
/// assert_eq!(roots.packaging_suffix, ".xnb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FileRoots {
    /// Prefix of the packaged asset tree.
    pub packaged_root: String,
    /// Prefix of the writable tree.
    pub mutable_root: String,
    /// Suffix packaged assets carry on disk, stripped from listed names.
    pub packaging_suffix: String,
}

impl FileRoots {
    /// Roots with the default packaging suffix.
    pub fn new(packaged_root: impl Into<String>, mutable_root: impl Into<String>) -> Self {
        Self {
            packaged_root: packaged_root.into(),
            mutable_root: mutable_root.into(),
            packaging_suffix: DEFAULT_PACKAGING_SUFFIX.to_string(),
        }
    }

    /// Replace the packaging suffix.
    #[must_use]
    pub fn with_packaging_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.packaging_suffix = suffix.into();
        self
    }

    /// Parse roots from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// - [`FsError::Deserialization`] if the JSON is malformed
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        serde_json::from_str(json).map_err(|e| FsError::Deserialization(e.to_string()))
    }

    /// Render roots as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// - [`FsError::Serialization`] if serialization fails
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, FsError> {
        serde_json::to_string_pretty(self).map_err(|e| FsError::Serialization(e.to_string()))
    }
}

impl Default for FileRoots {
    fn default() -> Self {
        Self::new("", "")
    }
}
