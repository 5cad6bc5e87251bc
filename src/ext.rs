//! # JSON Helpers
//!
//! Structured data on top of file handles, available with the `serde` feature.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read_json`](FileHandleJson::read_json) | Read and deserialize a JSON file |
//! | [`write_json`](FileHandleJson::write_json) | Serialize and write a JSON file |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! assetfs = { version = "0.1", features = ["serde"] }
//! ```
//!
//! Reads work on both storage classes, so settings shipped as packaged assets
//! and settings saved by the player load the same way. Writes follow
//! [`FileHandle::write_string`] and are rejected on packaged handles.

use serde::{Serialize, de::DeserializeOwned};

use crate::{FileHandle, FsError};

/// JSON serialization methods for [`FileHandle`].
///
/// # Example
///
/// ```rust
/// use assetfs::{FileHandle, FileHandleJson, FsError};
///
/// fn load_settings(handle: &FileHandle) -> Result<serde_json::Value, FsError> {
///     handle.read_json()
/// }
/// ```
pub trait FileHandleJson {
    /// Read the file as UTF-8 and deserialize it.
    ///
    /// # Errors
    ///
    /// - [`FsError::Deserialization`] if JSON parsing fails
    /// - Any error from [`FileHandle::read_string`]
    fn read_json<T: DeserializeOwned>(&self) -> Result<T, FsError>;

    /// Serialize `value` as pretty-printed JSON, replacing the file's content.
    ///
    /// # Errors
    ///
    /// - [`FsError::Serialization`] if serialization fails
    /// - Any error from [`FileHandle::write_string`]
    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), FsError>;
}

impl FileHandleJson for FileHandle {
    fn read_json<T: DeserializeOwned>(&self) -> Result<T, FsError> {
        let text = self.read_string()?;
        serde_json::from_str(&text).map_err(|e| FsError::Deserialization(e.to_string()))
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), FsError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| FsError::Serialization(e.to_string()))?;
        self.write_string(&json, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetSource, Root};
    use std::io::{Cursor, Read};
    use std::sync::Arc;

    struct Settings;

    impl AssetSource for Settings {
        fn open_stream(&self, path: &str) -> Result<Box<dyn Read + Send>, FsError> {
            match path {
                "settings" => Ok(Box::new(Cursor::new(br#"{"volume": 7}"#.to_vec()))),
                "broken" => Ok(Box::new(Cursor::new(b"{ volume".to_vec()))),
                _ => Err(FsError::AssetNotFound {
                    path: path.to_string(),
                }),
            }
        }
    }

    fn packaged(path: &str) -> FileHandle {
        FileHandle::new(
            Root::packaged("/nonexistent-assetfs-pkg/", ".xnb", Arc::new(Settings)),
            path,
        )
    }

    #[test]
    fn read_json_from_packaged_asset() {
        let value: serde_json::Value = packaged("settings").read_json().unwrap();
        assert_eq!(value["volume"], 7);
    }

    #[test]
    fn read_json_reports_parse_errors() {
        let result: Result<serde_json::Value, _> = packaged("broken").read_json();
        assert!(matches!(result, Err(FsError::Deserialization(_))));
    }

    #[test]
    fn write_json_to_packaged_is_not_supported() {
        let err = packaged("settings").write_json(&serde_json::json!({"volume": 1})).unwrap_err();
        assert!(err.is_not_supported());
    }
}
