//! Read operations.
//!
//! Every read funnels through one dispatch: packaged handles ask the asset
//! source for a stream keyed by the logical path, mutable handles open the
//! physical file. Directory handles reject every read.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};

use tracing::trace;

use super::FileHandle;
use crate::{FsError, StorageClass, TextEncoding};

impl FileHandle {
    /// Open a sequential stream over the file's bytes.
    ///
    /// The caller owns the stream; dropping it releases the descriptor.
    ///
    /// # Errors
    ///
    /// - [`FsError::IsADirectory`] if this is a directory handle
    /// - [`FsError::AssetNotFound`] if a packaged asset does not exist
    /// - [`FsError::Io`] if the file cannot be opened
    pub fn read(&self) -> Result<Box<dyn Read + Send>, FsError> {
        self.ensure_file("read")?;
        self.open_read("read")
    }

    /// Like [`read`](Self::read), wrapped in a [`BufReader`] of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_buffered(
        &self,
        capacity: usize,
    ) -> Result<BufReader<Box<dyn Read + Send>>, FsError> {
        Ok(BufReader::with_capacity(capacity, self.read()?))
    }

    /// Read the whole file into memory.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read), plus [`FsError::Io`] if reading fails midway.
    pub fn read_bytes(&self) -> Result<Vec<u8>, FsError> {
        self.ensure_file("read_bytes")?;
        let mut stream = self.open_read("read_bytes")?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| self.io_error("read_bytes", e))?;
        Ok(bytes)
    }

    /// Read up to `size` bytes into `buf[offset..offset + size]`.
    ///
    /// Stops early at end of data; the returned count may be smaller than
    /// `size` and a short read is not an error.
    ///
    /// # Errors
    ///
    /// - [`FsError::OutOfBounds`] if the range does not fit in `buf`
    /// - Same as [`read`](Self::read) otherwise
    pub fn read_bytes_into(
        &self,
        buf: &mut [u8],
        offset: usize,
        size: usize,
    ) -> Result<usize, FsError> {
        self.ensure_file("read_bytes_into")?;
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= buf.len())
            .ok_or(FsError::OutOfBounds {
                offset,
                size,
                len: buf.len(),
            })?;

        let mut stream = self.open_read("read_bytes_into")?;
        let target = &mut buf[offset..end];
        let mut filled = 0;
        while filled < target.len() {
            match stream.read(&mut target[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.io_error("read_bytes_into", e)),
            }
        }
        Ok(filled)
    }

    /// Read the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidData`] if the content is not valid UTF-8
    /// - Same as [`read_bytes`](Self::read_bytes) otherwise
    pub fn read_string(&self) -> Result<String, FsError> {
        self.read_string_as(TextEncoding::Utf8)
    }

    /// Read the whole file as text in the encoding named by `label`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnsupportedEncoding`] if `label` is unknown
    /// - Same as [`read_string_as`](Self::read_string_as) otherwise
    pub fn read_string_with_encoding(&self, label: &str) -> Result<String, FsError> {
        self.read_string_as(TextEncoding::for_label(label)?)
    }

    /// Read the whole file as text in `encoding`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidData`] if the content does not decode
    /// - Same as [`read_bytes`](Self::read_bytes) otherwise
    pub fn read_string_as(&self, encoding: TextEncoding) -> Result<String, FsError> {
        let bytes = self.read_bytes()?;
        encoding.decode(&bytes, &self.path)
    }

    /// Read UTF-8 text and split it into lines.
    ///
    /// `\r\n` is folded to `\n` first, so both conventions give the same lines.
    /// A trailing newline yields a final empty line.
    ///
    /// # Errors
    ///
    /// Same as [`read_string`](Self::read_string).
    pub fn read_all_lines(&self) -> Result<Vec<String>, FsError> {
        let text = self.read_string()?.replace("\r\n", "\n");
        Ok(text.split('\n').map(str::to_owned).collect())
    }

    pub(super) fn open_read(
        &self,
        operation: &'static str,
    ) -> Result<Box<dyn Read + Send>, FsError> {
        match self.storage() {
            StorageClass::Packaged => {
                trace!(path = %self.path, "opening packaged asset stream");
                self.root.assets(operation)?.open_stream(&self.path)
            }
            StorageClass::Mutable => {
                trace!(path = %self.absolute.display(), "opening file for reading");
                let file = File::open(&self.absolute).map_err(|e| self.io_error(operation, e))?;
                Ok(Box::new(file))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{FileHandle, FsError, Root};

    #[test]
    fn read_missing_file_is_io_not_found() {
        let h = FileHandle::new(Root::mutable("/nonexistent-assetfs-root/"), "gone.txt");
        let err = h.read_bytes().unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn read_bytes_into_checks_bounds_before_io() {
        let h = FileHandle::new(Root::mutable("/nonexistent-assetfs-root/"), "gone.txt");
        let mut buf = [0u8; 4];
        let err = h.read_bytes_into(&mut buf, 2, 3).unwrap_err();
        assert!(matches!(err, FsError::OutOfBounds { offset: 2, size: 3, len: 4 }));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let h = FileHandle::new(Root::mutable("/nonexistent-assetfs-root/"), "gone.txt");
        assert!(matches!(
            h.read_string_with_encoding("klingon"),
            Err(FsError::UnsupportedEncoding { .. })
        ));
    }
}
