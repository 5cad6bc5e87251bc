//! Write operations.
//!
//! Packaged storage is read-only and directory handles cannot be written;
//! both are rejected before the filesystem is touched.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};

use tracing::trace;

use super::FileHandle;
use crate::{FsError, TextEncoding};

impl FileHandle {
    /// Open a sequential output stream, creating the file if needed.
    ///
    /// With `append == false` the file is truncated first.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] for packaged handles
    /// - [`FsError::IsADirectory`] for directory handles
    /// - [`FsError::Io`] if the file cannot be opened
    pub fn write(&self, append: bool) -> Result<Box<dyn Write + Send>, FsError> {
        self.ensure_writable("write")?;
        self.ensure_file("write")?;
        Ok(Box::new(self.open_write("write", append)?))
    }

    /// Like [`write`](Self::write), wrapped in a [`BufWriter`] of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write).
    pub fn write_buffered(
        &self,
        append: bool,
        capacity: usize,
    ) -> Result<BufWriter<Box<dyn Write + Send>>, FsError> {
        Ok(BufWriter::with_capacity(capacity, self.write(append)?))
    }

    /// Write `text` as UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write).
    pub fn write_string(&self, text: &str, append: bool) -> Result<(), FsError> {
        self.write_string_as(text, append, TextEncoding::Utf8)
    }

    /// Write `text` in the encoding named by `label`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnsupportedEncoding`] if `label` is unknown
    /// - Same as [`write_string_as`](Self::write_string_as) otherwise
    pub fn write_string_with_encoding(
        &self,
        text: &str,
        append: bool,
        label: &str,
    ) -> Result<(), FsError> {
        self.write_string_as(text, append, TextEncoding::for_label(label)?)
    }

    /// Write `text` in `encoding`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidData`] if `text` cannot be represented in `encoding`
    /// - Same as [`write`](Self::write) otherwise
    pub fn write_string_as(
        &self,
        text: &str,
        append: bool,
        encoding: TextEncoding,
    ) -> Result<(), FsError> {
        self.ensure_writable("write_string")?;
        self.ensure_file("write_string")?;
        let bytes = encoding.encode(text, &self.path)?;
        let mut file = self.open_write("write_string", append)?;
        file.write_all(&bytes)
            .map_err(|e| self.io_error("write_string", e))
    }

    /// Write all of `bytes`.
    ///
    /// # Errors
    ///
    /// Same as [`write_bytes_range`](Self::write_bytes_range).
    pub fn write_bytes(&self, bytes: &[u8], append: bool) -> Result<(), FsError> {
        self.write_bytes_range(bytes, 0, bytes.len(), append)
    }

    /// Write `bytes[offset..offset + size]`.
    ///
    /// `offset` is used twice: it selects where the slice starts in `bytes`,
    /// and, unless appending, the file position the slice is written at. Bytes
    /// before `offset` in the file are kept; the file ends right after the
    /// written slice. When appending no seek happens and the slice goes to the
    /// end of the file.
    ///
    /// # Errors
    ///
    /// - [`FsError::OutOfBounds`] if the range does not fit in `bytes`
    /// - Same as [`write`](Self::write) otherwise
    pub fn write_bytes_range(
        &self,
        bytes: &[u8],
        offset: usize,
        size: usize,
        append: bool,
    ) -> Result<(), FsError> {
        self.ensure_writable("write_bytes")?;
        self.ensure_file("write_bytes")?;
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= bytes.len())
            .ok_or(FsError::OutOfBounds {
                offset,
                size,
                len: bytes.len(),
            })?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .append(append)
            .open(&self.absolute)
            .map_err(|e| self.io_error("write_bytes", e))?;
        if !append {
            file.seek(SeekFrom::Start(offset as u64))
                .map_err(|e| self.io_error("write_bytes", e))?;
        }
        file.write_all(&bytes[offset..end])
            .map_err(|e| self.io_error("write_bytes", e))?;
        if !append {
            file.set_len(end as u64)
                .map_err(|e| self.io_error("write_bytes", e))?;
        }
        Ok(())
    }

    /// Copy everything from `reader` into this file. Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if reading or writing fails
    /// - Same as [`write`](Self::write) otherwise
    pub fn write_from<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        append: bool,
    ) -> Result<u64, FsError> {
        self.ensure_writable("write_from")?;
        self.ensure_file("write_from")?;
        let mut file = self.open_write("write_from", append)?;
        io::copy(reader, &mut file).map_err(|e| self.io_error("write_from", e))
    }

    fn open_write(&self, operation: &'static str, append: bool) -> Result<File, FsError> {
        trace!(path = %self.absolute.display(), append, "opening file for writing");
        OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(&self.absolute)
            .map_err(|e| self.io_error(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use crate::{FileHandle, FsError, Root};

    #[test]
    fn write_bytes_range_checks_bounds() {
        let h = FileHandle::new(Root::mutable("/nonexistent-assetfs-root/"), "x.bin");
        let err = h.write_bytes_range(&[1, 2, 3], 2, 2, false).unwrap_err();
        assert!(matches!(err, FsError::OutOfBounds { len: 3, .. }));
    }

    #[test]
    fn write_into_missing_parent_is_io_error() {
        let h = FileHandle::new(Root::mutable("/nonexistent-assetfs-root/"), "deep/x.txt");
        let err = h.write_string("hi", false).unwrap_err();
        assert!(err.io_kind().is_some());
    }
}
