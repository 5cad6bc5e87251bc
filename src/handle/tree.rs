//! Tree mutation: mkdirs, delete, copy, move.
//!
//! Everything here is single-pass and best effort. A failure midway through a
//! recursive copy or delete leaves whatever was already done in place.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::{debug, warn};

use super::dir::read_children;
use super::{FileHandle, is_separator};
use crate::{FsError, StorageClass};

impl FileHandle {
    /// Create this directory and any missing parents, then reclassify the
    /// handle as a directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] for packaged handles
    /// - [`FsError::Io`] if a directory cannot be created
    pub fn mkdirs(&mut self) -> Result<(), FsError> {
        self.ensure_writable("mkdirs")?;
        debug!(path = %self.absolute.display(), "creating directories");
        fs::create_dir_all(&self.absolute).map_err(|e| self.io_error("mkdirs", e))?;
        self.is_dir = true;
        self.metadata = fs::metadata(&self.absolute).ok();
        Ok(())
    }

    /// Remove a file, or a directory only if it is empty.
    ///
    /// Returns `Ok(false)` for a non-empty directory, which is left untouched.
    /// A file that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] for packaged handles
    /// - [`FsError::Io`] for any other failure
    pub fn delete(&self) -> Result<bool, FsError> {
        self.ensure_writable("delete")?;
        if self.is_dir {
            let mut entries = fs::read_dir(&self.absolute).map_err(|e| self.io_error("delete", e))?;
            if entries.next().is_some() {
                debug!(path = %self.absolute.display(), "refusing to delete non-empty directory");
                return Ok(false);
            }
            debug!(path = %self.absolute.display(), "deleting empty directory");
            fs::remove_dir(&self.absolute).map_err(|e| self.io_error("delete", e))?;
        } else {
            debug!(path = %self.absolute.display(), "deleting file");
            match fs::remove_file(&self.absolute) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(self.io_error("delete", e)),
            }
        }
        Ok(true)
    }

    /// Remove a directory with everything below it, or a single file.
    ///
    /// Failures are reported as `Ok(false)`. Whatever was removed before the
    /// failure stays removed.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] for packaged handles
    pub fn delete_directory(&self) -> Result<bool, FsError> {
        self.ensure_writable("delete_directory")?;
        debug!(path = %self.absolute.display(), is_dir = self.is_dir, "deleting recursively");
        let result = if self.is_dir {
            fs::remove_dir_all(&self.absolute)
        } else {
            match fs::remove_file(&self.absolute) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            }
        };
        match result {
            Ok(()) => Ok(true),
            Err(err) => {
                warn!(path = %self.absolute.display(), error = %err, "recursive delete failed");
                Ok(false)
            }
        }
    }

    /// Remove every descendant, deleting child subtrees wholesale.
    ///
    /// Returns `Ok(false)` if some child could not be removed.
    ///
    /// # Errors
    ///
    /// Same as [`empty_directory_with`](Self::empty_directory_with).
    pub fn empty_directory(&self) -> Result<bool, FsError> {
        self.empty_directory_with(false)
    }

    /// Remove every descendant of this directory.
    ///
    /// With `preserve_tree` every directory at every depth is kept and only
    /// files are removed. Without it each child is removed via
    /// [`delete_directory`](Self::delete_directory).
    ///
    /// Every child is attempted. Returns `Ok(false)` if any of them could not be
    /// removed; the failures are logged by `delete_directory`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] for packaged handles
    /// - [`FsError::Io`] if a directory cannot be listed or a file cannot be deleted
    pub fn empty_directory_with(&self, preserve_tree: bool) -> Result<bool, FsError> {
        self.ensure_writable("empty_directory")?;
        debug!(path = %self.absolute.display(), preserve_tree, "emptying directory");
        let mut emptied = true;
        for child in self.list()? {
            let removed = if !preserve_tree {
                child.delete_directory()?
            } else if child.is_directory() {
                child.empty_directory_with(true)?
            } else {
                child.delete()?
            };
            emptied &= removed;
        }
        Ok(emptied)
    }

    /// Copy this file or directory to `dest`.
    ///
    /// - Directory source: mirrored recursively into `dest`, files before
    ///   subdirectories at each level, overwriting existing files.
    /// - File source onto an existing directory: copied inside it under its own name.
    /// - File source onto an existing file: overwrites it.
    /// - File source onto a missing `dest`: the parent chain is created first. If
    ///   `dest`'s path ends with a separator it is created as a directory and the
    ///   file lands inside it.
    ///
    /// Packaged files are streamed through the asset source.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] if `dest` is packaged, or the source is a packaged directory
    /// - [`FsError::NotADirectory`] if a directory is copied onto an existing file
    /// - [`FsError::Io`] if any copy step fails
    pub fn copy_to(&self, dest: &FileHandle) -> Result<(), FsError> {
        dest.ensure_writable("copy_to")?;
        debug!(from = %self.absolute.display(), to = %dest.absolute.display(), "copying");

        if self.is_dir {
            if self.storage() == StorageClass::Packaged {
                return Err(FsError::NotSupported {
                    operation: "copy_to",
                    storage: self.storage(),
                });
            }
            if dest.exists() && !dest.is_directory() {
                return Err(FsError::NotADirectory {
                    path: dest.absolute.clone(),
                });
            }
            if dest.absolute.starts_with(&self.absolute) {
                return Err(FsError::io(
                    "copy_to",
                    dest.absolute.clone(),
                    io::Error::new(
                        ErrorKind::InvalidInput,
                        "destination lies inside the source directory",
                    ),
                ));
            }
            return copy_tree(&self.absolute, &dest.absolute);
        }

        let target = if dest.exists() {
            if dest.is_directory() {
                dest.child(self.name())
            } else {
                dest.clone()
            }
        } else if dest.path.ends_with(is_separator) {
            let mut dir = dest.clone();
            dir.mkdirs()?;
            dir.child(self.name())
        } else {
            dest.parent().mkdirs()?;
            dest.clone()
        };
        self.copy_file_to(&target.absolute)
    }

    /// Move this file or directory to `dest` with a native rename.
    ///
    /// **Destructive:** if `dest` already exists it is deleted first, with
    /// everything below it. Nothing is merged.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotSupported`] if either handle is packaged
    /// - [`FsError::Io`] with [`ErrorKind::InvalidInput`] if one path contains
    ///   the other; nothing is deleted in that case
    /// - [`FsError::Io`] if the rename fails (for instance across devices)
    pub fn move_to(&self, dest: &FileHandle) -> Result<(), FsError> {
        self.ensure_writable("move_to")?;
        dest.ensure_writable("move_to")?;
        if self.absolute == dest.absolute {
            return Ok(());
        }
        if self.absolute.starts_with(&dest.absolute) || dest.absolute.starts_with(&self.absolute) {
            return Err(FsError::io(
                "move_to",
                dest.absolute.clone(),
                io::Error::new(
                    ErrorKind::InvalidInput,
                    "source and destination contain one another",
                ),
            ));
        }
        if dest.exists() && !dest.delete_directory()? {
            warn!(path = %dest.absolute.display(), "could not clear move destination");
        }
        debug!(from = %self.absolute.display(), to = %dest.absolute.display(), "moving");
        fs::rename(&self.absolute, &dest.absolute).map_err(|e| self.io_error("move_to", e))
    }

    fn copy_file_to(&self, target: &Path) -> Result<(), FsError> {
        if target == self.absolute.as_path() {
            return Ok(());
        }
        match self.storage() {
            StorageClass::Mutable => {
                fs::copy(&self.absolute, target).map_err(|e| self.io_error("copy_to", e))?;
            }
            StorageClass::Packaged => {
                let mut stream = self.read()?;
                let mut out = File::create(target).map_err(|e| FsError::io("copy_to", target, e))?;
                io::copy(&mut stream, &mut out).map_err(|e| FsError::io("copy_to", target, e))?;
            }
        }
        Ok(())
    }
}

fn copy_tree(source: &Path, target: &Path) -> Result<(), FsError> {
    fs::create_dir_all(target).map_err(|e| FsError::io("copy_to", target, e))?;
    let (files, dirs) = read_children(source, "copy_to")?;
    for name in &files {
        fs::copy(source.join(name), target.join(name))
            .map_err(|e| FsError::io("copy_to", source.join(name), e))?;
    }
    for name in &dirs {
        copy_tree(&source.join(name), &target.join(name))?;
    }
    Ok(())
}
