//! Directory enumeration.

use std::fs;
use std::path::Path;

use tracing::warn;

use super::FileHandle;
use crate::{FsError, NameFilter, PathFilter, StorageClass};

/// Direct children of `dir`, split into (files, directories), each sorted by name.
///
/// Entries that cannot be read, or that have non UTF-8 names or unreadable
/// types, are skipped with a warning. Only failing to open `dir` is an error.
pub(super) fn read_children(
    dir: &Path,
    operation: &'static str,
) -> Result<(Vec<String>, Vec<String>), FsError> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| FsError::io(operation, dir, e))?;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(dir = %dir.display(), name = ?raw, "skipping entry with non UTF-8 name");
                continue;
            }
        };
        match entry.file_type() {
            Ok(kind) if kind.is_dir() || (kind.is_symlink() && entry.path().is_dir()) => {
                dirs.push(name)
            }
            Ok(_) => files.push(name),
            Err(err) => {
                warn!(dir = %dir.display(), %name, error = %err, "skipping unreadable entry")
            }
        }
    }
    files.sort_unstable();
    dirs.sort_unstable();
    Ok((files, dirs))
}

impl FileHandle {
    /// Every direct child: files first, then directories, each group sorted by name.
    ///
    /// Returns an empty list for file handles and for every packaged handle;
    /// packaged assets are only reachable by name.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the directory cannot be read
    pub fn list(&self) -> Result<Vec<FileHandle>, FsError> {
        self.list_with_suffix("")
    }

    /// Direct children whose name ends with `suffix`. An empty suffix matches everything.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn list_with_suffix(&self, suffix: &str) -> Result<Vec<FileHandle>, FsError> {
        if !self.is_dir || self.storage() == StorageClass::Packaged {
            return Ok(Vec::new());
        }
        let (files, dirs) = read_children(&self.absolute, "list")?;
        Ok(files
            .iter()
            .chain(&dirs)
            .filter(|name| name.ends_with(suffix))
            .map(|name| self.child(self.root.strip_packaging_suffix(name)))
            .collect())
    }

    /// The result of [`list`](Self::list), kept where `filter` accepts
    /// (this directory's physical path, child name).
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn list_by_name<F: NameFilter>(&self, mut filter: F) -> Result<Vec<FileHandle>, FsError> {
        let mut children = self.list()?;
        children.retain(|child| filter.accept(&self.absolute, child.name()));
        Ok(children)
    }

    /// The result of [`list`](Self::list), kept where `filter` accepts the child's physical path.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn list_by_path<F: PathFilter>(&self, mut filter: F) -> Result<Vec<FileHandle>, FsError> {
        let mut children = self.list()?;
        children.retain(|child| filter.accept(child.absolute_path()));
        Ok(children)
    }

    /// First direct child file (by name order) whose on-disk name starts with `prefix`.
    ///
    /// Works for packaged directories too; the packaging suffix is stripped from
    /// the match. `None` if nothing matches or this is not a directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the directory cannot be read
    pub fn first_matching_child_file(&self, prefix: &str) -> Result<Option<FileHandle>, FsError> {
        if !self.is_dir {
            return Ok(None);
        }
        let (files, _) = read_children(&self.absolute, "first_matching_child_file")?;
        Ok(files
            .iter()
            .find(|name| name.starts_with(prefix))
            .map(|name| self.child(self.root.strip_packaging_suffix(name))))
    }
}
