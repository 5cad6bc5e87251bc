//! Caller-supplied predicates for filtered directory listings.

use std::path::Path;

/// Accepts or rejects a directory child by name.
///
/// Implemented for every `FnMut(&Path, &str) -> bool`, so closures work directly.
///
/// # Example
///
/// ```rust
/// use assetfs::NameFilter;
/// use std::path::Path;
///
/// let mut only_saves = |_parent: &Path, name: &str| name.starts_with("save");
/// assert!(only_saves.accept(Path::new("/data"), "save1.dat"));
/// assert!(!only_saves.accept(Path::new("/data"), "config.json"));
/// ```
pub trait NameFilter {
    /// `parent` is the physical path of the listed directory, `name` the child's name.
    fn accept(&mut self, parent: &Path, name: &str) -> bool;
}

impl<F> NameFilter for F
where
    F: FnMut(&Path, &str) -> bool,
{
    fn accept(&mut self, parent: &Path, name: &str) -> bool {
        self(parent, name)
    }
}

/// Accepts or rejects a directory child by its physical path.
///
/// Implemented for every `FnMut(&Path) -> bool`.
pub trait PathFilter {
    /// `candidate` is the physical path of the child.
    fn accept(&mut self, candidate: &Path) -> bool;
}

impl<F> PathFilter for F
where
    F: FnMut(&Path) -> bool,
{
    fn accept(&mut self, candidate: &Path) -> bool {
        self(candidate)
    }
}
