//! Filesystem access behind a narrow trait.
//!
//! Scanning, manifest I/O and renaming only ever need a handful of
//! operations: list a directory, read a file, write a file, rename a file.
//! [`FileStore`] names exactly those so the grouping, merge and rename logic
//! can run against an in-memory store in tests instead of a real directory
//! tree.
//!
//! | Implementation | Backing |
//! |---|---|
//! | [`DiskStore`] | `std::fs` + `walkdir` for listings |
//! | `MemoryStore` (tests only) | in-memory tree, with rename-failure injection |

mod disk;
#[cfg(test)]
mod memory;

pub use disk::DiskStore;
#[cfg(test)]
pub use memory::MemoryStore;

use std::io;
use std::path::Path;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// The filesystem operations the builder and renamer rely on.
pub trait FileStore {
    /// Direct children of `path`, sorted by name.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` with `contents`. The parent must exist.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Move a file within the store, replacing any file at `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}
