use super::{DirEntry, FileStore};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// [`FileStore`] over the real filesystem.
///
/// Listings follow symlinks, so a symlinked collection folder counts as a
/// directory. A link whose target cannot be reached is listed as a file;
/// only a directory that cannot be read fails the listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir: entry.file_type().is_dir(),
                },
                Err(err) => unfollowable_link(err)?,
            };
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Dangling symlinks exist too, so renames never land on one.
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

/// Turn a failure to follow a child symlink (dangling or looping) into a
/// plain-file entry. Any other walk error is returned as is.
fn unfollowable_link(err: walkdir::Error) -> io::Result<DirEntry> {
    let link_name = err
        .path()
        .filter(|child| err.depth() > 0 && child.is_symlink())
        .and_then(|child| child.file_name())
        .map(|name| name.to_string_lossy().into_owned());

    match link_name {
        Some(name) => {
            tracing::debug!(entry = %name, error = %err, "cannot follow link, listing it as a file");
            Ok(DirEntry {
                name,
                is_dir: false,
            })
        }
        None => Err(err.into()),
    }
}
