use super::{DirEntry, FileStore};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(String),
}

/// In-memory [`FileStore`] for tests.
///
/// Paths are compared verbatim, so callers must build them with
/// [`Path::join`] from the same roots they pass to the code under test.
/// Adding a file creates its ancestor directories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    failing_renames: Mutex<HashSet<PathBuf>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and its parent directories) with the given contents.
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
        self
    }

    /// Add an empty directory (and its parents).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::Dir);
        self
    }

    /// Make every rename whose source is `path` fail with `PermissionDenied`.
    pub fn fail_rename_of(self, path: impl AsRef<Path>) -> Self {
        self.failing_renames
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Names of the files directly inside `dir`, sorted.
    pub fn file_names(&self, dir: &Path) -> Vec<String> {
        self.list_dir(dir)
            .unwrap_or_default()
            .into_iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name)
            .collect()
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::File(c)) => Some(c.clone()),
            _ => None,
        }
    }

    fn add_ancestors(&self, path: &Path) {
        let mut nodes = self.nodes.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

impl FileStore for MemoryStore {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let nodes = self.nodes.lock().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::other(format!(
                    "{} is not a directory",
                    path.display()
                )));
            }
            None => return Err(not_found(path)),
        }
        let mut entries: Vec<DirEntry> = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, node)| {
                p.file_name().map(|name| DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    is_dir: *node == Node::Dir,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut nodes = self.nodes.lock().unwrap();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && nodes.get(parent) != Some(&Node::Dir)
        {
            return Err(not_found(parent));
        }
        if nodes.get(path) == Some(&Node::Dir) {
            return Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            )));
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_string()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if matches!(self.nodes.lock().unwrap().get(path), Some(Node::File(_))) {
            return Err(io::Error::other(format!(
                "{} is a file",
                path.display()
            )));
        }
        self.add_ancestors(path);
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.failing_renames.lock().unwrap().contains(from) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("rename of {} refused", from.display()),
            ));
        }
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.remove(from) {
            Some(node @ Node::File(_)) => {
                nodes.insert(to.to_path_buf(), node);
                Ok(())
            }
            Some(Node::Dir) => {
                nodes.insert(from.to_path_buf(), Node::Dir);
                Err(io::Error::other("directory renames are not supported"))
            }
            None => Err(not_found(from)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_file_creates_parents() {
        let store = MemoryStore::new().with_file("root/Nature/a.jpg", "x");
        assert!(store.is_dir(Path::new("root")));
        assert!(store.is_dir(Path::new("root/Nature")));
        assert!(store.exists(Path::new("root/Nature/a.jpg")));
    }

    #[test]
    fn list_dir_returns_direct_children_only() {
        let store = MemoryStore::new()
            .with_file("root/b.jpg", "")
            .with_file("root/Nature/a.jpg", "")
            .with_dir("root/Empty");
        let entries = store.list_dir(Path::new("root")).unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry { name: "Empty".into(), is_dir: true },
                DirEntry { name: "Nature".into(), is_dir: true },
                DirEntry { name: "b.jpg".into(), is_dir: false },
            ]
        );
    }

    #[test]
    fn list_missing_dir_is_not_found() {
        let err = MemoryStore::new().list_dir(Path::new("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn write_requires_parent() {
        let store = MemoryStore::new();
        assert!(store.write(Path::new("data/out.json"), "[]").is_err());
        store.create_dir_all(Path::new("data")).unwrap();
        store.write(Path::new("data/out.json"), "[]").unwrap();
        assert_eq!(store.contents(Path::new("data/out.json")).as_deref(), Some("[]"));
    }

    #[test]
    fn rename_moves_contents() {
        let store = MemoryStore::new().with_file("f/IMG_1.jpg", "pixels");
        store
            .rename(Path::new("f/IMG_1.jpg"), Path::new("f/autumn.jpg"))
            .unwrap();
        assert_eq!(store.file_names(Path::new("f")), vec!["autumn.jpg"]);
        assert_eq!(store.contents(Path::new("f/autumn.jpg")).as_deref(), Some("pixels"));
    }

    #[test]
    fn injected_rename_failure() {
        let store = MemoryStore::new()
            .with_file("f/IMG_1.jpg", "")
            .fail_rename_of("f/IMG_1.jpg");
        let err = store
            .rename(Path::new("f/IMG_1.jpg"), Path::new("f/autumn.jpg"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(store.exists(Path::new("f/IMG_1.jpg")));
    }
}
