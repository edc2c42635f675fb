//! Directory scanning.
//!
//! Two shapes of input are scanned, both one level deep:
//!
//! ```text
//! assets/wallpapers/          # Builder: source root
//! ├── Nature/                 # Collection (folder name = collection name)
//! │   ├── sunset.jpg          # Full variant
//! │   ├── sunset-min.jpg      # Minified variant, paired with sunset.jpg
//! │   └── notes.txt           # Unrecognized extension, skipped
//! ├── Cityscapes/
//! │   └── skyline-min.webp    # Minified only
//! ├── Empty/                  # No images: scanned, left out of the manifest
//! └── .cache/                 # Hidden, skipped
//!
//! fall/                       # Renamer: a single folder
//! ├── IMG_0046.jpg
//! └── IMG_0046-min.jpg
//! ```
//!
//! Subfolders of a collection are ignored; collections do not nest.
//! Everything is returned in name order.

use crate::pairing::{group_images, has_allowed_extension};
use crate::store::FileStore;
use crate::types::ImageGroup;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
}

/// A collection folder and the image groups found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedCollection {
    pub name: String,
    pub groups: Vec<ImageGroup>,
}

impl ScannedCollection {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Scan every visible subfolder of `root` as a collection.
///
/// Collections with no recognized images are still returned (with no
/// groups); deciding what to do with them is the caller's business.
pub fn scan_collections(
    store: &dyn FileStore,
    root: &Path,
    extensions: &[String],
    marker: &str,
) -> Result<Vec<ScannedCollection>, ScanError> {
    if !store.is_dir(root) {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }

    let mut collections = Vec::new();
    for entry in store.list_dir(root)? {
        if !entry.is_dir || entry.is_hidden() {
            continue;
        }
        let groups = scan_folder(store, &root.join(&entry.name), extensions, marker)?;
        tracing::debug!(collection = %entry.name, groups = groups.len(), "scanned collection");
        collections.push(ScannedCollection {
            name: entry.name,
            groups,
        });
    }
    Ok(collections)
}

/// Group the recognized image files directly inside `folder`.
pub fn scan_folder(
    store: &dyn FileStore,
    folder: &Path,
    extensions: &[String],
    marker: &str,
) -> Result<Vec<ImageGroup>, ScanError> {
    if !store.is_dir(folder) {
        return Err(ScanError::NotFound(folder.to_path_buf()));
    }

    let images = collect_images(store, folder, extensions)?;
    Ok(group_images(images, marker))
}

fn collect_images(
    store: &dyn FileStore,
    folder: &Path,
    extensions: &[String],
) -> Result<Vec<String>, ScanError> {
    let mut images = Vec::new();
    for entry in store.list_dir(folder)? {
        if entry.is_dir || entry.is_hidden() {
            continue;
        }
        if has_allowed_extension(&entry.name, extensions) {
            images.push(entry.name);
        } else {
            tracing::debug!(file = %entry.name, folder = %folder.display(), "skipping unrecognized file");
        }
    }
    Ok(images)
}
