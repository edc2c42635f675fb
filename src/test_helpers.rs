//! Shared test utilities.
//!
//! Fixture builders for real directories and lookup helpers over manifests,
//! scans and rename reports. Lookups panic with the available names on a miss.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_collection(tmp.path(), "Nature", &["sunset.jpg", "sunset-min.jpg"]);
//!
//! let nature = find_collection(&manifest, "Nature");
//! let sunset = find_entry(nature, "Sunset");
//! assert_eq!(sunset.filename, "sunset.jpg");
//! ```

use std::path::Path;

use crate::manifest::{Collection, CollectionEntry, KeptCollection, Manifest};
use crate::rename::{FileOutcome, RenameReport};
use crate::scan::ScannedCollection;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `root/<name>/` holding empty files with the given names.
pub fn write_collection(root: &Path, name: &str, files: &[&str]) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    for file in files {
        std::fs::write(dir.join(file), "fake image").unwrap();
    }
}

/// A collection whose entries only carry titles. Used for prior-manifest state.
pub fn collection(name: &str, titles: &[&str]) -> Collection {
    Collection {
        collection_name: name.to_string(),
        images: titles
            .iter()
            .map(|t| CollectionEntry {
                title: t.to_string(),
                filename: format!("{t}.jpg"),
                alt: format!("{t} - {name}"),
                image_path: format!("/old/{name}/{t}.jpg"),
                download_path: format!("/old/{name}/{t}.jpg"),
                fallback_path: "/old/fallback.png".to_string(),
            })
            .collect(),
    }
}

/// The same collection as it would come back from a prior manifest.
pub fn kept(name: &str, titles: &[&str]) -> KeptCollection {
    let raw = serde_json::to_value(collection(name, titles)).unwrap();
    KeptCollection::from_value(raw).unwrap()
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a scanned collection by name. Panics if not found.
pub fn find_collection<'a>(manifest: &'a Manifest, name: &str) -> &'a Collection {
    manifest.get(name).unwrap_or_else(|| {
        let names = collection_names(manifest);
        panic!("collection '{name}' not found. Available: {names:?}")
    })
}

/// Find an entry by title. Panics if not found.
pub fn find_entry<'a>(collection: &'a Collection, title: &str) -> &'a CollectionEntry {
    collection
        .images
        .iter()
        .find(|e| e.title == title)
        .unwrap_or_else(|| {
            let titles = entry_titles(collection);
            panic!(
                "entry '{title}' not found in '{}'. Available: {titles:?}",
                collection.collection_name
            )
        })
}

/// Find a scanned collection by folder name. Panics if not found.
pub fn find_scanned<'a>(scanned: &'a [ScannedCollection], name: &str) -> &'a ScannedCollection {
    scanned.iter().find(|c| c.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = scanned.iter().map(|c| c.name.as_str()).collect();
        panic!("scanned collection '{name}' not found. Available: {names:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Collection names in manifest order, kept ones included.
pub fn collection_names(manifest: &Manifest) -> Vec<&str> {
    manifest.names()
}

/// Entry titles in collection order.
pub fn entry_titles(collection: &Collection) -> Vec<&str> {
    collection.images.iter().map(|e| e.title.as_str()).collect()
}

// =========================================================================
// Rename assertions
// =========================================================================

/// Assert every renamed file landed on `<new_base>` or `<new_base>-min`
/// with a `.jpg` extension, i.e. no conflict suffix split a pair.
pub fn assert_renamed_pairs_intact(report: &RenameReport) {
    for group in &report.groups {
        let full = format!("{}.jpg", group.new_base);
        let min = format!("{}-min.jpg", group.new_base);
        for file in &group.files {
            if let FileOutcome::Renamed { from, to } = file {
                assert!(
                    *to == full || *to == min,
                    "'{from}' renamed to '{to}', expected '{full}' or '{min}'"
                );
            }
        }
    }
}
