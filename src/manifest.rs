//! Gallery manifest construction and persistence.
//!
//! The manifest is the only artifact of a build: a JSON array with one object
//! per collection, consumed by the gallery front end.
//!
//! ```json
//! [
//!   {
//!     "collection_name": "Nature",
//!     "images": [
//!       {
//!         "title": "Sunset",
//!         "filename": "sunset.jpg",
//!         "alt": "Sunset - Nature",
//!         "image_path": "/portfolio/../assets/wallpapers/Nature/sunset-min.jpg",
//!         "download_path": "/portfolio/../assets/wallpapers/Nature/sunset.jpg",
//!         "fallback_path": "/portfolio/assets/no_image.png"
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! ## Build steps
//!
//! 1. Load the prior manifest. A missing file is an empty prior; an
//!    unreadable or malformed one is also an empty prior, with a warning.
//! 2. Scan the source root. Each collection folder with at least one image
//!    group becomes a [`Collection`]; empty folders are left out.
//! 3. Merge: scanned collections replace prior ones wholesale. Prior
//!    collections that the scan did not produce are appended unchanged, in
//!    their prior order.
//! 4. Write the result over the old file (2-space indented JSON).
//!
//! ## Prior collections are opaque
//!
//! Apart from `collection_name`, nothing in the prior manifest is read.
//! A kept collection is written back exactly as it was parsed: hand-added
//! keys survive, missing keys stay missing, and key order is preserved.
//!
//! Scanning is deterministic, so two builds over an unchanged tree write
//! identical bytes.

use crate::config::GalleryConfig;
use crate::naming::{alt_text, display_title, public_path};
use crate::scan::{ScanError, ScannedCollection, scan_collections};
use crate::store::FileStore;
use crate::types::ImageGroup;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// One image's public record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub title: String,
    pub filename: String,
    pub alt: String,
    /// URL shown while browsing (minified variant when available).
    pub image_path: String,
    /// URL offered for download (full variant when available).
    pub download_path: String,
    pub fallback_path: String,
}

/// A named collection of images built from one collection folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_name: String,
    pub images: Vec<CollectionEntry>,
}

/// A collection carried over from the prior manifest, as it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptCollection {
    pub name: String,
    pub raw: Value,
}

impl KeptCollection {
    /// Wrap one element of a prior manifest. `None` unless it is an object
    /// with a string `collection_name`.
    pub fn from_value(raw: Value) -> Option<Self> {
        let name = raw.get("collection_name")?.as_str()?.to_string();
        Some(Self { name, raw })
    }

    /// Length of the `images` array, 0 when there is none.
    pub fn image_count(&self) -> usize {
        self.raw
            .get("images")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl Serialize for KeptCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// The persisted manifest: scanned collections in name order, then kept
/// ones in prior order. Names are unique across both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub collections: Vec<Collection>,
    pub kept: Vec<KeptCollection>,
}

impl Manifest {
    /// Scanned collection by name.
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.collection_name == name)
    }

    /// Kept collection by name.
    pub fn get_kept(&self, name: &str) -> Option<&KeptCollection> {
        self.kept.iter().find(|c| c.name == name)
    }

    /// Collection names in output order.
    pub fn names(&self) -> Vec<&str> {
        self.collections
            .iter()
            .map(|c| c.collection_name.as_str())
            .chain(self.kept.iter().map(|k| k.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len() + self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn image_count(&self) -> usize {
        let scanned: usize = self.collections.iter().map(|c| c.images.len()).sum();
        let kept: usize = self.kept.iter().map(KeptCollection::image_count).sum();
        scanned + kept
    }

    /// Serialize the way the manifest is persisted.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for collection in &self.collections {
            seq.serialize_element(collection)?;
        }
        for kept in &self.kept {
            seq.serialize_element(kept)?;
        }
        seq.end()
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Build the public record for one image group.
pub fn build_entry(group: &ImageGroup, collection: &str, config: &GalleryConfig) -> CollectionEntry {
    let settings = &config.manifest;
    let url = |file: &str| {
        public_path(&settings.url_prefix, &settings.source_root, collection, file)
    };
    let title = display_title(&group.base_name);
    CollectionEntry {
        alt: alt_text(&title, collection),
        filename: group.primary_filename().to_string(),
        image_path: url(group.display_filename()),
        download_path: url(group.download_filename()),
        fallback_path: settings.fallback_path.clone(),
        title,
    }
}

/// Build a collection from a scanned folder. `None` when the folder had no images.
pub fn build_collection(scanned: &ScannedCollection, config: &GalleryConfig) -> Option<Collection> {
    if scanned.is_empty() {
        return None;
    }
    for group in &scanned.groups {
        for (file, _) in &group.extra_files {
            tracing::debug!(collection = %scanned.name, file = %file, "file shares a variant slot, not listed");
        }
    }
    Some(Collection {
        collection_name: scanned.name.clone(),
        images: scanned
            .groups
            .iter()
            .map(|g| build_entry(g, &scanned.name, config))
            .collect(),
    })
}

/// Build a manifest from scanned collections, dropping empty ones.
pub fn build_manifest(scanned: &[ScannedCollection], config: &GalleryConfig) -> Manifest {
    Manifest {
        collections: scanned
            .iter()
            .filter_map(|c| build_collection(c, config))
            .collect(),
        kept: Vec::new(),
    }
}

// ============================================================================
// Prior manifest
// ============================================================================

/// What was found at the output path before this run.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorManifest {
    Missing,
    Loaded(Vec<KeptCollection>),
    /// The file exists but is unreadable, not JSON, or not an array.
    Invalid(String),
}

impl PriorManifest {
    /// Prior collections to merge with. `Missing` and `Invalid` are both empty.
    pub fn into_collections(self) -> Vec<KeptCollection> {
        match self {
            PriorManifest::Loaded(collections) => collections,
            PriorManifest::Missing | PriorManifest::Invalid(_) => Vec::new(),
        }
    }
}

/// Load the manifest written by a previous run. Never fails.
///
/// The file only has to be a JSON array. Elements without a string
/// `collection_name` cannot be matched against the scan and are dropped
/// with a warning; everything else is kept verbatim.
pub fn load_prior(store: &dyn FileStore, path: &Path) -> PriorManifest {
    if !store.exists(path) {
        return PriorManifest::Missing;
    }
    let parsed = store
        .read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<Vec<Value>>(&content).map_err(|e| e.to_string())
        });
    match parsed {
        Ok(values) => {
            let mut collections = Vec::with_capacity(values.len());
            for (index, value) in values.into_iter().enumerate() {
                match KeptCollection::from_value(value) {
                    Some(kept) => collections.push(kept),
                    None => tracing::warn!(
                        path = %path.display(),
                        index,
                        "prior manifest element has no collection_name, dropping it"
                    ),
                }
            }
            PriorManifest::Loaded(dedupe_by_name(collections))
        }
        Err(reason) => {
            tracing::warn!(path = %path.display(), %reason, "existing manifest is invalid, starting fresh");
            PriorManifest::Invalid(reason)
        }
    }
}

/// Collapse repeated collection names: first position, last data.
fn dedupe_by_name(prior: Vec<KeptCollection>) -> Vec<KeptCollection> {
    let mut collections: Vec<KeptCollection> = Vec::with_capacity(prior.len());
    for collection in prior {
        match collections.iter_mut().find(|c| c.name == collection.name) {
            Some(existing) => *existing = collection,
            None => collections.push(collection),
        }
    }
    collections
}

// ============================================================================
// Merge
// ============================================================================

/// Merge a freshly built manifest with prior collections.
///
/// Collections in `scanned` are taken as-is. Prior collections whose name
/// the scan did not produce are appended unchanged.
pub fn merge(scanned: Manifest, prior: Vec<KeptCollection>) -> Manifest {
    let scanned_names: HashSet<&str> = scanned
        .collections
        .iter()
        .map(|c| c.collection_name.as_str())
        .collect();
    let kept = prior
        .into_iter()
        .filter(|k| !scanned_names.contains(k.name.as_str()))
        .collect();

    Manifest {
        collections: scanned.collections,
        kept,
    }
}

/// Write the manifest to `path`, replacing any existing file.
///
/// The parent directory is created if missing.
pub fn write_manifest(
    store: &dyn FileStore,
    path: &Path,
    manifest: &Manifest,
) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        store.create_dir_all(parent)?;
    }
    store.write(path, &manifest.to_json()?)?;
    Ok(())
}

// ============================================================================
// Build driver
// ============================================================================

/// How the prior manifest looked, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorStatus {
    Missing,
    Loaded { collections: usize },
    Invalid { reason: String },
}

/// Where a collection in the output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Scanned,
    Kept,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub name: String,
    pub image_count: usize,
    pub origin: Origin,
}

/// Everything a build did, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub manifest: Manifest,
    pub prior: PriorStatus,
    pub collections: Vec<CollectionSummary>,
    /// Collection folders with no recognized images.
    pub skipped_empty: Vec<String>,
    pub output_path: PathBuf,
    /// False for a check run.
    pub written: bool,
}

/// Scan, merge and return the manifest a build would write, without writing.
pub fn plan(store: &dyn FileStore, config: &GalleryConfig) -> Result<BuildReport, ManifestError> {
    let output_path = config.manifest.output_path();

    let prior = load_prior(store, &output_path);
    let prior_status = match &prior {
        PriorManifest::Missing => PriorStatus::Missing,
        PriorManifest::Loaded(collections) => PriorStatus::Loaded {
            collections: collections.len(),
        },
        PriorManifest::Invalid(reason) => PriorStatus::Invalid {
            reason: reason.clone(),
        },
    };

    let scanned = scan_collections(
        store,
        Path::new(&config.manifest.source_root),
        &config.manifest.extensions,
        &config.min_marker,
    )?;
    let skipped_empty = scanned
        .iter()
        .filter(|c| c.is_empty())
        .map(|c| c.name.clone())
        .collect();

    let manifest = merge(build_manifest(&scanned, config), prior.into_collections());
    let scanned_summaries = manifest.collections.iter().map(|c| CollectionSummary {
        name: c.collection_name.clone(),
        image_count: c.images.len(),
        origin: Origin::Scanned,
    });
    let kept_summaries = manifest.kept.iter().map(|k| CollectionSummary {
        name: k.name.clone(),
        image_count: k.image_count(),
        origin: Origin::Kept,
    });
    let collections = scanned_summaries.chain(kept_summaries).collect();

    Ok(BuildReport {
        manifest,
        prior: prior_status,
        collections,
        skipped_empty,
        output_path,
        written: false,
    })
}

/// Run a full build: plan, then write the manifest.
pub fn build(store: &dyn FileStore, config: &GalleryConfig) -> Result<BuildReport, ManifestError> {
    let mut report = plan(store, config)?;
    write_manifest(store, &report.output_path, &report.manifest)?;
    report.written = true;
    tracing::info!(
        path = %report.output_path.display(),
        collections = report.manifest.len(),
        images = report.manifest.image_count(),
        "manifest written"
    );
    Ok(report)
}
