//! Themed batch renaming.
//!
//! Gives every image group in a folder a new base name drawn from a theme
//! vocabulary, moving the full and minified copies together:
//!
//! ```text
//! IMG_0046.jpg      → maple.jpg
//! IMG_0046-min.jpg  → maple-min.jpg
//! IMG_0047.jpeg     → cider.jpg        (extension normalized)
//! ```
//!
//! ## Assignment policies
//!
//! The vocabulary is shuffled once per run and handed to a [`NamePolicy`],
//! which produces one name per group:
//!
//! - [`Policy::Exhausting`]: each word once; after the list runs out, words
//!   are reused in the same order as `word-1`, `word-2`, ... counted per word.
//! - [`Policy::Cycle`]: words repeat in shuffled order. Groups that land on
//!   the same word are separated only by on-disk conflict resolution.
//!
//! ## Conflicts
//!
//! A target that already exists (and is not the file being moved) gets a
//! numeric suffix, `maple_1.jpg`, `maple_2.jpg`, ..., until a free name is
//! found. Renames only ever land on free names, so no two files end up
//! sharing one.
//!
//! Renaming is destructive: there is no dry run and no undo. A failed rename
//! is recorded in the report and the run carries on.

use crate::config::GalleryConfig;
use crate::scan::{ScanError, scan_folder};
use crate::store::FileStore;
use crate::types::ImageGroup;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default fall-themed vocabulary.
pub const FALL_WORDS: [&str; 36] = [
    "autumn", "harvest", "pumpkin", "maple", "crisp", "cozy", "scarecrow", "hayride", "cider",
    "bonfire", "sweater", "leaves", "orange", "golden", "acorn", "squash", "gourd", "chilly",
    "october", "november", "rustic", "foliage", "cranberry", "nutmeg", "cinnamon", "plaid",
    "corn", "woods", "orchard", "spice", "amber", "bronze", "chestnut", "copper", "warm",
    "woodland",
];

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Folder does not exist: {0}")]
    FolderNotFound(PathBuf),
    #[error("Vocabulary is empty")]
    EmptyVocabulary,
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
}

// ============================================================================
// Policies
// ============================================================================

/// Which [`NamePolicy`] hands out words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Exhausting,
    Cycle,
}

impl Policy {
    /// Build the name source for this policy over an already-shuffled vocabulary.
    pub fn names(self, words: Vec<String>) -> Result<Box<dyn NamePolicy>, RenameError> {
        if words.is_empty() {
            return Err(RenameError::EmptyVocabulary);
        }
        Ok(match self {
            Policy::Exhausting => Box::new(ExhaustingNames::new(words)),
            Policy::Cycle => Box::new(CyclingNames::new(words)),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Exhausting => f.write_str("exhausting"),
            Policy::Cycle => f.write_str("cycle"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhausting" => Ok(Policy::Exhausting),
            "cycle" => Ok(Policy::Cycle),
            other => Err(format!(
                "unknown policy '{other}' (expected 'exhausting' or 'cycle')"
            )),
        }
    }
}

/// A source of theme words, one per image group.
pub trait NamePolicy {
    fn next_word(&mut self) -> String;
}

/// Each word once, then `word-N` reuse.
#[derive(Debug)]
pub struct ExhaustingNames {
    words: Vec<String>,
    issued: usize,
    reuse_counts: HashMap<String, u32>,
}

impl ExhaustingNames {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            issued: 0,
            reuse_counts: HashMap::new(),
        }
    }
}

impl NamePolicy for ExhaustingNames {
    fn next_word(&mut self) -> String {
        let n = self.words.len();
        let i = self.issued;
        self.issued += 1;
        if i < n {
            return self.words[i].clone();
        }
        let word = &self.words[(i - n) % n];
        let count = self.reuse_counts.entry(word.clone()).or_insert(0);
        *count += 1;
        format!("{word}-{count}")
    }
}

/// Words repeat modulo vocabulary size.
#[derive(Debug)]
pub struct CyclingNames {
    words: Vec<String>,
    issued: usize,
}

impl CyclingNames {
    pub fn new(words: Vec<String>) -> Self {
        Self { words, issued: 0 }
    }
}

impl NamePolicy for CyclingNames {
    fn next_word(&mut self) -> String {
        let word = self.words[self.issued % self.words.len()].clone();
        self.issued += 1;
        word
    }
}

/// Shuffle a vocabulary for one run.
pub fn shuffled<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Vec<String> {
    let mut words = words.to_vec();
    words.shuffle(rng);
    words
}

// ============================================================================
// Assignment
// ============================================================================

/// Per-run renaming settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameOptions {
    pub prefix: Option<String>,
    pub separator: String,
    pub policy: Policy,
    pub extensions: Vec<String>,
    /// Without the leading dot.
    pub target_extension: String,
    pub marker: String,
}

impl RenameOptions {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            prefix: None,
            separator: config.rename.separator.clone(),
            policy: config.rename.policy,
            extensions: config.rename.extensions.clone(),
            target_extension: config.rename.target_extension.trim_start_matches('.').to_string(),
            marker: config.min_marker.clone(),
        }
    }

    /// Set the name prefix. Blank prefixes count as none.
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    fn render(&self, word: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{}{word}", self.separator),
            None => word.to_string(),
        }
    }
}

/// A group and the base name it will be renamed to.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameAssignment {
    pub group: ImageGroup,
    pub new_base: String,
}

/// Draw one name per group, in group order.
pub fn assign(
    groups: Vec<ImageGroup>,
    names: &mut dyn NamePolicy,
    options: &RenameOptions,
) -> Vec<RenameAssignment> {
    groups
        .into_iter()
        .map(|group| RenameAssignment {
            new_base: options.render(&names.next_word()),
            group,
        })
        .collect()
}

/// First free path for `{stem}.{ext}` in `folder`, appending `_1`, `_2`, ...
/// to the stem while the candidate exists and is not `source` itself.
pub fn resolve_target(
    store: &dyn FileStore,
    folder: &Path,
    stem: &str,
    extension: &str,
    source: &Path,
) -> PathBuf {
    let mut candidate = folder.join(format!("{stem}.{extension}"));
    let mut counter = 1u32;
    while store.exists(&candidate) && candidate != source {
        candidate = folder.join(format!("{stem}_{counter}.{extension}"));
        counter += 1;
    }
    candidate
}

// ============================================================================
// Driver
// ============================================================================

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Renamed { from: String, to: String },
    /// Target name equals the current name.
    Unchanged { name: String },
    Failed { from: String, to: String, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    pub old_base: String,
    pub new_base: String,
    pub files: Vec<FileOutcome>,
}

/// Everything a rename run did, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameReport {
    pub folder: PathBuf,
    pub groups: Vec<GroupOutcome>,
}

impl RenameReport {
    /// True when the folder held no matching images.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn renamed_count(&self) -> usize {
        self.count(|f| matches!(f, FileOutcome::Renamed { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|f| matches!(f, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.files.iter())
            .filter(|f| pred(f))
            .count()
    }
}

/// Rename every image group in `folder` to a theme word.
///
/// `words` is used in the given order; shuffle it first (see [`shuffled`]).
/// Fails before touching anything if the folder does not exist or the
/// vocabulary is empty. Individual rename failures do not fail the run.
pub fn rename_folder(
    store: &dyn FileStore,
    folder: &Path,
    options: &RenameOptions,
    words: Vec<String>,
) -> Result<RenameReport, RenameError> {
    if !store.is_dir(folder) {
        return Err(RenameError::FolderNotFound(folder.to_path_buf()));
    }
    let mut names = options.policy.names(words)?;

    let groups = scan_folder(store, folder, &options.extensions, &options.marker)?;
    if groups.is_empty() {
        tracing::info!(folder = %folder.display(), "no matching images, nothing to rename");
    }

    let assignments = assign(groups, names.as_mut(), options);
    let groups = assignments
        .into_iter()
        .map(|a| rename_group(store, folder, options, a))
        .collect();

    Ok(RenameReport {
        folder: folder.to_path_buf(),
        groups,
    })
}

fn rename_group(
    store: &dyn FileStore,
    folder: &Path,
    options: &RenameOptions,
    assignment: RenameAssignment,
) -> GroupOutcome {
    let RenameAssignment { group, new_base } = assignment;
    let files = group
        .files()
        .map(|(name, variant)| {
            let source = folder.join(name);
            let stem = format!("{new_base}{}", variant.stem_suffix(&options.marker));
            let target = resolve_target(store, folder, &stem, &options.target_extension, &source);
            let to = target
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();

            if target == source {
                return FileOutcome::Unchanged {
                    name: name.to_string(),
                };
            }
            match store.rename(&source, &target) {
                Ok(()) => {
                    tracing::debug!(from = %name, to = %to, "renamed");
                    FileOutcome::Renamed {
                        from: name.to_string(),
                        to,
                    }
                }
                Err(e) => {
                    tracing::warn!(from = %name, to = %to, error = %e, "rename failed");
                    FileOutcome::Failed {
                        from: name.to_string(),
                        to,
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect();

    GroupOutcome {
        old_base: group.base_name,
        new_base,
        files,
    }
}
