//! Shared types used by both the manifest builder and the renamer.
//!
//! An [`ImageGroup`] is the unit both components work on: one logical image
//! that may exist on disk as a full-resolution original, a minified copy, or
//! both. Grouping happens in [`pairing`](crate::pairing).

use serde::Serialize;

/// Which copy of a logical image a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Original, high-resolution file. Offered for download.
    Full,
    /// Size-reduced copy, identified by the minified marker. Used for display.
    Min,
}

impl Variant {
    /// Suffix this variant carries in its filename stem.
    ///
    /// `Full` carries nothing; `Min` carries the configured marker (`-min`).
    pub fn stem_suffix(self, marker: &str) -> &str {
        match self {
            Variant::Full => "",
            Variant::Min => marker,
        }
    }
}

/// One logical image within a directory.
///
/// Invariant: at least one of `full_variant` / `min_variant` is `Some`.
/// Groups are only constructed by [`pairing::group_images`](crate::pairing::group_images),
/// which never materializes an empty group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageGroup {
    /// Filename stem with the minified marker stripped.
    pub base_name: String,
    pub full_variant: Option<String>,
    pub min_variant: Option<String>,
    /// Extension of the full variant if present, else of the minified one.
    /// Stored without the leading dot, case preserved.
    pub extension: String,
    /// Files that mapped to an already-filled variant slot (e.g. `x.jpg`
    /// next to `x.jpeg`), in name order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_files: Vec<(String, Variant)>,
}

impl ImageGroup {
    /// Filename recorded in the manifest: the full variant, else the minified one.
    pub fn primary_filename(&self) -> &str {
        self.full_variant
            .as_deref()
            .or(self.min_variant.as_deref())
            .unwrap_or_default()
    }

    /// File served for browsing: the minified variant when one exists.
    pub fn display_filename(&self) -> &str {
        self.min_variant
            .as_deref()
            .or(self.full_variant.as_deref())
            .unwrap_or_default()
    }

    /// File offered for download: the full variant when one exists.
    ///
    /// Equals [`display_filename`](Self::display_filename) when only one
    /// variant is present.
    pub fn download_filename(&self) -> &str {
        self.primary_filename()
    }

    pub fn is_paired(&self) -> bool {
        self.full_variant.is_some() && self.min_variant.is_some()
    }

    /// Every file belonging to this group with its variant: full, minified,
    /// then any extras.
    pub fn files(&self) -> impl Iterator<Item = (&str, Variant)> {
        self.full_variant
            .as_deref()
            .map(|f| (f, Variant::Full))
            .into_iter()
            .chain(self.min_variant.as_deref().map(|f| (f, Variant::Min)))
            .chain(self.extra_files.iter().map(|(f, v)| (f.as_str(), *v)))
    }
}
