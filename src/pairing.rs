//! Pairing detection: which files in a directory are the same logical image.
//!
//! Galleries ship two copies of most images: the original and a minified
//! copy for fast browsing. The copies share a stem, the minified one carrying
//! a marker suffix:
//!
//! ```text
//! sunset.jpg        → base "sunset", full variant
//! sunset-min.jpg    → base "sunset", minified variant
//! dawn-min.webp     → base "dawn",   minified variant (no original)
//! ```
//!
//! Grouping is a pure function of the filename set. Input order does not
//! matter: names are sorted before grouping, groups come back in base-name
//! order, and when two files compete for the same slot the first in name
//! order wins.

use crate::types::{ImageGroup, Variant};
use std::collections::BTreeMap;
use std::path::Path;

/// A single filename split into its pairing parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub base_name: String,
    pub variant: Variant,
    /// Extension without the dot, case preserved. Empty if there is none.
    pub extension: String,
}

/// Split a filename into base name, variant and extension.
///
/// - `"sunset.jpg"` → base `"sunset"`, `Full`, `"jpg"`
/// - `"sunset-min.JPG"` → base `"sunset"`, `Min`, `"JPG"`
/// - `"-min.jpg"` → base `""`, `Min`, `"jpg"`
pub fn parse_file(filename: &str, marker: &str) -> ParsedFile {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.strip_suffix(marker) {
        Some(base) if !marker.is_empty() => ParsedFile {
            base_name: base.to_string(),
            variant: Variant::Min,
            extension,
        },
        _ => ParsedFile {
            base_name: stem,
            variant: Variant::Full,
            extension,
        },
    }
}

/// Whether `filename` carries one of the allowed extensions (case-insensitive).
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .map(|e| {
            let ext = e.to_string_lossy();
            allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Partition filenames into [`ImageGroup`]s keyed by base name.
///
/// Callers filter by extension first; every name given here becomes part of
/// some group.
pub fn group_images<I, S>(filenames: I, marker: &str) -> Vec<ImageGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = filenames
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    names.sort();
    names.dedup();

    let mut groups: BTreeMap<String, ImageGroup> = BTreeMap::new();
    for name in names {
        let parsed = parse_file(&name, marker);
        let group = groups
            .entry(parsed.base_name.clone())
            .or_insert_with(|| ImageGroup {
                base_name: parsed.base_name.clone(),
                full_variant: None,
                min_variant: None,
                extension: String::new(),
                extra_files: Vec::new(),
            });

        let slot = match parsed.variant {
            Variant::Full => &mut group.full_variant,
            Variant::Min => &mut group.min_variant,
        };
        if slot.is_some() {
            tracing::debug!(file = %name, base = %parsed.base_name, "variant slot taken, recording as extra");
            group.extra_files.push((name, parsed.variant));
            continue;
        }
        *slot = Some(name);

        // Full variant's extension wins; the minified one only fills a gap.
        if parsed.variant == Variant::Full || group.full_variant.is_none() {
            group.extension = parsed.extension;
        }
    }

    groups.into_values().collect()
}
