//! CLI output formatting.
//!
//! Output is information-first: each entity leads with its positional index
//! and name, details follow on indented lines. Nothing here is a
//! machine-readable contract.
//!
//! ## Build
//!
//! ```text
//! Prior manifest
//!     Loaded 2 collections from ../data/gallery_data.json
//! Collections
//! 001 Cityscapes (3 images)
//! 002 Nature (12 images)
//! 003 Winter (4 images, kept from prior manifest)
//! Skipped
//!     Drafts/ (no images)
//!
//! Wrote 3 collections, 19 images → ../data/gallery_data.json
//! ```
//!
//! ## Rename
//!
//! ```text
//! 001 IMG_0046 → maple
//!     IMG_0046.jpg → maple.jpg
//!     IMG_0046-min.jpg → maple-min.jpg
//! 002 IMG_0047 → cider
//!     IMG_0047.jpg → cider.jpg (failed: permission denied)
//!
//! Renamed 2 files in 2 groups, 1 failed
//! ```
//!
//! Each `format_*` function is pure and returns lines; `print_*` writes them
//! to stdout.

use crate::manifest::{BuildReport, Origin, PriorStatus};
use crate::rename::{FileOutcome, RenameReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of a build or check run.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let path = report.output_path.display();

    lines.push("Prior manifest".to_string());
    lines.push(match &report.prior {
        PriorStatus::Missing => format!("{}None at {path}, creating a new one", indent(1)),
        PriorStatus::Loaded { collections } => format!(
            "{}Loaded {} from {path}",
            indent(1),
            plural(*collections, "collection", "collections")
        ),
        PriorStatus::Invalid { reason } => {
            format!("{}Invalid ({reason}), starting fresh", indent(1))
        }
    });

    lines.push("Collections".to_string());
    if report.collections.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, c) in report.collections.iter().enumerate() {
        let count = plural(c.image_count, "image", "images");
        lines.push(match c.origin {
            Origin::Scanned => format!("{} {} ({count})", format_index(i + 1), c.name),
            Origin::Kept => format!(
                "{} {} ({count}, kept from prior manifest)",
                format_index(i + 1),
                c.name
            ),
        });
    }

    if !report.skipped_empty.is_empty() {
        lines.push("Skipped".to_string());
        for name in &report.skipped_empty {
            lines.push(format!("{}{name}/ (no images)", indent(1)));
        }
    }

    lines.push(String::new());
    let summary = format!(
        "{}, {}",
        plural(report.manifest.len(), "collection", "collections"),
        plural(report.manifest.image_count(), "image", "images")
    );
    lines.push(if report.written {
        format!("Wrote {summary} \u{2192} {path}")
    } else {
        format!("Would write {summary} \u{2192} {path}")
    });
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Rename
// ============================================================================

/// Format the result of a rename run.
pub fn format_rename_output(report: &RenameReport) -> Vec<String> {
    if report.is_empty() {
        return vec![format!(
            "No matching images in {}",
            report.folder.display()
        )];
    }

    let mut lines = Vec::new();
    for (i, group) in report.groups.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            group.old_base,
            group.new_base
        ));
        for file in &group.files {
            lines.push(match file {
                FileOutcome::Renamed { from, to } => format!("{}{from} \u{2192} {to}", indent(1)),
                FileOutcome::Unchanged { name } => format!("{}{name} (unchanged)", indent(1)),
                FileOutcome::Failed { from, to, error } => {
                    format!("{}{from} \u{2192} {to} (failed: {error})", indent(1))
                }
            });
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Renamed {} in {}",
        plural(report.renamed_count(), "file", "files"),
        plural(report.groups.len(), "group", "groups")
    );
    let failed = report.failed_count();
    if failed > 0 {
        summary.push_str(&format!(", {failed} failed"));
    }
    lines.push(summary);
    lines
}

/// Print rename output to stdout.
pub fn print_rename_output(report: &RenameReport) {
    for line in format_rename_output(report) {
        println!("{}", line);
    }
}
