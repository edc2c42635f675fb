//! # Wallpaper Gal
//!
//! Support tooling for a static wallpaper gallery. The gallery front end
//! reads one JSON manifest; this crate produces it and keeps the image
//! folders tidy.
//!
//! # Two Tools, One Primitive
//!
//! ```text
//! build    assets/wallpapers/*/  →  data/gallery_data.json   (scan + merge + write)
//! rename   assets/wallpapers/fall/  →  same folder, themed names
//! ```
//!
//! Both start from **pairing detection**: `sunset.jpg` and `sunset-min.jpg`
//! are two copies of one logical image. The builder turns each pair into a
//! manifest entry that displays the light copy and downloads the original;
//! the renamer moves both copies to the same new name.
//!
//! Both are single-pass and single-threaded. No locking is done: two runs
//! against the same folder or manifest race, and the last writer wins.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pairing`] | Groups filenames into full/minified pairs |
//! | [`types`] | `ImageGroup` and `Variant`, shared by both tools |
//! | [`naming`] | Titles, alt text and public URLs derived from names |
//! | [`scan`] | Lists collection folders and groups their images |
//! | [`manifest`] | Builds, merges and writes the gallery manifest |
//! | [`rename`] | Theme vocabulary, assignment policies, conflict-safe renames |
//! | [`store`] | `FileStore` trait: disk and in-memory implementations |
//! | [`config`] | `gallery.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Merge, Don't Regenerate
//!
//! A build never drops a collection it cannot see. Collections present in
//! the previous manifest but missing from the scan (folder deleted, moved
//! off the machine, emptied) are carried over untouched. Only collections
//! the scan actually produced replace their old version, and they replace
//! it wholesale.
//!
//! ## Deterministic Output
//!
//! Listings are sorted, groups are keyed by base name, and kept collections
//! keep their prior order. Rebuilding an unchanged tree rewrites the exact
//! same bytes, so the manifest diffs cleanly in version control.
//!
//! ## Filesystem Behind a Trait
//!
//! Every read, write and rename goes through [`store::FileStore`]. The
//! grouping, merge and rename rules are tested against
//! an in-memory store in unit tests, including injected rename failures.
//!
//! ## Injected Randomness
//!
//! The renamer shuffles its vocabulary once per run, but the shuffle happens
//! at the edge ([`rename::shuffled`]). [`rename::rename_folder`] takes the
//! word list as a plain argument, so tests pass an unshuffled or seeded one.

pub mod config;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod pairing;
pub mod rename;
pub mod scan;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
