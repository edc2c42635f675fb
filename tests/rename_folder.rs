//! End-to-end renames against a real directory.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wallpaper_gal::config::GalleryConfig;
use wallpaper_gal::rename::{self, FALL_WORDS, Policy, RenameError, RenameOptions};
use wallpaper_gal::store::DiskStore;

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn pairs(dir: &Path, count: usize) {
    for i in 0..count {
        fs::write(dir.join(format!("IMG_{i:04}.jpg")), format!("full {i}")).unwrap();
        fs::write(dir.join(format!("IMG_{i:04}-min.jpg")), format!("min {i}")).unwrap();
    }
}

fn vocabulary() -> Vec<String> {
    FALL_WORDS.iter().map(|w| w.to_string()).collect()
}

fn options() -> RenameOptions {
    RenameOptions::from_config(&GalleryConfig::default())
}

#[test]
fn three_pairs_three_words_pairs_kept() {
    let tmp = TempDir::new().unwrap();
    pairs(tmp.path(), 3);

    let words = rename::shuffled(&vocabulary(), &mut StdRng::seed_from_u64(1));
    let report = rename::rename_folder(&DiskStore, tmp.path(), &options(), words).unwrap();

    let bases: HashSet<&str> = report.groups.iter().map(|g| g.new_base.as_str()).collect();
    assert_eq!(bases.len(), 3);
    assert_eq!(report.renamed_count(), 6);

    for group in &report.groups {
        let full = tmp.path().join(format!("{}.jpg", group.new_base));
        let min = tmp.path().join(format!("{}-min.jpg", group.new_base));
        let i = group.old_base.trim_start_matches("IMG_").parse::<usize>().unwrap();
        assert_eq!(fs::read_to_string(full).unwrap(), format!("full {i}"));
        assert_eq!(fs::read_to_string(min).unwrap(), format!("min {i}"));
    }
}

#[test]
fn forty_pairs_fall_back_to_numbered_words() {
    let tmp = TempDir::new().unwrap();
    pairs(tmp.path(), 40);

    let report = rename::rename_folder(&DiskStore, tmp.path(), &options(), vocabulary()).unwrap();

    let names = names_in(tmp.path());
    assert_eq!(names.len(), 80);
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), 80);

    let bases: Vec<&str> = report.groups.iter().map(|g| g.new_base.as_str()).collect();
    assert_eq!(&bases[36..], &["autumn-1", "harvest-1", "pumpkin-1", "maple-1"]);
    assert!(names.contains(&"maple-1-min.jpg".to_string()));
}

#[test]
fn prefix_and_extension_normalization() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("DSC_1.JPEG"), "x").unwrap();
    fs::write(tmp.path().join("DSC_1-min.jpeg"), "x").unwrap();
    fs::write(tmp.path().join("cover.png"), "x").unwrap();

    let opts = options().with_prefix(Some("fall".to_string()));
    rename::rename_folder(&DiskStore, tmp.path(), &opts, vec!["cider".to_string()]).unwrap();

    assert_eq!(
        names_in(tmp.path()),
        vec!["cover.png", "fall-cider-min.jpg", "fall-cider.jpg"]
    );
}

#[test]
fn cycle_policy_never_overwrites() {
    let tmp = TempDir::new().unwrap();
    pairs(tmp.path(), 3);

    let opts = options().with_policy(Policy::Cycle);
    let words = vec!["maple".to_string(), "cider".to_string()];
    rename::rename_folder(&DiskStore, tmp.path(), &opts, words).unwrap();

    let names = names_in(tmp.path());
    assert_eq!(names.len(), 6);
    assert!(names.contains(&"maple_1.jpg".to_string()));
    assert!(names.contains(&"maple-min_1.jpg".to_string()));
}

#[test]
fn missing_folder_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let result = rename::rename_folder(
        &DiskStore,
        &tmp.path().join("missing"),
        &options(),
        vocabulary(),
    );
    assert!(matches!(result, Err(RenameError::FolderNotFound(_))));
}

#[test]
fn folder_without_jpegs_is_left_alone() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.png"), "x").unwrap();
    fs::write(tmp.path().join("b.webp"), "x").unwrap();

    let report = rename::rename_folder(&DiskStore, tmp.path(), &options(), vocabulary()).unwrap();
    assert!(report.is_empty());
    assert_eq!(names_in(tmp.path()), vec!["a.png", "b.webp"]);
}

#[cfg(unix)]
#[test]
fn dangling_link_does_not_stop_the_run() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("IMG_1.jpg"), "x").unwrap();
    std::os::unix::fs::symlink(tmp.path().join("nowhere"), tmp.path().join("stale-link.txt"))
        .unwrap();

    let report = rename::rename_folder(
        &DiskStore,
        tmp.path(),
        &options(),
        vec!["maple".to_string()],
    )
    .unwrap();

    assert_eq!(report.renamed_count(), 1);
    assert_eq!(names_in(tmp.path()), vec!["maple.jpg", "stale-link.txt"]);
}
