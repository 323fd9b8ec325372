use std::fs;
use std::path::{Path, PathBuf};

use fragpatch::{canonicalize_or_current, default_log_filter};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().expect("utf8 path")).expect("canonicalize");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path_with_cwd() {
    let result = canonicalize_or_current("does-not-exist-yet").expect("canonicalize");
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(result, cwd.join(Path::new("does-not-exist-yet")));
}

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let result: PathBuf = canonicalize_or_current(".").expect("canonicalize");
    assert_eq!(result, std::env::current_dir().expect("cwd"));
}

#[test]
fn verbose_log_filter_enables_debug_for_both_crates() {
    let filter = default_log_filter(true);
    assert!(filter.contains("fragpatch=debug"));
    assert!(filter.contains("fragpatch_core=debug"));
    assert_eq!(default_log_filter(false), "warn");
}
