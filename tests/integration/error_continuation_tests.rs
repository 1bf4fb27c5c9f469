use dupfind::duplicates::{DuplicateFinder, FileErrorKind, FinderConfig, FinderError};
use dupfind::progress::ProgressCallback;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

/// Removes files named `gone*` between discovery and hashing.
struct RemoveOnDiscovery;

impl ProgressCallback for RemoveOnDiscovery {
    fn on_scan_start(&self, _root: &Path) {}

    fn on_file(&self, _current: usize, path: &Path) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.starts_with("gone") {
            fs::remove_file(path).unwrap();
        }
    }

    fn on_scan_end(&self, _files: usize) {}
}

#[cfg(unix)]
fn lock(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
}

#[cfg(unix)]
fn unlock(path: &std::path::Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_scan_continues_past_unreadable_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    fs::write(dir.path().join("b"), "dup").unwrap();
    let locked = [dir.path().join("locked1"), dir.path().join("locked2")];
    for path in &locked {
        fs::write(path, "secret").unwrap();
        lock(path);
    }

    // Privileged users can read regardless of mode bits.
    if fs::File::open(&locked[0]).is_ok() {
        return;
    }

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // Identical unreadable files must not form a group of their own
    assert_eq!(report.duplicates.len(), 1);
    assert!(report.duplicates.groups()[0].contains(&dir.path().join("a")));
    assert_eq!(report.errors.len(), 2);
    for path in &locked {
        assert!(report.errors.iter().any(|e| &e.path == path));
        assert!(!report.duplicates.iter().any(|g| g.contains(path)));
    }
}

#[cfg(unix)]
#[test]
fn test_scan_strict_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    let locked = dir.path().join("locked");
    fs::write(&locked, "secret").unwrap();
    lock(&locked);

    if fs::File::open(&locked).is_ok() {
        return;
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_strict(true));
    let err = finder.scan(dir.path()).unwrap_err();

    match err {
        FinderError::File(e) => {
            assert_eq!(e.path, locked);
            assert_eq!(e.kind, FileErrorKind::PermissionDenied);
        }
        other => panic!("expected a file error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    fs::write(dir.path().join("b"), "dup").unwrap();
    let sub = dir.path().join("no_access");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("inner"), "dup").unwrap();
    lock(&sub);

    let privileged = fs::read_dir(&sub).is_ok();
    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    unlock(&sub, 0o755);

    if privileged {
        return;
    }

    assert_eq!(report.duplicates.groups()[0].len(), 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, sub);
    assert_eq!(report.errors[0].kind, FileErrorKind::PermissionDenied);
}

#[test]
fn test_files_removed_mid_scan_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    fs::write(dir.path().join("b"), "dup").unwrap();
    let gone = [dir.path().join("gone1"), dir.path().join("gone2")];
    for path in &gone {
        fs::write(path, "same").unwrap();
    }

    let config = FinderConfig::default().with_progress_callback(Arc::new(RemoveOnDiscovery));
    let report = DuplicateFinder::new(config).scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    assert!(report.duplicates.groups()[0].contains(&dir.path().join("a")));
    assert_eq!(report.errors.len(), 2);
    for path in &gone {
        let error = report.errors.iter().find(|e| &e.path == path).unwrap();
        assert_eq!(error.kind, FileErrorKind::NotFound);
        assert!(!report.duplicates.iter().any(|g| g.contains(path)));
    }
}

#[test]
fn test_file_removed_mid_scan_fails_strict() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "dup").unwrap();
    let gone = dir.path().join("gone");
    fs::write(&gone, "data").unwrap();

    let config = FinderConfig::default()
        .with_strict(true)
        .with_progress_callback(Arc::new(RemoveOnDiscovery));
    let err = DuplicateFinder::new(config).scan(dir.path()).unwrap_err();

    match err {
        FinderError::File(e) => {
            assert_eq!(e.path, gone);
            assert_eq!(e.kind, FileErrorKind::NotFound);
        }
        other => panic!("expected a file error, got {other:?}"),
    }
}

#[test]
fn test_missing_root_fails_before_scanning() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = DuplicateFinder::with_defaults().scan(&missing).unwrap_err();

    assert!(matches!(err, FinderError::InvalidArgument(_)));
    assert!(err.to_string().ends_with("is not a directory"));
}
