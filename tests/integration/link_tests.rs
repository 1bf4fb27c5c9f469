use dupfind::duplicates::{DuplicateFinder, FileErrorKind, FinderConfig};
use dupfind::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn following() -> DuplicateFinder {
    DuplicateFinder::new(
        FinderConfig::default().with_walker_config(WalkerConfig::new(true, false, false)),
    )
}

#[test]
fn test_hardlinks_are_reported_as_duplicates() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let hardlink = dir.path().join("hardlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();

    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // Each directory entry is its own file path
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.summary.files_found, 2);
}

#[cfg(unix)]
#[test]
fn test_symlinks_not_followed_by_default() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let symlink = dir.path().join("symlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"content")
        .unwrap();
    std::os::unix::fs::symlink(&original, &symlink).unwrap();

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(report.duplicates.is_empty());
    assert_eq!(report.summary.files_found, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinks_followed_when_enabled() {
    let dir = tempdir().unwrap();
    let target_dir = dir.path().join("target");
    fs::create_dir(&target_dir).unwrap();
    File::create(target_dir.join("file.txt"))
        .unwrap()
        .write_all(b"content")
        .unwrap();
    std::os::unix::fs::symlink(&target_dir, dir.path().join("link")).unwrap();

    let report = following().scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    let group = &report.duplicates.groups()[0];
    assert!(group.contains(&target_dir.join("file.txt")));
    assert!(group.contains(&dir.path().join("link").join("file.txt")));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_detection() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    File::create(sub.join("file.txt"))
        .unwrap()
        .write_all(b"content")
        .unwrap();
    std::os::unix::fs::symlink(dir.path(), sub.join("back")).unwrap();

    let report = following().scan(dir.path()).unwrap();

    assert_eq!(report.summary.files_found, 1);
    assert!(report.duplicates.is_empty());
    assert!(report.errors.iter().any(|e| e.kind == FileErrorKind::Loop));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_ignored_by_default() {
    let dir = tempdir().unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling")).unwrap();

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(report.errors.is_empty());
    assert_eq!(report.summary.files_found, 0);
}
