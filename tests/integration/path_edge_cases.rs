use dupfind::duplicates::DuplicateFinder;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_paths_with_quotes() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        File::create(dir.path().join("file_with_\"quote\".txt"))
            .expect("Failed to create file with quotes")
            .write_all(b"content")
            .unwrap();
        File::create(dir.path().join("duplicate.txt"))
            .unwrap()
            .write_all(b"content")
            .unwrap();

        let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

        assert_eq!(report.duplicates.len(), 1);
        assert!(report.duplicates.groups()[0]
            .files
            .iter()
            .any(|p| p.to_string_lossy().contains('"')));
    }
}

#[test]
fn test_paths_with_newlines() {
    let dir = tempdir().unwrap();

    // Windows does not allow newlines in filenames.
    if cfg!(not(windows)) {
        File::create(dir.path().join("file_with\nnewline.txt"))
            .expect("Failed to create file with newline")
            .write_all(b"content")
            .unwrap();
        File::create(dir.path().join("duplicate.txt"))
            .unwrap()
            .write_all(b"content")
            .unwrap();

        let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

        assert_eq!(report.duplicates.len(), 1);
        assert!(report.duplicates.groups()[0]
            .files
            .iter()
            .any(|p| p.to_string_lossy().contains('\n')));
    }
}

#[test]
fn test_extremely_long_paths() {
    let dir = tempdir().unwrap();

    let mut current_path = dir.path().to_path_buf();
    let folder_name = "a".repeat(50);

    // 6 levels of 50-char folders = 300+ chars
    for i in 0..6 {
        current_path = current_path.join(format!("{}_{}", i, folder_name));
        if let Err(e) = fs::create_dir(&current_path) {
            eprintln!("Skipping extremely long path test: failed to create dir: {}", e);
            return;
        }
    }

    let file_path = current_path.join("file.txt");
    if let Err(e) = File::create(&file_path).and_then(|mut f| f.write_all(b"content")) {
        eprintln!("Skipping extremely long path test: failed to create file: {}", e);
        return;
    }

    File::create(dir.path().join("duplicate.txt"))
        .unwrap()
        .write_all(b"content")
        .unwrap();

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    assert!(report.duplicates.groups()[0].contains(&file_path));
}

#[test]
fn test_unicode_file_names() {
    let dir = tempdir().unwrap();
    let names = ["café.txt", "日本語.txt", "emoji_🎉.txt"];

    for name in names {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"content")
            .unwrap();
    }

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates.groups()[0].len(), names.len());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let odd = dir.path().join(OsStr::from_bytes(b"bad_\xff_name"));
    if File::create(&odd)
        .and_then(|mut f| f.write_all(b"content"))
        .is_err()
    {
        // Some filesystems insist on UTF-8 names
        return;
    }
    File::create(dir.path().join("plain"))
        .unwrap()
        .write_all(b"content")
        .unwrap();

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    assert!(report.duplicates.groups()[0].contains(&odd));
}
