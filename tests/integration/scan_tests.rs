use dupfind::duplicates::{DuplicateFinder, FinderConfig};
use dupfind::scanner::{HashAlgorithm, WalkerConfig};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
    path.to_path_buf()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let report = finder.scan(dir.path()).unwrap();

    assert!(report.duplicates.is_empty());
    assert!(report.errors.is_empty());
    assert_eq!(report.summary.files_found, 0);
    assert_eq!(report.summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"content a");
    write_file(&dir.path().join("b.txt"), b"content b");
    write_file(&dir.path().join("c.txt"), b"content c");

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert!(report.duplicates.is_empty());
    assert_eq!(report.summary.files_hashed, 3);
    assert_eq!(report.summary.unique_fingerprints, 3);
}

#[test]
fn test_scan_reference_scenario() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir.path().join("a.txt"), b"hello");
    let b = write_file(&dir.path().join("b").join("b.txt"), b"hello");
    let c = write_file(&dir.path().join("c.txt"), b"world");
    let d = write_file(&dir.path().join("d").join("e").join("d.txt"), b"hello");

    let duplicates = dupfind::scan(dir.path()).unwrap();

    assert_eq!(duplicates.len(), 1);
    let group = &duplicates.groups()[0];
    let members: BTreeSet<PathBuf> = group.files.iter().cloned().collect();
    assert_eq!(members, BTreeSet::from([a, b, d]));
    assert!(!duplicates.iter().any(|g| g.contains(&c)));
}

#[test]
fn test_scan_multiple_groups() {
    let dir = tempdir().unwrap();
    for name in ["x1", "x2"] {
        write_file(&dir.path().join(name), b"xxx");
    }
    for name in ["y1", "y2", "y3"] {
        write_file(&dir.path().join("sub").join(name), b"yyy");
    }
    write_file(&dir.path().join("z"), b"zzz");

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    let mut sizes: Vec<usize> = report.duplicates.iter().map(|g| g.len()).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3]);
    assert_eq!(report.summary.duplicate_files, 3);
    assert_eq!(report.summary.reclaimable_space, 3 + 3 * 2);
}

#[test]
fn test_scan_one_byte_difference_splits_groups() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a"), b"abcdef");
    write_file(&dir.path().join("b"), b"abcdef");
    write_file(&dir.path().join("c"), b"abcdeg");

    let report = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates.groups()[0].len(), 2);
    assert!(!report.duplicates.groups()[0].contains(&dir.path().join("c")));
}

#[test]
fn test_scan_is_repeatable() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        write_file(
            &dir.path().join(format!("d{}", i % 4)).join(format!("f{}", i)),
            format!("{}", i % 5).as_bytes(),
        );
    }

    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(false, false, true));
    let finder = DuplicateFinder::new(config);
    let first = finder.scan(dir.path()).unwrap();
    let second = finder.scan(dir.path()).unwrap();

    assert_eq!(first.duplicates, second.duplicates);
    assert_eq!(first.duplicates.len(), 5);
}

#[test]
fn test_index_covers_every_regular_file() {
    let dir = tempdir().unwrap();
    let mut expected = BTreeSet::new();
    for (i, name) in ["a", "b/c", "b/d/e", "f/g/h/i", "j"].iter().enumerate() {
        expected.insert(write_file(&dir.path().join(name), &[i as u8 % 2]));
    }

    let scan = DuplicateFinder::with_defaults().index(dir.path()).unwrap();

    let indexed: BTreeSet<PathBuf> = scan
        .index
        .iter()
        .flat_map(|(_, files)| files.iter().cloned())
        .collect();
    assert_eq!(indexed, expected);
    assert_eq!(scan.index.file_count(), 5);
    assert_eq!(scan.index.len(), 2);
}

#[test]
fn test_scan_with_each_algorithm_agrees_on_grouping() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a"), b"one");
    write_file(&dir.path().join("b"), b"one");
    write_file(&dir.path().join("c"), b"two");

    for algorithm in HashAlgorithm::ALL {
        let config = FinderConfig::default()
            .with_algorithm(algorithm)
            .with_buffer_size(2);
        let report = DuplicateFinder::new(config).scan(dir.path()).unwrap();

        assert_eq!(report.duplicates.len(), 1, "{algorithm}");
        assert_eq!(report.summary.algorithm, algorithm);
    }
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("visible"), b"same");
    write_file(&dir.path().join(".hidden"), b"same");
    write_file(&dir.path().join(".git").join("object"), b"same");

    let lenient = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    assert_eq!(lenient.duplicates.groups()[0].len(), 3);

    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(false, true, false));
    let report = DuplicateFinder::new(config).scan(dir.path()).unwrap();
    assert!(report.duplicates.is_empty());
    assert_eq!(report.summary.files_found, 1);
}
