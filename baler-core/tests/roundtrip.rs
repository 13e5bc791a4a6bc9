use std::fs;
use std::path::{Path, PathBuf};

use baler_core::error::BalerError;
use baler_core::{Format, compress, decompress};
use walkdir::WalkDir;

const MIB: u64 = 1024 * 1024;

fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Relative path -> content for every regular file under `root`.
fn file_map(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            out.push((
                entry.path().strip_prefix(root).unwrap().to_path_buf(),
                fs::read(entry.path()).unwrap(),
            ));
        }
    }
    out.sort();
    out
}

fn artifact_paths(dir: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    out.sort();
    out
}

#[test]
fn roundtrip_preserves_tree() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("data");
    fs::create_dir(&source).unwrap();
    write_file(&source, "a.txt", b"hello");
    write_file(&source, "sub/b.bin", &patterned(300_000));
    write_file(&source, "sub/deeper/c", b"");
    fs::create_dir_all(source.join("hollow/inner")).unwrap();

    let dst = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    compress(&source, dst.path(), 1).unwrap();
    let artifacts = artifact_paths(dst.path());
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].file_name().unwrap(), "data.zip");

    decompress(dst.path(), out.path()).unwrap();
    assert_eq!(file_map(&source), file_map(out.path()));
    assert!(out.path().join("hollow/inner").is_dir());
}

#[test]
fn oversized_file_splits_across_capped_artifacts() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("big");
    fs::create_dir(&source).unwrap();
    let bytes = patterned(7 * MIB as usize);
    write_file(&source, "a.bin", &bytes);

    let dst = tempfile::tempdir().unwrap();
    compress(&source, dst.path(), 5).unwrap();

    let artifacts = artifact_paths(dst.path());
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].file_name().unwrap(), "big.part.0.zip");
    assert_eq!(artifacts[1].file_name().unwrap(), "big.part.1.zip");
    for artifact in &artifacts {
        assert!(fs::metadata(artifact).unwrap().len() <= 5 * MIB);
    }

    let out = tempfile::tempdir().unwrap();
    decompress(dst.path(), out.path()).unwrap();
    assert_eq!(fs::read(out.path().join("a.bin")).unwrap(), bytes);
}

#[test]
fn multi_chunk_tree_roundtrips() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("mixed");
    fs::create_dir(&source).unwrap();
    write_file(&source, "sub1/a.bin", &patterned(600 * 1024));
    write_file(&source, "sub1/b.bin", &patterned(600 * 1024));
    write_file(&source, "sub2/c.bin", &patterned(600 * 1024));
    write_file(&source, "d.txt", b"small");

    let dst = tempfile::tempdir().unwrap();
    compress(&source, dst.path(), 1).unwrap();

    let artifacts = artifact_paths(dst.path());
    assert!(artifacts.len() > 1);
    for artifact in &artifacts {
        let name = artifact.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("mixed.part."));
        assert!(name.ends_with(".zip"));
        assert!(fs::metadata(artifact).unwrap().len() <= MIB);
    }

    let out = tempfile::tempdir().unwrap();
    decompress(dst.path(), out.path()).unwrap();
    assert_eq!(file_map(&source), file_map(out.path()));
}

#[test]
fn zero_cap_emits_single_artifact() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("unbounded");
    fs::create_dir(&source).unwrap();
    write_file(&source, "a.bin", &patterned(2 * MIB as usize));
    write_file(&source, "b.bin", &patterned(2 * MIB as usize));

    let dst = tempfile::tempdir().unwrap();
    compress(&source, dst.path(), 0).unwrap();

    let artifacts = artifact_paths(dst.path());
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].file_name().unwrap(), "unbounded.zip");

    let out = tempfile::tempdir().unwrap();
    decompress(dst.path(), out.path()).unwrap();
    assert_eq!(file_map(&source), file_map(out.path()));
}

#[test]
fn decompress_into_prepopulated_destination() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("tree");
    fs::create_dir(&source).unwrap();
    write_file(&source, "sub/a.txt", b"payload");

    let dst = tempfile::tempdir().unwrap();
    compress(&source, dst.path(), 1).unwrap();

    let out = tempfile::tempdir().unwrap();
    fs::create_dir_all(out.path().join("sub")).unwrap();
    fs::write(out.path().join("keep.txt"), b"already here").unwrap();

    decompress(dst.path(), out.path()).unwrap();
    assert_eq!(fs::read(out.path().join("sub/a.txt")).unwrap(), b"payload");
    assert_eq!(
        fs::read(out.path().join("keep.txt")).unwrap(),
        b"already here"
    );
}

#[test]
fn decompress_without_artifacts_fails() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    fs::write(src.path().join("notes.txt"), b"not an archive").unwrap();

    let err = decompress(src.path(), dst.path()).unwrap_err();
    assert!(matches!(err, BalerError::EmptyInput(_)));
    assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
}

#[test]
fn missing_source_is_a_validation_error() {
    let dst = tempfile::tempdir().unwrap();
    let err = compress(Path::new("/nonexistent-baler-source"), dst.path(), 1).unwrap_err();
    assert!(matches!(err, BalerError::NotADirectory(_)));
}

#[test]
fn unsupported_format_fails_before_filesystem() {
    let err = Format::Rar.archiver().unwrap_err();
    assert!(matches!(err, BalerError::UnsupportedFormat(_)));
    let err = "7z".parse::<Format>().unwrap_err();
    assert!(matches!(err, BalerError::UnsupportedFormat(_)));
}

#[test]
fn empty_source_tree_emits_nothing() {
    let src = tempfile::tempdir().unwrap();
    let source = src.path().join("empty");
    fs::create_dir(&source).unwrap();

    let dst = tempfile::tempdir().unwrap();
    compress(&source, dst.path(), 1).unwrap();
    assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
}
