use super::super::*;
use crate::core::{resolve, KeyId};
use std::{fs, path::PathBuf, sync::Arc, thread};
use tempfile::TempDir;

/// Helper: Creates a temporary layout file for testing.
fn create_test_layout(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let layout_path = temp_dir.path().join("layout.cfg");
    fs::write(&layout_path, content).unwrap();
    (temp_dir, layout_path)
}

fn key(name: &str) -> KeyId {
    name.parse().unwrap()
}

#[test]
fn test_open_layout_file() {
    let (_temp_dir, layout_path) = create_test_layout("# Test layout\nLP a\nLPR e\n");

    let session = LayoutSession::open(&layout_path).unwrap();
    assert_eq!(session.snapshot().len(), 2);
    assert_eq!(session.source(), Some(layout_path.as_path()));
}

#[test]
fn test_open_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.cfg");

    assert!(matches!(
        LayoutSession::open(&missing),
        Err(LayoutError::NotFound(path)) if path == missing
    ));
}

#[test]
fn test_open_reports_parse_error() {
    let (_temp_dir, layout_path) = create_test_layout("LP a\nLP RP b\n");

    assert!(matches!(
        LayoutSession::open(&layout_path),
        Err(LayoutError::Parse(e)) if e.line() == 2
    ));
}

#[test]
fn test_bom_is_stripped() {
    let (_temp_dir, layout_path) = create_test_layout("\u{feff}LP a\n");

    let config = load_layout(&layout_path).unwrap();
    assert_eq!(config.len(), 1);
    assert_eq!(config.chords()[0].output, "a");
}

#[test]
fn test_snapshot_survives_reload() {
    let session = LayoutSession::from_text("LP old").unwrap();
    let before = session.snapshot();

    let after = session.reload("LP new").unwrap();

    // The old snapshot is untouched; new readers see the new layout
    assert_eq!(before.chords()[0].output, "old");
    assert_eq!(after.chords()[0].output, "new");
    assert!(Arc::ptr_eq(&after, &session.snapshot()));
}

#[test]
fn test_failed_reload_keeps_previous_layout() {
    let session = LayoutSession::from_text("LP a").unwrap();

    assert!(session.reload("LPP broken").is_err());
    assert_eq!(session.snapshot().chords()[0].output, "a");
}

#[test]
fn test_reload_from_source() {
    let (_temp_dir, layout_path) = create_test_layout("LP a\n");
    let session = LayoutSession::open(&layout_path).unwrap();

    fs::write(&layout_path, "LP a\nRP b\n").unwrap();
    let config = session.reload_from_source().unwrap();

    assert_eq!(config.len(), 2);
}

#[test]
fn test_reload_without_source() {
    let session = LayoutSession::from_text("LP a").unwrap();
    assert!(matches!(session.reload_from_source(), Err(LayoutError::NoSource)));
}

#[test]
fn test_concurrent_readers() {
    let session = Arc::new(LayoutSession::from_text("LP a\nLPR b\n").unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for _ in 0..100 {
                    let config = session.snapshot();
                    let preview = resolve(&config, [key("LP")]).unwrap();
                    // Either layout resolves LR to something; never a torn state
                    assert!(preview[key("LR").index()].is_some());
                }
            })
        })
        .collect();

    for i in 0..50 {
        session.reload(&format!("LP a\nLPR b{}\n", i)).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_write_atomic() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("export.json");

    write_atomic(&out, "first").unwrap();
    write_atomic(&out, "second").unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "second");
}

#[test]
fn test_expand_path_without_tilde() {
    let path = PathBuf::from("/tmp/layout.cfg");
    assert_eq!(expand_path(&path).unwrap(), path);
}
