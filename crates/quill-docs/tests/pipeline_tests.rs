use std::path::PathBuf;

use quill_config::CommentConfig;
use quill_docs::{FsStore, MemoryStore, Pipeline, PipelineOptions, SourceStore};

fn pipeline(dry_run: bool) -> Pipeline {
    Pipeline::new(&CommentConfig::default(), PipelineOptions { dry_run })
        .expect("default pipeline should build")
}

#[tokio::test]
async fn generate_writes_documented_files() {
    let store = MemoryStore::new();
    store.insert("a.ts", "function a() {}\n");
    store.insert("b.ts", "/** Done. */\nfunction b() {}\n");

    let files = vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")];
    let report = pipeline(false).generate(&files, &store).await;

    assert!(report.skipped.is_empty());
    assert_eq!(report.total_changes(), 1);
    assert_eq!(report.files_written(), 1);
    assert!(store.get("a.ts").unwrap().starts_with("/**\n"));
    assert_eq!(store.get("b.ts").unwrap(), "/** Done. */\nfunction b() {}\n");
}

#[tokio::test]
async fn dry_run_counts_without_writing() {
    let store = MemoryStore::new();
    store.insert("a.ts", "function a() {}\nfunction b() {}\n");

    let report = pipeline(true).generate(&[PathBuf::from("a.ts")], &store).await;

    assert_eq!(report.total_changes(), 2);
    assert_eq!(report.files_written(), 0);
    assert_eq!(store.get("a.ts").unwrap(), "function a() {}\nfunction b() {}\n");
}

#[tokio::test]
async fn failures_are_recorded_and_the_batch_continues() {
    let store = MemoryStore::new();
    store.insert("ok.ts", "const x = 1;\n");

    let files = vec![PathBuf::from("missing.ts"), PathBuf::from("ok.ts")];
    let report = pipeline(false).generate(&files, &store).await;

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("missing.ts"));
    assert_eq!(report.processed.len(), 1);
    assert!(report.processed[0].written);
}

#[tokio::test]
async fn clean_strips_garbage_comments() {
    let store = MemoryStore::new();
    store.insert("c.js", "// TODO\nconst a = 1; //\n/** keep me */\nconst b = 2;\n");

    let report = pipeline(false).clean(&[PathBuf::from("c.js")], &store).await;

    assert_eq!(report.total_changes(), 2);
    assert_eq!(
        store.get("c.js").unwrap(),
        "const a = 1;\n/** keep me */\nconst b = 2;\n"
    );
}

#[tokio::test]
async fn fs_store_writes_backups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.ts");
    std::fs::write(&path, "export function lib() {}\n").unwrap();

    let report = pipeline(false)
        .generate(std::slice::from_ref(&path), &FsStore::new(true))
        .await;

    assert_eq!(report.files_written(), 1);
    let backup = dir.path().join("lib.ts.bak");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "export function lib() {}\n"
    );
    let updated = std::fs::read_to_string(&path).unwrap();
    assert!(updated.contains("@example"));
    assert!(updated.ends_with("export function lib() {}\n"));
}

#[tokio::test]
async fn fs_store_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::default();
    let result = store.read(&dir.path().join("nope.ts")).await;
    assert!(matches!(result, Err(quill_docs::DocsError::NotFound { .. })));
}
