//! Batch processing over a file set.
//!
//! Files are handled one after another; a failure is recorded against its
//! file and the batch moves on.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use quill_config::CommentConfig;
use rustc_hash::FxHashSet;

use crate::cleaner::CommentCleaner;
use crate::error::{DocsError, Result};
use crate::extractor::{AnalyzeOptions, CodeAnalyzer};
use crate::injector::{CommentInjector, InjectOptions};
use crate::parser::ParseOptions;
use crate::render::{build_comment_map, renderer_for, CommentRenderer};
use crate::resolver::TypeInference;

/// Raw text persistence used by the pipeline.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Full text of `path`. A missing file is [`DocsError::NotFound`].
    async fn read(&self, path: &Path) -> Result<String>;

    /// Replace the content of `path` with `text`.
    async fn write(&self, path: &Path, text: &str) -> Result<()>;
}

/// Files on disk, with optional `.bak` copies made before the first overwrite.
///
/// A file written twice through the same store keeps the backup of its
/// original content.
#[derive(Debug, Default)]
pub struct FsStore {
    create_backups: bool,
    backed_up: Mutex<FxHashSet<PathBuf>>,
}

impl FsStore {
    pub fn new(create_backups: bool) -> Self {
        Self {
            create_backups,
            backed_up: Mutex::default(),
        }
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SourceStore for FsStore {
    async fn read(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|error| DocsError::from_io(path.to_path_buf(), error))
    }

    async fn write(&self, path: &Path, text: &str) -> Result<()> {
        let first_write = self.create_backups && self.backed_up.lock().insert(path.to_path_buf());
        if first_write {
            let backup = Self::backup_path(path);
            tokio::fs::copy(path, &backup)
                .await
                .map_err(|error| DocsError::Io {
                    path: backup.clone(),
                    error,
                })?;
            tracing::debug!(backup = %backup.display(), "created backup");
        }
        tokio::fs::write(path, text)
            .await
            .map_err(|error| DocsError::Io {
                path: path.to_path_buf(),
                error,
            })
    }
}

/// In-memory files, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<IndexMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.write().insert(path.into(), text.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }
}

#[async_trait]
impl SourceStore for MemoryStore {
    async fn read(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| DocsError::NotFound {
            path: path.to_path_buf(),
        })
    }

    async fn write(&self, path: &Path, text: &str) -> Result<()> {
        self.insert(path, text);
        Ok(())
    }
}

/// Per-run switches that are not part of the comment configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Compute results without writing anything.
    pub dry_run: bool,
}

/// A file that was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Comments inserted or removed.
    pub changes: usize,
    /// Whether new content was written.
    pub written: bool,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: Vec<FileOutcome>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn total_changes(&self) -> usize {
        self.processed.iter().map(|outcome| outcome.changes).sum()
    }

    pub fn files_written(&self) -> usize {
        self.processed.iter().filter(|outcome| outcome.written).count()
    }

    fn record(&mut self, path: &Path, result: Result<FileOutcome>) {
        match result {
            Ok(outcome) => self.processed.push(outcome),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping file");
                self.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Extraction → rendering → injection, or cleaning, over many files.
pub struct Pipeline {
    analyzer: CodeAnalyzer,
    renderer: Box<dyn CommentRenderer>,
    include_members: bool,
    cleaner: CommentCleaner,
    options: PipelineOptions,
}

impl Pipeline {
    /// Build a pipeline from configuration. Renderer construction errors abort here.
    pub fn new(config: &CommentConfig, options: PipelineOptions) -> Result<Self> {
        let analyzer = CodeAnalyzer::new(AnalyzeOptions {
            type_inference: TypeInference::from_enabled(config.infer_types),
        });
        Ok(Self::from_parts(
            analyzer,
            renderer_for(config)?,
            config.include_members,
            options,
        ))
    }

    pub fn from_parts(
        analyzer: CodeAnalyzer,
        renderer: Box<dyn CommentRenderer>,
        include_members: bool,
        options: PipelineOptions,
    ) -> Self {
        Self {
            analyzer,
            renderer,
            include_members,
            cleaner: CommentCleaner::new(),
            options,
        }
    }

    /// Insert generated comments into every file.
    pub async fn generate(&self, files: &[PathBuf], store: &dyn SourceStore) -> BatchReport {
        let mut report = BatchReport::default();
        for path in files {
            let result = self.generate_file(path, store).await;
            report.record(path, result);
        }
        report
    }

    /// Strip garbage comments from every file.
    pub async fn clean(&self, files: &[PathBuf], store: &dyn SourceStore) -> BatchReport {
        let mut report = BatchReport::default();
        for path in files {
            let result = self.clean_file(path, store).await;
            report.record(path, result);
        }
        report
    }

    async fn generate_file(&self, path: &Path, store: &dyn SourceStore) -> Result<FileOutcome> {
        let source = store.read(path).await?;
        let analysis = self.analyzer.analyze_source(path, &source)?;
        let comments = build_comment_map(&analysis, self.renderer.as_ref());

        let injector = CommentInjector::new(InjectOptions {
            parse: ParseOptions::from_path(path),
            include_members: self.include_members,
            ..Default::default()
        });
        let (updated, inserted) = injector.inject_counted(&source, &comments)?;
        tracing::debug!(
            path = %path.display(),
            entities = analysis.entity_count(),
            inserted,
            "generated comments"
        );

        self.finish(path, store, &source, updated, inserted).await
    }

    async fn clean_file(&self, path: &Path, store: &dyn SourceStore) -> Result<FileOutcome> {
        let source = store.read(path).await?;
        let cleaned = self.cleaner.clean(&source);
        tracing::debug!(path = %path.display(), removed = cleaned.removed, "cleaned comments");

        self.finish(path, store, &source, cleaned.text, cleaned.removed)
            .await
    }

    async fn finish(
        &self,
        path: &Path,
        store: &dyn SourceStore,
        original: &str,
        updated: String,
        changes: usize,
    ) -> Result<FileOutcome> {
        let written = updated != original && !self.options.dry_run;
        if written {
            store.write(path, &updated).await?;
        }
        Ok(FileOutcome {
            path: path.to_path_buf(),
            changes,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        store.write(Path::new("a.ts"), "x").await.unwrap();
        assert_eq!(store.read(Path::new("a.ts")).await.unwrap(), "x");
        assert!(matches!(
            store.read(Path::new("b.ts")).await,
            Err(DocsError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn backup_keeps_original_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ts");
        std::fs::write(&path, "v1").unwrap();

        let store = FsStore::new(true);
        store.write(&path, "v2").await.unwrap();
        store.write(&path, "v3").await.unwrap();

        let backup = std::fs::read_to_string(FsStore::backup_path(&path)).unwrap();
        assert_eq!(backup, "v1");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v3");
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            FsStore::backup_path(Path::new("src/a.ts")),
            PathBuf::from("src/a.ts.bak")
        );
    }
}
