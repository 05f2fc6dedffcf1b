//! Run orchestration.
//!
//! A run is: validate configuration, discover files under the root, then
//! read → rewrite → compare → write each file in discovery order. Discovery
//! failures abort the run. Anything that goes wrong with one file is recorded
//! against that file and the run moves on to the next one.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::config::MendConfig;
use crate::core::discovery::DiscoveryFilter;
use crate::core::errors::{MendError, Result};
use crate::core::rewriter::Rewriter;
use crate::core::store::SourceStore;

/// Execution switches that are not part of the persisted configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Classify and compare but never write
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewrite produced identical text; nothing written
    Unchanged,
    /// File was overwritten
    Fixed,
    /// File would be overwritten outside dry-run
    WouldFix,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    /// Whether the file changed
    pub status: FileStatus,
    /// Blocks wrapped in the macro
    pub blocks: usize,
    /// Blocks left alone by the continuation guard
    pub skipped: usize,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// File path
    pub path: PathBuf,
    /// Error message as reported on the console
    pub message: String,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Root that was walked
    pub root: PathBuf,
    /// Number of files discovery selected
    pub discovered: usize,
    /// Files changed (or that would change in dry-run), in processing order
    pub fixed: Vec<PathBuf>,
    /// Files that failed
    pub errors: Vec<FileFailure>,
    /// Blocks wrapped across all changed files
    pub blocks_rewritten: usize,
    /// Blocks left alone by the continuation guard
    pub blocks_skipped: usize,
    /// Whether writes were suppressed
    pub dry_run: bool,
}

impl RunSummary {
    /// Number of fixed files.
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }

    /// Whether any file changed or would change.
    pub fn has_changes(&self) -> bool {
        !self.fixed.is_empty()
    }
}

/// Receives progress as a run advances. All methods default to no-ops.
pub trait RunReporter {
    /// Discovery finished with `count` files.
    fn discovered(&mut self, _root: &Path, _count: usize) {}

    /// A file was (or would be) rewritten.
    fn fixed(&mut self, _path: &Path, _report: &FileReport) {}

    /// A file failed; the run continues.
    fn failed(&mut self, _path: &Path, _error: &MendError) {}

    /// The run is complete.
    fn finished(&mut self, _summary: &RunSummary) {}
}

impl RunReporter for () {}

/// Execute a full run against `store`.
pub fn run<S, R>(
    config: &MendConfig,
    options: RunOptions,
    store: &mut S,
    reporter: &mut R,
) -> Result<RunSummary>
where
    S: SourceStore + ?Sized,
    R: RunReporter + ?Sized,
{
    config.validate()?;

    let rewriter = Rewriter::new(&config.rewrite)?;
    let filter = DiscoveryFilter::from_config(&config.discovery)?;
    let root = config.discovery.root.as_path();

    let files = store.discover(root, &filter)?;
    info!("Found {} files to process under {}", files.len(), root.display());
    reporter.discovered(root, files.len());

    let mut summary = RunSummary {
        root: root.to_path_buf(),
        discovered: files.len(),
        dry_run: options.dry_run,
        ..RunSummary::default()
    };

    for path in files {
        match process_file(&mut *store, &rewriter, &path, options) {
            Ok(report) => {
                summary.blocks_skipped += report.skipped;
                if report.status == FileStatus::Unchanged {
                    continue;
                }
                summary.blocks_rewritten += report.blocks;
                reporter.fixed(&path, &report);
                summary.fixed.push(path);
            }
            Err(err) => {
                let err = MendError::processing(&path, err.detail());
                warn!("Error processing {}: {}", path.display(), err);
                reporter.failed(&path, &err);
                summary.errors.push(FileFailure {
                    path,
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        "Run complete: {} of {} files {}, {} errors",
        summary.fixed_count(),
        summary.discovered,
        if options.dry_run { "need fixing" } else { "fixed" },
        summary.errors.len()
    );
    reporter.finished(&summary);
    Ok(summary)
}

/// Read, rewrite and (unless dry-run) write back a single file.
pub fn process_file<S>(
    store: &mut S,
    rewriter: &Rewriter,
    path: &Path,
    options: RunOptions,
) -> Result<FileReport>
where
    S: SourceStore + ?Sized,
{
    let original = store.read(path)?;
    let rewrite = rewriter.rewrite(&original);

    let status = if rewrite.text == original {
        FileStatus::Unchanged
    } else if options.dry_run {
        FileStatus::WouldFix
    } else {
        store.write(path, &rewrite.text)?;
        FileStatus::Fixed
    };

    debug!(
        "{}: {:?} ({} blocks, {} skipped)",
        path.display(),
        status,
        rewrite.blocks,
        rewrite.skipped
    );

    Ok(FileReport {
        status,
        blocks: rewrite.blocks,
        skipped: rewrite.skipped,
    })
}
