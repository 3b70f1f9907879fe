//! Sequential execution of planned operations.
//!
//! Operations are applied strictly in list order, one at a time: metadata
//! planning already resolved collisions sequentially, and concurrent link
//! creation against one destination would race. A failing operation is
//! reported and the batch continues; the only way a batch stops early is
//! cooperative cancellation, checked between operations. Completed links
//! are never rolled back.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::planner::{LinkType, Operation};

/// Observer for execution progress and messages.
///
/// The executor reports through this trait only; whether messages go to a
/// console, a log file, or nowhere is decided by the implementation the
/// caller supplies (see [`crate::output::for_mode`]). A message goes to
/// exactly one destination.
pub trait Reporter {
    /// Called after each operation with the running count and the total.
    fn on_progress(&mut self, done: usize, total: usize);
    /// Called once per operation with its outcome message.
    fn on_message(&mut self, text: &str);
}

/// Execution settings for a batch.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Describe every operation without touching the filesystem.
    pub dry_run: bool,
    /// Checked between operations; when set, the batch stops early.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ExecuteOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

/// Outcome summary of one executed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of operations in the batch.
    pub total: usize,
    /// Operations that completed (in dry-run mode: were described).
    pub completed: usize,
    /// Operations that hit a filesystem error.
    pub failed: usize,
    /// True if the batch was cancelled before reaching the end.
    pub cancelled: bool,
}

impl ExecutionReport {
    /// Number of operations never attempted due to cancellation.
    pub fn skipped(&self) -> usize {
        self.total - self.completed - self.failed
    }
}

/// Executes a batch of operations in order.
///
/// Each operation creates its destination's parent directories
/// (idempotently) and performs the link action. Filesystem errors are
/// caught per operation, turned into a message, and counted as failed;
/// they never abort the batch. In dry-run mode the filesystem is not
/// touched at all and every operation produces a descriptive message.
pub fn execute(
    operations: &[Operation],
    options: &ExecuteOptions,
    reporter: &mut dyn Reporter,
) -> ExecutionReport {
    let total = operations.len();
    let mut report = ExecutionReport {
        total,
        completed: 0,
        failed: 0,
        cancelled: false,
    };

    for (index, operation) in operations.iter().enumerate() {
        if options.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let message = if options.dry_run {
            report.completed += 1;
            format!(
                "Dry run: would create {} from '{}' to '{}'",
                operation.link_type,
                operation.source.display(),
                operation.destination.display()
            )
        } else {
            match apply(operation) {
                Ok(()) => {
                    report.completed += 1;
                    format!(
                        "Created {} from '{}' to '{}'",
                        operation.link_type,
                        operation.source.display(),
                        operation.destination.display()
                    )
                }
                Err(e) => {
                    report.failed += 1;
                    format!(
                        "Error creating {} from '{}' to '{}': {}",
                        operation.link_type,
                        operation.source.display(),
                        operation.destination.display(),
                        e
                    )
                }
            }
        };

        reporter.on_progress(index + 1, total);
        reporter.on_message(&message);
    }

    report
}

/// Creates the destination's parent directories and performs the link.
fn apply(operation: &Operation) -> io::Result<()> {
    if let Some(parent) = operation.destination.parent() {
        // Idempotent: an already existing tree is success.
        fs::create_dir_all(parent)?;
    }

    match operation.link_type {
        LinkType::Hardlink => fs::hard_link(&operation.source, &operation.destination),
        LinkType::Symlink => symlink_file(&operation.source, &operation.destination),
    }
}

#[cfg(unix)]
fn symlink_file(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, destination)
}

#[cfg(windows)]
fn symlink_file(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, destination)
}
