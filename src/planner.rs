//! Planning strategies that turn discovered files into operation lists.
//!
//! Three independent strategies share the [`Operation`] record shape:
//! by modification date (`year/month` folders), by type category (via the
//! [taxonomy](crate::taxonomy)), and by externally supplied metadata (with
//! deterministic numeric-suffix collision resolution).
//!
//! The by-date and by-type strategies intentionally do not resolve
//! basename collisions: two distinct files that share a basename and land
//! in the same folder plan to the same destination. This mirrors the
//! original behavior and is pinned by tests rather than silently changed.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::taxonomy::Taxonomy;

/// How a planned operation materializes the file at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Hardlink,
    Symlink,
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Hardlink => write!(f, "hardlink"),
            LinkType::Symlink => write!(f, "symlink"),
        }
    }
}

/// Selects the link type for a source/destination pair.
///
/// Currently always [`LinkType::Hardlink`]. The signature leaves room for
/// per-filesystem policies, e.g. falling back to a symlink when source and
/// destination live on different devices.
pub fn choose_link_type(_source: &Path, _destination: &Path) -> LinkType {
    LinkType::Hardlink
}

/// A single planned link operation.
///
/// Operations are immutable value records: created once by a planner,
/// optionally displayed or exported, optionally executed, then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    /// Absolute path of the existing source file.
    pub source: PathBuf,
    /// Absolute path the file will be linked to.
    pub destination: PathBuf,
    /// The action used to materialize the destination.
    pub link_type: LinkType,
    /// Destination folder, for preview display (metadata planning only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    /// Final file name after collision resolution (metadata planning only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_file_name: Option<String>,
}

impl Operation {
    fn new(source: PathBuf, destination: PathBuf) -> Self {
        let link_type = choose_link_type(&source, &destination);
        Self {
            source,
            destination,
            link_type,
            folder_name: None,
            new_file_name: None,
        }
    }
}

/// Errors that can occur while planning operations.
#[derive(Debug)]
pub enum PlanError {
    /// A source file's metadata could not be read at plan time.
    SourceMetadata {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceMetadata { path, source } => {
                write!(f, "Failed to read metadata for {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// One externally classified file, input to [`plan_by_metadata`].
///
/// The `filename_stem` is expected to have already passed through
/// [`sanitize`](crate::sanitize::sanitize).
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    /// Path of the source file.
    pub file_path: PathBuf,
    /// Destination folder relative to the output root.
    pub folder_name: String,
    /// Sanitized stem for the destination file name, without extension.
    pub filename_stem: String,
}

/// Collision-tracking state for one logical planning session.
///
/// Owns the set of already-processed source paths (making repeated input
/// records idempotent) and the set of already-allocated destinations (so
/// the numeric-suffix counter continues across repeated planning calls
/// within the session). Sessions are independent: two sessions never share
/// state unless the caller shares the value.
#[derive(Debug, Default)]
pub struct PlanningSession {
    processed_sources: HashSet<PathBuf>,
    allocated_destinations: HashSet<PathBuf>,
}

impl PlanningSession {
    /// Creates a fresh session with empty tracking sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a source path was already planned in this session.
    pub fn is_processed(&self, path: &Path) -> bool {
        self.processed_sources.contains(path)
    }

    /// Number of destinations allocated so far in this session.
    pub fn allocated_count(&self) -> usize {
        self.allocated_destinations.len()
    }
}

/// Plans operations that organize files into `year/month` folders.
///
/// The month folder uses the full English month name (e.g. `January`).
/// Fails if any source's modification time cannot be read: sources must
/// exist at plan time.
pub fn plan_by_date(file_paths: &[PathBuf], output_path: &Path) -> PlanResult<Vec<Operation>> {
    let mut operations = Vec::with_capacity(file_paths.len());

    for file_path in file_paths {
        let modified = fs::metadata(file_path)
            .and_then(|meta| meta.modified())
            .map_err(|e| PlanError::SourceMetadata {
                path: file_path.clone(),
                source: e,
            })?;
        let modified: DateTime<Local> = modified.into();

        let year = modified.format("%Y").to_string();
        let month = modified.format("%B").to_string();

        let destination = output_path
            .join(year)
            .join(month)
            .join(basename(file_path));
        operations.push(Operation::new(file_path.clone(), destination));
    }

    Ok(operations)
}

/// Plans operations that organize files into type-category folders.
///
/// Hidden files are skipped entirely. Classification is delegated to the
/// shared [`Taxonomy`].
pub fn plan_by_type(file_paths: &[PathBuf], output_path: &Path) -> Vec<Operation> {
    let taxonomy = Taxonomy::global();
    let mut operations = Vec::new();

    for file_path in file_paths {
        let Some(folder) = taxonomy.classify(file_path) else {
            continue;
        };

        let destination = output_path.join(folder).join(basename(file_path));
        operations.push(Operation::new(file_path.clone(), destination));
    }

    operations
}

/// Plans operations from externally supplied metadata records.
///
/// Each record maps a source file to a destination folder and a sanitized
/// file stem; the source's own extension is preserved. Records whose
/// source was already processed in this session are skipped. Destination
/// collisions are resolved by appending `_1`, `_2`, ... to the stem until
/// the candidate is free; every allocation is recorded in the session
/// before the next record is considered, so resolution is sequential and
/// deterministic, and the counter continues across calls sharing the
/// session.
pub fn plan_by_metadata(
    records: &[MetadataRecord],
    output_path: &Path,
    session: &mut PlanningSession,
) -> Vec<Operation> {
    let mut operations = Vec::new();

    for record in records {
        if session.processed_sources.contains(&record.file_path) {
            continue;
        }
        session.processed_sources.insert(record.file_path.clone());

        let extension = record
            .file_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let dir_path = output_path.join(&record.folder_name);
        let mut new_file_name = format!("{}{}", record.filename_stem, extension);
        let mut destination = dir_path.join(&new_file_name);

        let mut counter = 1;
        while session.allocated_destinations.contains(&destination) {
            new_file_name = format!("{}_{}{}", record.filename_stem, counter, extension);
            destination = dir_path.join(&new_file_name);
            counter += 1;
        }
        session.allocated_destinations.insert(destination.clone());

        let mut operation = Operation::new(record.file_path.clone(), destination);
        operation.folder_name = Some(record.folder_name.clone());
        operation.new_file_name = Some(new_file_name);
        operations.push(operation);
    }

    operations
}

fn basename(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, folder: &str, stem: &str) -> MetadataRecord {
        MetadataRecord {
            file_path: PathBuf::from(path),
            folder_name: folder.to_string(),
            filename_stem: stem.to_string(),
        }
    }

    #[test]
    fn test_choose_link_type_is_hardlink() {
        assert_eq!(
            choose_link_type(Path::new("/a"), Path::new("/b")),
            LinkType::Hardlink
        );
    }

    #[test]
    fn test_by_type_destination_shape() {
        let files = vec![PathBuf::from("/in/photo.jpg"), PathBuf::from("/in/notes")];
        let ops = plan_by_type(&files, Path::new("/out"));

        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[0].destination,
            PathBuf::from("/out/images/raster_images/photo.jpg")
        );
        assert_eq!(ops[1].destination, PathBuf::from("/out/others/notes"));
        assert!(ops.iter().all(|op| op.link_type == LinkType::Hardlink));
        assert!(ops.iter().all(|op| op.folder_name.is_none()));
    }

    #[test]
    fn test_by_type_skips_hidden_files() {
        let files = vec![
            PathBuf::from("/in/.hidden.jpg"),
            PathBuf::from("/in/visible.jpg"),
        ];
        let ops = plan_by_type(&files, Path::new("/out"));

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].source, PathBuf::from("/in/visible.jpg"));
    }

    #[test]
    fn test_by_type_duplicate_basenames_collide() {
        // Known limitation: by-type planning does not rename on collision.
        let files = vec![PathBuf::from("/a/pic.jpg"), PathBuf::from("/b/pic.jpg")];
        let ops = plan_by_type(&files, Path::new("/out"));

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].destination, ops[1].destination);
    }

    #[test]
    fn test_by_date_missing_source_is_an_error() {
        let files = vec![PathBuf::from("/definitely/not/here.txt")];
        let result = plan_by_date(&files, Path::new("/out"));
        assert!(matches!(
            result,
            Err(PlanError::SourceMetadata { .. })
        ));
    }

    #[test]
    fn test_by_metadata_preserves_extension_and_labels() {
        let mut session = PlanningSession::new();
        let records = vec![record("/in/scan001.pdf", "docs", "tax_return")];
        let ops = plan_by_metadata(&records, Path::new("/out"), &mut session);

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].destination, PathBuf::from("/out/docs/tax_return.pdf"));
        assert_eq!(ops[0].folder_name.as_deref(), Some("docs"));
        assert_eq!(ops[0].new_file_name.as_deref(), Some("tax_return.pdf"));
    }

    #[test]
    fn test_by_metadata_resolves_collisions_with_suffix() {
        let mut session = PlanningSession::new();
        let records = vec![
            record("/in/one.txt", "docs", "report"),
            record("/in/two.txt", "docs", "report"),
            record("/in/three.txt", "docs", "report"),
        ];
        let ops = plan_by_metadata(&records, Path::new("/out"), &mut session);

        let destinations: Vec<_> = ops.iter().map(|op| op.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![
                PathBuf::from("/out/docs/report.txt"),
                PathBuf::from("/out/docs/report_1.txt"),
                PathBuf::from("/out/docs/report_2.txt"),
            ]
        );
    }

    #[test]
    fn test_by_metadata_destinations_unique_within_call() {
        let mut session = PlanningSession::new();
        let records: Vec<_> = (0..20)
            .map(|i| record(&format!("/in/f{i}.txt"), "docs", "same"))
            .collect();
        let ops = plan_by_metadata(&records, Path::new("/out"), &mut session);

        let unique: HashSet<_> = ops.iter().map(|op| &op.destination).collect();
        assert_eq!(unique.len(), ops.len());
    }

    #[test]
    fn test_by_metadata_counter_continues_across_calls() {
        let mut session = PlanningSession::new();
        let first = plan_by_metadata(
            &[record("/in/a.txt", "docs", "report")],
            Path::new("/out"),
            &mut session,
        );
        let second = plan_by_metadata(
            &[record("/in/b.txt", "docs", "report")],
            Path::new("/out"),
            &mut session,
        );
        let third = plan_by_metadata(
            &[record("/in/c.txt", "docs", "report")],
            Path::new("/out"),
            &mut session,
        );

        assert_eq!(first[0].destination, PathBuf::from("/out/docs/report.txt"));
        assert_eq!(second[0].destination, PathBuf::from("/out/docs/report_1.txt"));
        assert_eq!(third[0].destination, PathBuf::from("/out/docs/report_2.txt"));
    }

    #[test]
    fn test_by_metadata_skips_already_processed_sources() {
        let mut session = PlanningSession::new();
        let records = vec![
            record("/in/a.txt", "docs", "report"),
            record("/in/a.txt", "docs", "report"),
        ];
        let ops = plan_by_metadata(&records, Path::new("/out"), &mut session);
        assert_eq!(ops.len(), 1);

        // Same source in a later call is skipped too.
        let again = plan_by_metadata(
            &[record("/in/a.txt", "other", "report")],
            Path::new("/out"),
            &mut session,
        );
        assert!(again.is_empty());
        assert!(session.is_processed(Path::new("/in/a.txt")));
    }

    #[test]
    fn test_by_metadata_source_without_extension() {
        let mut session = PlanningSession::new();
        let ops = plan_by_metadata(
            &[record("/in/README", "docs", "readme")],
            Path::new("/out"),
            &mut session,
        );
        assert_eq!(ops[0].destination, PathBuf::from("/out/docs/readme"));
    }

    #[test]
    fn test_independent_sessions_do_not_interfere() {
        let mut first = PlanningSession::new();
        let mut second = PlanningSession::new();

        let a = plan_by_metadata(
            &[record("/in/a.txt", "docs", "report")],
            Path::new("/out"),
            &mut first,
        );
        let b = plan_by_metadata(
            &[record("/in/b.txt", "docs", "report")],
            Path::new("/out"),
            &mut second,
        );

        // Both sessions allocate the unsuffixed name.
        assert_eq!(a[0].destination, b[0].destination);
        assert_eq!(first.allocated_count(), 1);
        assert_eq!(second.allocated_count(), 1);
    }

    #[test]
    fn test_operation_serializes_for_plan_export() {
        let mut session = PlanningSession::new();
        let ops = plan_by_metadata(
            &[record("/in/a.txt", "docs", "report")],
            Path::new("/out"),
            &mut session,
        );

        let json = serde_json::to_value(&ops[0]).expect("operation serializes");
        assert_eq!(json["link_type"], "hardlink");
        assert_eq!(json["folder_name"], "docs");
        assert_eq!(json["destination"], "/out/docs/report.txt");
    }

    #[test]
    fn test_plan_order_matches_input_order() {
        let files = vec![
            PathBuf::from("/in/b.zip"),
            PathBuf::from("/in/a.zip"),
            PathBuf::from("/in/c.zip"),
        ];
        let ops = plan_by_type(&files, Path::new("/out"));
        let sources: Vec<_> = ops.iter().map(|op| op.source.clone()).collect();
        assert_eq!(sources, files);
    }
}
