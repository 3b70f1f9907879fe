//! Command-line interface module for reshelf.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - File collection with filter rules
//! - Plan preview and JSON export
//! - Orchestration of the plan-then-execute pipeline

use clap::{Parser, ValueEnum};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CompiledFilters, Config};
use crate::executor::{self, ExecuteOptions};
use crate::output;
use crate::planner::{Operation, plan_by_date, plan_by_type};

/// Planning strategy selectable from the command line.
///
/// Metadata-driven planning needs externally supplied records and is a
/// library-only entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Organize into year/month folders by modification date.
    Date,
    /// Organize into type-category folders by extension.
    Type,
}

/// Plan and execute bulk reorganization of a directory's files.
#[derive(Debug, Parser)]
#[command(name = "reshelf", version, about)]
pub struct Cli {
    /// Directory containing the files to reorganize
    pub input: PathBuf,

    /// Output root for the new layout (defaults to INPUT/organized)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Planning strategy
    #[arg(long, value_enum, default_value_t = Strategy::Type)]
    pub by: Strategy,

    /// Describe operations without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress console output; messages go to --log-file if given
    #[arg(long)]
    pub silent: bool,

    /// Append execution messages to this file (with --silent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the planned operations as JSON to this path
    #[arg(long)]
    pub plan: Option<PathBuf>,
}

/// Runs the full pipeline: load config, collect files, plan, optionally
/// export the plan, execute, summarize.
///
/// CLI flags override configuration file settings.
pub fn run(cli: Cli) -> Result<(), String> {
    let config =
        Config::load(cli.config.as_deref()).map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let dry_run = cli.dry_run || config.organize.dry_run;
    let silent = cli.silent || config.organize.silent;
    let log_file = cli.log_file.or(config.organize.log_file);

    let output_root = cli
        .output
        .unwrap_or_else(|| cli.input.join("organized"));

    let files = collect_files(&cli.input, &filters)?;
    if files.is_empty() {
        if !silent {
            output::info("No files found to organize.");
        }
        return Ok(());
    }

    let operations = match cli.by {
        Strategy::Date => plan_by_date(&files, &output_root).map_err(|e| e.to_string())?,
        Strategy::Type => plan_by_type(&files, &output_root),
    };

    if let Some(plan_path) = &cli.plan {
        export_plan(&operations, plan_path)?;
        if !silent {
            output::success(&format!("Plan written to {}", plan_path.display()));
        }
    }

    if !silent {
        output::info(&format!(
            "Organizing {} files from {} into {}",
            operations.len(),
            cli.input.display(),
            output_root.display()
        ));
        output::summary_table(&folder_counts(&operations, &output_root), operations.len());
    }

    let mut reporter = output::for_mode(silent, log_file.as_deref())
        .map_err(|e| format!("Error opening log file: {}", e))?;
    let options = ExecuteOptions {
        dry_run,
        cancel: None,
    };
    let report = executor::execute(&operations, &options, reporter.as_mut());

    if !silent {
        if dry_run {
            output::success("Dry run complete. No files were modified.");
        } else if report.failed > 0 {
            output::warning(&format!(
                "Organized {} of {} files ({} failed). Review errors above.",
                report.completed, report.total, report.failed
            ));
        } else {
            output::success(&format!("Organized {} files.", report.completed));
        }
    }

    Ok(())
}

/// Collects the regular files of a directory, flat (non-recursive),
/// applying the compiled filter rules. The result is sorted so planning
/// output is deterministic across platforms.
pub fn collect_files(dir: &Path, filters: &CompiledFilters) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Error reading directory {}: {}", dir.display(), e))?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let path = entry.path();
            if filters.should_include(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Writes the planned operations as pretty-printed JSON for external
/// preview rendering.
fn export_plan(operations: &[Operation], path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(operations)
        .map_err(|e| format!("Error serializing plan: {}", e))?;
    fs::write(path, json).map_err(|e| format!("Error writing plan to {}: {}", path.display(), e))
}

/// Counts planned files per destination folder, relative to the output
/// root, for the summary table.
fn folder_counts(operations: &[Operation], output_root: &Path) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for operation in operations {
        let folder = operation
            .destination
            .parent()
            .and_then(|parent| parent.strip_prefix(output_root).ok())
            .map(|relative| relative.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("."));
        *counts.entry(folder).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_by_type;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "reshelf",
            "/data/in",
            "--output",
            "/data/out",
            "--by",
            "date",
            "--dry-run",
            "--silent",
            "--log-file",
            "/tmp/run.log",
        ])
        .expect("args parse");

        assert_eq!(cli.input, PathBuf::from("/data/in"));
        assert_eq!(cli.output, Some(PathBuf::from("/data/out")));
        assert_eq!(cli.by, Strategy::Date);
        assert!(cli.dry_run);
        assert!(cli.silent);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/run.log")));
    }

    #[test]
    fn test_cli_defaults_to_type_strategy() {
        let cli = Cli::try_parse_from(["reshelf", "/data/in"]).expect("args parse");
        assert_eq!(cli.by, Strategy::Type);
        assert!(!cli.dry_run);
        assert!(cli.plan.is_none());
    }

    #[test]
    fn test_collect_files_skips_directories_and_hidden() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("a.txt"), b"x").expect("write");
        fs::write(temp.path().join(".hidden"), b"x").expect("write");
        fs::create_dir(temp.path().join("subdir")).expect("mkdir");

        let filters = Config::default().compile_filters().expect("filters");
        let files = collect_files(temp.path(), &filters).expect("collect");

        assert_eq!(files, vec![temp.path().join("a.txt")]);
    }

    #[test]
    fn test_collect_files_is_sorted() {
        let temp = TempDir::new().expect("temp dir");
        for name in ["zeta.txt", "alpha.txt", "mid.txt"] {
            fs::write(temp.path().join(name), b"x").expect("write");
        }

        let filters = Config::default().compile_filters().expect("filters");
        let files = collect_files(temp.path(), &filters).expect("collect");

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.txt", "mid.txt", "zeta.txt"]);
    }

    #[test]
    fn test_folder_counts_groups_by_relative_folder() {
        let files = vec![
            PathBuf::from("/in/a.jpg"),
            PathBuf::from("/in/b.jpg"),
            PathBuf::from("/in/c.zip"),
        ];
        let ops = plan_by_type(&files, Path::new("/out"));
        let counts = folder_counts(&ops, Path::new("/out"));

        assert_eq!(counts.get("images/raster_images"), Some(&2));
        assert_eq!(counts.get("archives"), Some(&1));
    }
}
