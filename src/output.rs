//! Reporters and console output styling.
//!
//! Implementations of the executor's [`Reporter`] trait live here, along
//! with the small set of styled console helpers the CLI uses. Message
//! routing is decided once, when the reporter is chosen; a message goes to
//! exactly one destination.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::executor::Reporter;

/// Selects the reporter for the given output mode.
///
/// Silent with a log destination appends messages to the file; silent
/// without one discards them; otherwise messages stream to the console
/// with a progress bar.
pub fn for_mode(silent: bool, log_destination: Option<&Path>) -> io::Result<Box<dyn Reporter>> {
    if silent {
        match log_destination {
            Some(path) => Ok(Box::new(LogFileReporter::create(path)?)),
            None => Ok(Box::new(NullReporter)),
        }
    } else {
        Ok(Box::new(ConsoleReporter::new()))
    }
}

/// Streams messages to the terminal with an `indicatif` progress bar.
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn style_message(text: &str) -> String {
        if text.starts_with("Error") {
            format!("{} {}", "✗".red(), text.red())
        } else if text.starts_with("Dry run") {
            format!("[DRY RUN] {}", text).yellow().to_string()
        } else {
            format!("{} {}", "✓".green(), text)
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn on_progress(&mut self, done: usize, total: usize) {
        let bar = self.bar.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("Invalid progress bar template")
                    .progress_chars("█▓░"),
            );
            pb
        });
        bar.set_position(done as u64);
        if done == total {
            bar.finish_and_clear();
        }
    }

    fn on_message(&mut self, text: &str) {
        let styled = Self::style_message(text);
        match &self.bar {
            Some(bar) if !bar.is_finished() => bar.println(styled),
            _ => println!("{}", styled),
        }
    }
}

/// Appends one message per line to a UTF-8 log file.
pub struct LogFileReporter {
    file: File,
}

impl LogFileReporter {
    /// Opens the log file in append mode, creating it if absent.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl Reporter for LogFileReporter {
    fn on_progress(&mut self, _done: usize, _total: usize) {}

    fn on_message(&mut self, text: &str) {
        if let Err(e) = writeln!(self.file, "{}", text) {
            eprintln!("Warning: could not write to log file: {}", e);
        }
    }
}

/// Discards all output. Used for silent runs without a log destination.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_progress(&mut self, _done: usize, _total: usize) {}
    fn on_message(&mut self, _text: &str) {}
}

/// Prints an info message in cyan.
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Prints a success message in green with a checkmark.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message in red with an X mark.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message in yellow with a warning symbol.
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Prints a planned-operations summary: files per destination folder.
pub fn summary_table(folder_counts: &HashMap<String, usize>, total_files: usize) {
    println!("\n{}", "PLAN SUMMARY".bold());

    // Sort folders for consistent output
    let mut folders: Vec<_> = folder_counts.iter().collect();
    folders.sort_by_key(|&(name, _)| name);

    let max_folder_len = folders
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max(6);

    println!(
        "{:<width$} | {}",
        "Folder".bold(),
        "Files".bold(),
        width = max_folder_len
    );
    println!("{}", "-".repeat(max_folder_len + 10));

    for (folder, count) in &folders {
        let file_word = if **count == 1 { "file" } else { "files" };
        println!(
            "{:<width$} | {} {}",
            folder,
            count.to_string().green(),
            file_word,
            width = max_folder_len
        );
    }

    println!("{}", "-".repeat(max_folder_len + 10));
    println!(
        "{:<width$} | {} {}",
        "Total".bold(),
        total_files.to_string().green().bold(),
        if total_files == 1 { "file" } else { "files" },
        width = max_folder_len
    );
}
