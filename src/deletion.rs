use crate::config::normalize_extension;
use crate::error::Result;
use crate::human::human;
use crate::scanner;
use crate::types::{FileEntry, extension_of};
use chrono::Local;
use colored::Colorize;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The operator's yes/no answer before anything is removed.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Asks on `output` and reads one line from `input`. EOF or a read error counts as "no".
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptConfirm { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N]: ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&answer),
        }
    }
}

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone)]
pub struct DeletionRequest {
    /// Shown to the operator, e.g. "category 'proxy'".
    pub label: String,
    pub candidates: Vec<FileEntry>,
    /// `None` disables the age filter. `Some(0)` keeps only files modified before now.
    pub min_age_days: Option<u32>,
}

impl DeletionRequest {
    #[must_use]
    pub fn cutoff(&self, now: f64) -> Option<f64> {
        self.min_age_days
            .map(|days| now - f64::from(days) * SECONDS_PER_DAY)
    }

    /// Candidates that pass the age filter (modified strictly before the cutoff).
    /// A file with an unknown modification time never passes an age filter.
    #[must_use]
    pub fn eligible(&self, now: f64) -> Vec<FileEntry> {
        match self.cutoff(now) {
            Some(cutoff) => self
                .candidates
                .iter()
                .filter(|e| e.mtime.is_some_and(|m| m < cutoff))
                .cloned()
                .collect(),
            None => self.candidates.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    NothingToDelete,
    Aborted,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionResult {
    pub outcome: DeletionOutcome,
    pub deleted: usize,
    pub bytes_freed: u64,
    pub failures: Vec<DeletionFailure>,
}

impl DeletionResult {
    fn untouched(outcome: DeletionOutcome) -> Self {
        DeletionResult {
            outcome,
            deleted: 0,
            bytes_freed: 0,
            failures: Vec::new(),
        }
    }
}

/// Delete the files of one category bucket.
pub fn delete_category(
    label: &str,
    bucket: &[FileEntry],
    min_age_days: Option<u32>,
    confirm: &mut dyn Confirm,
) -> DeletionResult {
    let request = DeletionRequest {
        label: format!("category '{label}'"),
        candidates: bucket.to_vec(),
        min_age_days,
    };
    execute(&request, now_secs(), confirm)
}

/// Re-scan `root` and delete every file whose extension matches, case-insensitively.
pub fn delete_by_extension(
    root: &Path,
    extension: &str,
    min_age_days: Option<u32>,
    confirm: &mut dyn Confirm,
) -> Result<DeletionResult> {
    let extension = normalize_extension(extension);
    let candidates: Vec<FileEntry> = scanner::scan(root)?
        .filter(|e| extension_of(&e.path) == extension)
        .collect();

    let request = DeletionRequest {
        label: format!("extension {extension}"),
        candidates,
        min_age_days,
    };
    Ok(execute(&request, now_secs(), confirm))
}

/// Age filter, report, confirm, then remove each file independently.
pub fn execute(request: &DeletionRequest, now: f64, confirm: &mut dyn Confirm) -> DeletionResult {
    let to_delete = request.eligible(now);
    let total: u64 = to_delete.iter().map(|e| e.size).sum();

    let age_note = request
        .min_age_days
        .map(|d| format!(", older than {d} days"))
        .unwrap_or_default();
    println!(
        "About to delete {} files ({}{}), total {}",
        to_delete.len(),
        request.label,
        age_note,
        human(total).yellow()
    );

    if to_delete.is_empty() {
        println!("Nothing to delete.");
        return DeletionResult::untouched(DeletionOutcome::NothingToDelete);
    }

    if !confirm.confirm("Proceed with deletion?") {
        println!("{}", "Aborted.".yellow());
        return DeletionResult::untouched(DeletionOutcome::Aborted);
    }

    let mut result = DeletionResult::untouched(DeletionOutcome::Completed);
    for entry in to_delete {
        match fs::remove_file(&entry.path) {
            Ok(()) => {
                log::info!("Deleted {}", entry.path.display());
                result.deleted += 1;
                result.bytes_freed += entry.size;
            }
            Err(e) => {
                let failure = DeletionFailure {
                    path: entry.path,
                    reason: e.to_string(),
                };
                println!(
                    "{} {}: {}",
                    "Failed to delete".red(),
                    failure.path.display(),
                    failure.reason
                );
                result.failures.push(failure);
            }
        }
    }

    println!(
        "Deleted {} files, freed {}",
        result.deleted.to_string().green(),
        human(result.bytes_freed).green()
    );
    if !result.failures.is_empty() {
        println!(
            "{}",
            format!("{} files could not be deleted", result.failures.len()).red()
        );
    }

    result
}

fn now_secs() -> f64 {
    let now = Local::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9
}
