use crate::error::{AuditError, Result};
use crate::human::human;
use crate::types::{AuditSnapshot, Category, FileEntry};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct SizeRow {
    pub bytes: u64,
    pub human: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtensionRow {
    pub ext: String,
    pub bytes: u64,
    pub human: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LargeFileRow {
    pub path: String,
    pub bytes: u64,
    pub human: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub path: String,
    pub size: u64,
    pub mtime: Option<f64>,
}

/// Serialisable view of one snapshot. Both the JSON and the CSV file are rendered from it.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub root: String,
    pub generated_at: String,
    pub total_bytes: u64,
    pub total_human: String,
    pub total_files: usize,
    pub by_ext: Vec<ExtensionRow>,
    pub largest_files: Vec<LargeFileRow>,
    pub by_category_bytes: BTreeMap<Category, SizeRow>,
    pub by_category_paths: BTreeMap<Category, Vec<EntryRow>>,
}

impl Report {
    #[must_use]
    pub fn from_snapshot(snapshot: &AuditSnapshot, generated_at: DateTime<Local>) -> Self {
        Report {
            root: snapshot.root.display().to_string(),
            generated_at: iso_seconds(generated_at),
            total_bytes: snapshot.total_bytes,
            total_human: human(snapshot.total_bytes),
            total_files: snapshot.total_files,
            by_ext: snapshot
                .by_extension
                .iter()
                .map(|e| ExtensionRow {
                    ext: e.extension.clone(),
                    bytes: e.bytes,
                    human: human(e.bytes),
                })
                .collect(),
            largest_files: snapshot
                .largest_files
                .iter()
                .map(|f| LargeFileRow {
                    path: f.path.display().to_string(),
                    bytes: f.size,
                    human: human(f.size),
                })
                .collect(),
            by_category_bytes: snapshot
                .category_bytes
                .iter()
                .map(|(cat, bytes)| {
                    (
                        *cat,
                        SizeRow {
                            bytes: *bytes,
                            human: human(*bytes),
                        },
                    )
                })
                .collect(),
            by_category_paths: snapshot
                .category_entries
                .iter()
                .map(|(cat, entries)| (*cat, entries.iter().map(entry_row).collect()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `path,bytes,human` for the largest files only.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("path,bytes,human\n");
        for row in &self.largest_files {
            out.push_str(&format!(
                "{},{},{}\n",
                csv_field(&row.path),
                row.bytes,
                csv_field(&row.human)
            ));
        }
        out
    }
}

/// Writes `<base>.json` and `<base>.csv`, creating the parent directory if needed.
pub fn write_report(base: &Path, report: &Report) -> Result<(PathBuf, PathBuf)> {
    if let Some(parent) = base.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| AuditError::io(parent, e))?;
    }

    let json_path = base.with_extension("json");
    let csv_path = base.with_extension("csv");

    fs::write(&json_path, report.to_json()?).map_err(|e| AuditError::io(&json_path, e))?;
    fs::write(&csv_path, report.to_csv()).map_err(|e| AuditError::io(&csv_path, e))?;

    Ok((json_path, csv_path))
}

#[must_use]
pub fn iso_seconds(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn entry_row(entry: &FileEntry) -> EntryRow {
    EntryRow {
        path: entry.path.display().to_string(),
        size: entry.size,
        mtime: entry.mtime,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
