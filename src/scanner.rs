use crate::error::{AuditError, Result};
use crate::types::FileEntry;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Lazy, single-pass walk over every regular file below a root.
pub struct Scan {
    walker: walkdir::IntoIter,
    skipped: usize,
}

/// Start a scan of `root`. A missing root fails here, before any traversal.
pub fn scan(root: &Path) -> Result<Scan> {
    match fs::metadata(root) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AuditError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(AuditError::io(root, e)),
    }

    Ok(Scan {
        walker: WalkDir::new(root).follow_links(false).into_iter(),
        skipped: 0,
    })
}

impl Scan {
    /// Entries skipped so far because they vanished or could not be read.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn skip(&mut self, path: Option<&Path>, err: Option<&std::io::Error>) {
        self.skipped += 1;
        let shown = path.map_or_else(|| "<unknown>".into(), |p| p.display().to_string());

        match err.map(std::io::Error::kind) {
            Some(ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                log::debug!("Skipping {shown}: {err:?}");
            }
            _ => log::warn!("Skipping {shown}: {err:?}"),
        }
    }
}

impl Iterator for Scan {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.skip(e.path(), e.io_error());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => {
                    return Some(FileEntry {
                        size: metadata.len(),
                        mtime: mtime_secs(&metadata),
                        path: entry.into_path(),
                    });
                }
                Err(e) => self.skip(Some(entry.path()), e.io_error()),
            }
        }
    }
}

fn mtime_secs(metadata: &Metadata) -> Option<f64> {
    let modified = metadata.modified().ok()?;
    Some(match modified.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    })
}
