use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A regular file found by the scanner. `mtime` is seconds since the Unix epoch,
/// `None` when the platform could not report it.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub mtime: Option<f64>,
}

impl FileEntry {
    /// Lower-cased extension with its leading dot, or "" when the file has none.
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }
}

#[must_use]
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => String::new(),
    }
}

/// Declaration order is the classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Proxy,
    Optimized,
    RenderCache,
    Stills,
    Backups,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Proxy,
        Category::Optimized,
        Category::RenderCache,
        Category::Stills,
        Category::Backups,
        Category::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Proxy => "proxy",
            Category::Optimized => "optimized",
            Category::RenderCache => "render_cache",
            Category::Stills => "stills",
            Category::Backups => "backups",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTotal {
    /// Empty string means "no extension".
    pub extension: String,
    pub bytes: u64,
}

/// Result of one full scan. Every category is present in both maps.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSnapshot {
    pub root: PathBuf,
    pub total_bytes: u64,
    pub total_files: usize,
    pub by_extension: Vec<ExtensionTotal>,
    pub largest_files: Vec<FileEntry>,
    pub category_bytes: BTreeMap<Category, u64>,
    pub category_entries: BTreeMap<Category, Vec<FileEntry>>,
}

impl AuditSnapshot {
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[FileEntry] {
        self.category_entries
            .get(&category)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_with_dot() {
        assert_eq!(extension_of(Path::new("/a/B.MOV")), ".mov");
        assert_eq!(extension_of(Path::new("/a/clip.tar.GZ")), ".gz");
    }

    #[test]
    fn test_no_extension_sentinel() {
        assert_eq!(extension_of(Path::new("/a/README")), "");
        assert_eq!(extension_of(Path::new("/a/.hidden")), "");
        assert_eq!(extension_of(Path::new("/a/trailing.")), "");
    }

    #[test]
    fn test_category_names_parse() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("Proxy".parse::<Category>().is_err());
    }
}
