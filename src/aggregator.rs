use crate::classifier::Classifier;
use crate::types::{AuditSnapshot, Category, ExtensionTotal, FileEntry};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Running totals for one scan.
#[derive(Debug)]
pub struct Aggregator {
    top_n: usize,
    total_bytes: u64,
    total_files: usize,
    by_extension: HashMap<String, u64>,
    largest: Vec<FileEntry>,
    category_bytes: BTreeMap<Category, u64>,
    category_entries: BTreeMap<Category, Vec<FileEntry>>,
}

impl Aggregator {
    #[must_use]
    pub fn new(top_n: usize) -> Self {
        Aggregator {
            top_n,
            total_bytes: 0,
            total_files: 0,
            by_extension: HashMap::new(),
            largest: Vec::new(),
            category_bytes: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            category_entries: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, entry: FileEntry, category: Category) {
        self.total_bytes += entry.size;
        self.total_files += 1;
        *self.by_extension.entry(entry.extension()).or_insert(0) += entry.size;
        *self.category_bytes.entry(category).or_insert(0) += entry.size;

        // Let the working set grow to 3x before paying for a sort
        self.largest.push(entry.clone());
        if self.largest.len() > self.top_n.saturating_mul(3) {
            trim_largest(&mut self.largest, self.top_n);
        }

        self.category_entries.entry(category).or_default().push(entry);
    }

    #[must_use]
    pub fn finish(mut self, root: &Path) -> AuditSnapshot {
        trim_largest(&mut self.largest, self.top_n);

        let mut by_extension: Vec<ExtensionTotal> = self
            .by_extension
            .into_iter()
            .map(|(extension, bytes)| ExtensionTotal { extension, bytes })
            .collect();
        by_extension.sort_by(|a, b| {
            b.bytes
                .cmp(&a.bytes)
                .then_with(|| a.extension.cmp(&b.extension))
        });

        AuditSnapshot {
            root: root.to_path_buf(),
            total_bytes: self.total_bytes,
            total_files: self.total_files,
            by_extension,
            largest_files: self.largest,
            category_bytes: self.category_bytes,
            category_entries: self.category_entries,
        }
    }
}

/// Fold a whole entry stream into a snapshot.
pub fn aggregate<I>(entries: I, classifier: &Classifier, top_n: usize, root: &Path) -> AuditSnapshot
where
    I: IntoIterator<Item = FileEntry>,
{
    let mut agg = Aggregator::new(top_n);
    for entry in entries {
        let category = classifier.classify(&entry.path);
        agg.push(entry, category);
    }
    agg.finish(root)
}

// Largest first; equal sizes ordered by path (descending) so runs are reproducible.
fn by_size_desc(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.size.cmp(&a.size).then_with(|| b.path.cmp(&a.path))
}

fn trim_largest(largest: &mut Vec<FileEntry>, top_n: usize) {
    largest.sort_by(by_size_desc);
    largest.truncate(top_n);
}
