use crate::config::AuditConfig;
use crate::types::Category;
use std::collections::HashMap;
use std::path::Path;

/// Maps a path to a category by whole-segment folder-name matching.
#[derive(Debug, Clone)]
pub struct Classifier {
    needles: HashMap<String, Category>,
}

impl Classifier {
    #[must_use]
    pub fn new(config: &AuditConfig) -> Self {
        let mut needles = HashMap::new();

        // BTreeMap iterates in priority order, so the first category to claim a needle keeps it
        for (category, names) in &config.categories {
            for name in names {
                needles.entry(name.to_lowercase()).or_insert(*category);
            }
        }

        log::debug!("Classifier built with {} folder names", needles.len());
        Classifier { needles }
    }

    #[must_use]
    pub fn classify(&self, path: &Path) -> Category {
        path.components()
            .filter_map(|c| {
                let segment = c.as_os_str().to_string_lossy().to_lowercase();
                self.needles.get(&segment).copied()
            })
            .min()
            .unwrap_or(Category::Other)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(&AuditConfig::default())
    }
}
