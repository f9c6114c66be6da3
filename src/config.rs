use crate::error::{AuditError, Result};
use crate::types::Category;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Common folder names used by the editor for its working media (customise via --config)
const DEFAULT_PATTERNS: [(Category, &[&str]); 5] = [
    (Category::Proxy, &["Proxy", "ProxyMedia", "Proxies"]),
    (Category::Optimized, &["OptimizedMedia", "Optimized Media"]),
    (
        Category::RenderCache,
        &["CacheClip", "RenderCache", "Render Cache"],
    ),
    (Category::Stills, &["Gallery", "Stills", "GalleryStills"]),
    (
        Category::Backups,
        &["Backups", "Project Backups", "Resolve Backups"],
    ),
];

const DEFAULT_LARGE_EXTS: [&str; 16] = [
    ".mov", ".mp4", ".mxf", ".braw", ".dng", ".wav", ".caf", ".flac", ".dvcc", ".dpx", ".exr",
    ".tif", ".tiff", ".prores", ".r3d", ".mkv",
];

/// Classification table and large-extension hints.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    pub categories: BTreeMap<Category, Vec<String>>,
    pub large_extensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
    large_extensions: Option<Vec<String>>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        let categories = DEFAULT_PATTERNS
            .iter()
            .map(|(cat, needles)| (*cat, needles.iter().map(|n| (*n).to_string()).collect()))
            .collect();

        AuditConfig {
            categories,
            large_extensions: DEFAULT_LARGE_EXTS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl AuditConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AuditError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Listed categories replace their defaults, the rest keep them.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = AuditConfig::default();

        for (name, needles) in file.categories {
            let category: Category = name.parse().map_err(AuditError::Config)?;
            if category == Category::Other {
                return Err(AuditError::Config(
                    "'other' is the fallback category and cannot have folder names".to_string(),
                ));
            }
            config.categories.insert(category, needles);
        }

        if let Some(exts) = file.large_extensions {
            config.large_extensions = exts.iter().map(|e| normalize_extension(e)).collect();
        }

        Ok(config)
    }

    #[must_use]
    pub fn is_large_extension(&self, ext: &str) -> bool {
        self.large_extensions.iter().any(|e| e == ext)
    }
}

/// Lower-case and make sure the extension starts with a dot (".dvcc", "DVCC" -> ".dvcc").
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
