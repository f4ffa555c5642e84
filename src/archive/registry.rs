//! Format registry: file extension -> backend factory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = FormatRegistry::with_defaults();
//! registry.register(".xlsx", "Excel Worksheets (*.xlsx)|*.xlsx", grid_factory(provider));
//!
//! let backend = registry.resolve(Path::new("capture.OPT"), &settings);  // OptArchive
//! let none = registry.resolve(Path::new("capture.json"), &settings);    // None
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Archive, GridArchive, OptArchive, TextArchive};
use crate::export::WorkbookProvider;
use crate::settings::ArchiveSettings;

/// Builds a backend for one operation.
pub type BackendFactory = Arc<dyn Fn(&ArchiveSettings) -> Box<dyn Archive> + Send + Sync>;

struct FormatEntry {
    /// Lowercase, with leading dot.
    extension: String,
    description: String,
    factory: BackendFactory,
}

/// Registry of archive formats.
///
/// Entries keep their first-registration order; registering an extension
/// again replaces its description and factory in place.
#[derive(Default)]
pub struct FormatRegistry {
    entries: RwLock<Vec<FormatEntry>>,
}

/// Normalize `"OPT"`, `"opt"` or `".opt"` to `".opt"`.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Extension key of `path`, if it has one.
fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
}

/// Factory for the `.opt` container backend.
pub fn opt_factory() -> BackendFactory {
    Arc::new(|settings: &ArchiveSettings| -> Box<dyn Archive> { Box::new(OptArchive::new(settings)) })
}

/// Factory for the delimited text backend.
pub fn text_factory() -> BackendFactory {
    Arc::new(|settings: &ArchiveSettings| -> Box<dyn Archive> { Box::new(TextArchive::new(settings)) })
}

/// Factory for the cell-grid backend writing through `provider`.
pub fn grid_factory(provider: Arc<dyn WorkbookProvider>) -> BackendFactory {
    Arc::new(move |settings: &ArchiveSettings| -> Box<dyn Archive> {
        Box::new(GridArchive::new(Arc::clone(&provider), settings))
    })
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `.opt` and `.csv` formats.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(".opt", "Optick Performance Capture (*.opt)|*.opt", opt_factory());
        registry.register(".csv", "Comma-Separated Values (*.csv)|*.csv", text_factory());
        registry
    }

    /// Register (or replace) the backend for `extension`.
    pub fn register(&self, extension: &str, description: impl Into<String>, factory: BackendFactory) {
        let extension = normalize_extension(extension);
        let description = description.into();
        let mut entries = self.entries.write();

        match entries.iter_mut().find(|e| e.extension == extension) {
            Some(entry) => {
                tracing::debug!("replacing archive format {}", extension);
                entry.description = description;
                entry.factory = factory;
            }
            None => entries.push(FormatEntry {
                extension,
                description,
                factory,
            }),
        }
    }

    /// Remove the backend for `extension`. Returns whether one was registered.
    pub fn unregister(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.extension != extension);
        entries.len() != before
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Build the backend for `path`'s extension (case-insensitive).
    pub fn resolve(&self, path: &Path, settings: &ArchiveSettings) -> Option<Box<dyn Archive>> {
        let extension = path_extension(path)?;
        let factory = self
            .entries
            .read()
            .iter()
            .find(|e| e.extension == extension)
            .map(|e| Arc::clone(&e.factory))?;
        Some(factory(settings))
    }

    pub fn is_registered(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.entries.read().iter().any(|e| e.extension == extension)
    }

    /// Registered `(extension, description)` pairs in registration order.
    pub fn describe_filters(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .map(|e| (e.extension.clone(), e.description.clone()))
            .collect()
    }

    /// File-dialog filter: every description followed by `|`, trailing `|` trimmed.
    pub fn filter_string(&self) -> String {
        let mut out = String::new();
        for entry in self.entries.read().iter() {
            out.push_str(&entry.description);
            out.push('|');
        }
        out.trim_end_matches('|').to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
