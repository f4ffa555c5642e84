//! Persistent archive settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::{FIELD_DELIMITER, TAG_DELIMITER};
use crate::util::Result;

/// Tunables for exports and new capture containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    // Text export
    pub field_delimiter: String,
    pub tag_delimiter: String,
    pub quote_fields: bool,

    // Containers
    pub compress_captures: bool,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            field_delimiter: FIELD_DELIMITER.to_string(),
            tag_delimiter: TAG_DELIMITER.to_string(),
            quote_fields: false,
            compress_captures: true,
        }
    }
}

impl ArchiveSettings {
    /// Default settings file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("capture-archive");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| match Self::load_from(&p) {
                Ok(s) => Some(s),
                Err(e) => {
                    if p.exists() {
                        tracing::warn!("ignoring settings at {}: {}", p.display(), e);
                    }
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&data)?;
        // an empty delimiter would merge every field
        if settings.field_delimiter.is_empty() {
            settings.field_delimiter = FIELD_DELIMITER.to_string();
        }
        Ok(settings)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        match Self::path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = ArchiveSettings::default();
        assert_eq!(s.field_delimiter, ",");
        assert_eq!(s.tag_delimiter, "|");
        assert!(s.compress_captures);
        assert!(!s.quote_fields);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"quote_fields": true, "field_delimiter": ""}"#).unwrap();

        let s = ArchiveSettings::load_from(&path).unwrap();
        assert!(s.quote_fields);
        assert_eq!(s.field_delimiter, ",");
        assert_eq!(s.tag_delimiter, "|");
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let s = ArchiveSettings {
            compress_captures: false,
            tag_delimiter: ";".into(),
            ..Default::default()
        };
        s.save_to(&path).unwrap();
        assert_eq!(ArchiveSettings::load_from(&path).unwrap(), s);
    }
}
