//! Archive orchestrator.

use std::path::PathBuf;

use super::{ArchiveMode, ArchiveOption, FormatRegistry};
use crate::settings::ArchiveSettings;
use crate::util::{Error, Result};

/// File-selection collaborator (an open/save dialog or equivalent).
pub trait FileSelector {
    /// Ask for an existing file to open. `filter` is the registry's
    /// dialog filter string. `None` means the user cancelled.
    fn select_open(&self, filter: &str) -> Option<PathBuf>;

    /// Ask for a destination file.
    fn select_save(&self, filter: &str) -> Option<PathBuf>;
}

/// Resolves backends from the registry and runs open/save requests.
pub struct ArchiveFactory {
    registry: FormatRegistry,
    settings: ArchiveSettings,
}

impl ArchiveFactory {
    pub fn new(registry: FormatRegistry, settings: ArchiveSettings) -> Self {
        Self { registry, settings }
    }

    /// Factory over the built-in formats with default settings.
    pub fn with_defaults() -> Self {
        Self::new(FormatRegistry::with_defaults(), ArchiveSettings::default())
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ArchiveSettings {
        &self.settings
    }

    /// Tear down all registrations.
    pub fn shutdown(&self) {
        self.registry.clear();
    }

    fn backend_for(&self, option: &ArchiveOption) -> Result<Box<dyn super::Archive>> {
        let path = option
            .file_path
            .as_deref()
            .ok_or_else(|| Error::other("no file path given"))?;
        self.registry
            .resolve(path, &self.settings)
            .ok_or_else(|| Error::UnsupportedExtension(path.to_path_buf()))
    }

    /// Open the capture at `option.file_path`. On success the payload
    /// stream is in `option.stream`.
    pub fn open(&self, option: &mut ArchiveOption) -> Result<()> {
        let backend = self.backend_for(option)?;
        let _span = tracing::info_span!("archive_open", backend = backend.name()).entered();
        backend.open(option)?;
        tracing::info!("opened {:?}", option.file_path);
        Ok(())
    }

    /// Save `option.sources` to `option.file_path`.
    pub fn save(&self, option: &mut ArchiveOption) -> Result<()> {
        let backend = self.backend_for(option)?;
        let _span = tracing::info_span!(
            "archive_save",
            backend = backend.name(),
            source_type = %option.source_type
        )
        .entered();
        backend.save(option)
    }

    /// Run `option` according to its mode, asking `selector` for a path
    /// when none is set.
    pub fn archive(&self, option: &mut ArchiveOption, selector: &dyn FileSelector) -> Result<()> {
        if option.file_path.is_none() {
            let filter = self.registry.filter_string();
            let chosen = match option.mode {
                ArchiveMode::Open => selector.select_open(&filter),
                ArchiveMode::Save => selector.select_save(&filter),
            };
            option.file_path = Some(chosen.ok_or(Error::Cancelled)?);
        }

        match option.mode {
            ArchiveMode::Open => self.open(option),
            ArchiveMode::Save => self.save(option),
        }
    }
}

impl Default for ArchiveFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}
