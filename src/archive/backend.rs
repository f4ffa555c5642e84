//! Backend trait implemented by each archive format.

use super::ArchiveOption;
use crate::util::Result;

/// A file format that can open and/or save captures.
pub trait Archive: Send {
    /// Short format name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Validate the file at `option.file_path` and store a readable payload
    /// stream in `option.stream`.
    fn open(&self, option: &mut ArchiveOption) -> Result<()>;

    /// Write `option.sources` as `option.source_type` to `option.file_path`.
    fn save(&self, option: &mut ArchiveOption) -> Result<()>;
}
