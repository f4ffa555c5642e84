//! # Capture Archive
//!
//! Archive and export engine for profiler capture sessions.
//!
//! Captures (call trees, frames, raw records and tags) are persisted to the
//! binary `.opt` container or exported as tabular data (delimited text or a
//! cell-grid workbook).
//!
//! ## Modules
//!
//! - [`util`] - Errors
//! - [`model`] - Call trees, tags, frames, records
//! - [`opt`] - The `.opt` container codec
//! - [`export`] - Tree flattening and tabular sinks
//! - [`archive`] - Backends, format registry, orchestrator
//! - [`settings`] - Persistent settings
//! - [`document`] - JSON capture documents
//!
//! ## Example
//!
//! ```ignore
//! use capture_archive::prelude::*;
//!
//! let factory = ArchiveFactory::with_defaults();
//! let mut option = ArchiveOption::save("frames.opt", ArchiveSourceType::Frame, vec![ArchiveSource::Frame(frames)]);
//! factory.save(&mut option)?;
//!
//! let mut option = ArchiveOption::open("frames.opt");
//! factory.open(&mut option)?;
//! if let Some(records) = option.take_records() {
//!     for record in records {
//!         println!("{}", record?.response_type);
//!     }
//! }
//! ```

pub mod util;
pub mod model;
pub mod opt;
pub mod export;
pub mod archive;
pub mod settings;
pub mod document;

// Re-export commonly used types
pub use util::{Error, Result};
pub use settings::ArchiveSettings;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::model::*;
    pub use crate::archive::{
        Archive, ArchiveFactory, ArchiveMode, ArchiveOption, ArchivePipeline, ArchiveSource,
        ArchiveSourceType, FileSelector, FormatRegistry,
    };
    pub use crate::export::{MemoryWorkbook, MemoryWorkbookProvider, Workbook, WorkbookProvider};
    pub use crate::settings::ArchiveSettings;
}
