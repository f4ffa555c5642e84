//! Archive engine: sources, backends, format registry and orchestrator.
//!
//! - [`ArchiveOption`] - One open/save request
//! - [`ArchiveSource`] / [`ArchiveSourceType`] - What to export
//! - [`Archive`] - Backend trait ([`OptArchive`], [`TextArchive`], [`GridArchive`])
//! - [`FormatRegistry`] - Extension -> backend factory table
//! - [`ArchiveFactory`] - Resolves a backend and runs the request

mod option;
mod source;
mod backend;
mod output;
mod opt_archive;
mod text_archive;
mod grid_archive;
mod registry;
mod factory;

pub use option::{ArchiveMode, ArchiveOption, ArchivePipeline, CaptureStream};
pub use source::{ArchiveSource, ArchiveSourceType, SourceSet};
pub use backend::Archive;
pub use opt_archive::OptArchive;
pub use text_archive::TextArchive;
pub use grid_archive::GridArchive;
pub use registry::{grid_factory, opt_factory, text_factory, BackendFactory, FormatRegistry};
pub use factory::{ArchiveFactory, FileSelector};
