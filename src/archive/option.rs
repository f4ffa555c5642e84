//! Parameters and results of one archive operation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::{ArchiveSource, ArchiveSourceType};
use crate::opt::{ContainerHeader, Payload, RecordReader};

/// Payload stream of an opened capture container.
pub type CaptureStream = Payload<BufReader<File>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArchiveMode {
    #[default]
    Open,
    Save,
}

/// Who consumes the result. Carried for callers; open and save behave the
/// same for both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArchivePipeline {
    #[default]
    Internal,
    Standalone,
}

/// One open or save request. Owned by the caller; the orchestrator fills in
/// `file_path` (when a file is selected), `header` and `stream` (after a
/// successful open).
pub struct ArchiveOption {
    pub file_path: Option<PathBuf>,
    pub mode: ArchiveMode,
    pub pipeline: ArchivePipeline,
    pub sources: Vec<ArchiveSource>,
    pub source_type: ArchiveSourceType,
    /// Header validated by the last successful open.
    pub header: Option<ContainerHeader>,
    pub stream: Option<CaptureStream>,
}

impl ArchiveOption {
    /// Request to open the capture at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            mode: ArchiveMode::Open,
            pipeline: ArchivePipeline::Internal,
            sources: Vec::new(),
            source_type: ArchiveSourceType::Frame,
            header: None,
            stream: None,
        }
    }

    /// Request to save `sources` as `source_type` to `path`.
    pub fn save(path: impl Into<PathBuf>, source_type: ArchiveSourceType, sources: Vec<ArchiveSource>) -> Self {
        Self {
            file_path: Some(path.into()),
            mode: ArchiveMode::Save,
            pipeline: ArchivePipeline::Internal,
            sources,
            source_type,
            header: None,
            stream: None,
        }
    }

    pub fn with_pipeline(mut self, pipeline: ArchivePipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Drop the path so the orchestrator asks the file selector for one.
    pub fn without_path(mut self) -> Self {
        self.file_path = None;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Take the opened payload stream.
    pub fn take_stream(&mut self) -> Option<CaptureStream> {
        self.stream.take()
    }

    /// Take the opened payload stream as a record iterator.
    pub fn take_records(&mut self) -> Option<RecordReader<CaptureStream>> {
        self.stream.take().map(RecordReader::new)
    }
}

impl std::fmt::Debug for ArchiveOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveOption")
            .field("file_path", &self.file_path)
            .field("mode", &self.mode)
            .field("pipeline", &self.pipeline)
            .field("sources", &self.sources.len())
            .field("source_type", &self.source_type)
            .field("header", &self.header)
            .field("stream", &self.stream.as_ref().map(|s| s.is_compressed()))
            .finish()
    }
}
