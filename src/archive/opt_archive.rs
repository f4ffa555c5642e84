//! `.opt` container backend.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use super::output::PendingOutput;
use super::{Archive, ArchiveOption, SourceSet};
use crate::opt::{open_payload, open_sink, read_header, write_frames, write_header, ContainerHeader};
use crate::settings::ArchiveSettings;
use crate::util::{Error, Result};

pub struct OptArchive {
    header: ContainerHeader,
}

impl OptArchive {
    pub fn new(settings: &ArchiveSettings) -> Self {
        Self {
            header: ContainerHeader::new(settings.compress_captures),
        }
    }
}

impl Archive for OptArchive {
    fn name(&self) -> &'static str {
        "opt"
    }

    fn open(&self, option: &mut ArchiveOption) -> Result<()> {
        let path = option
            .file_path
            .clone()
            .ok_or_else(|| Error::other("no capture file given"))?;
        if !path.is_file() {
            return Err(Error::SourceMissing(path));
        }

        let mut stream = BufReader::new(File::open(&path)?);
        let header = read_header(&mut stream)?;
        tracing::debug!(version = header.version, compressed = header.is_compressed, "opened {}", path.display());

        option.stream = Some(open_payload(stream, &header));
        option.header = Some(header);
        Ok(())
    }

    fn save(&self, option: &mut ArchiveOption) -> Result<()> {
        let frames = match SourceSet::resolve(option.source_type, &option.sources)? {
            SourceSet::Frame(frames) => frames,
            other => {
                return Err(Error::UnsupportedSourceType {
                    backend: self.name(),
                    source_type: other.source_type(),
                })
            }
        };
        let path = option
            .file_path
            .as_deref()
            .ok_or_else(|| Error::other("no destination file given"))?;

        let (guard, file) = PendingOutput::create(path)?;
        {
            let mut stream = BufWriter::new(file);
            write_header(&mut stream, &self.header)?;
            let mut sink = open_sink(stream, &self.header);
            let stats = write_frames(frames, &mut sink)?;
            let stream = sink.finish()?;
            stream.into_inner().map_err(|e| e.into_error())?.sync_all()?;
            tracing::info!(records = stats.records, "saved {} frames to {}", frames.len(), guard.path().display());
        }
        guard.commit()?;
        Ok(())
    }
}
