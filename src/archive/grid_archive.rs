//! Cell-grid (workbook) backend.

use std::sync::Arc;

use super::output::PendingOutput;
use super::{Archive, ArchiveOption, SourceSet};
use crate::export::flatten::{visit_event_nodes, TreeRow};
use crate::export::{GridSink, WorkbookProvider};
use crate::model::{CallTreeNode, Frame};
use crate::settings::ArchiveSettings;
use crate::util::{Error, Result};

/// Sheet name used for aggregated view exports.
const VIEW_SHEET: &str = "Frame";

pub struct GridArchive {
    provider: Arc<dyn WorkbookProvider>,
    tag_delimiter: String,
}

impl GridArchive {
    pub fn new(provider: Arc<dyn WorkbookProvider>, settings: &ArchiveSettings) -> Self {
        Self {
            provider,
            tag_delimiter: settings.tag_delimiter.clone(),
        }
    }

    fn write_tree(&self, sink: &mut GridSink<'_>, root: &CallTreeNode) -> Result<()> {
        sink.write_tree_header()?;
        let delimiter = self.tag_delimiter.as_str();
        visit_event_nodes(root, |node| sink.write_tree_row(&TreeRow::from_node(node, delimiter)))
    }

    /// One sheet per frame, named after the frame. Frames without an
    /// exported subtree still get their (empty) sheet.
    fn write_frames(&self, sink: &mut GridSink<'_>, frames: &[Frame]) -> Result<()> {
        for frame in frames {
            sink.begin_sheet(frame.description())?;
            if let Frame::Event(f) = frame {
                if let Some(scope) = f.first_scope() {
                    self.write_tree(sink, scope)?;
                }
            }
        }
        Ok(())
    }
}

impl Archive for GridArchive {
    fn name(&self) -> &'static str {
        "workbook"
    }

    fn open(&self, _option: &mut ArchiveOption) -> Result<()> {
        Err(Error::NotImplemented("reading workbooks"))
    }

    fn save(&self, option: &mut ArchiveOption) -> Result<()> {
        let set = SourceSet::resolve(option.source_type, &option.sources)?;
        let path = option
            .file_path
            .as_deref()
            .ok_or_else(|| Error::other("no destination file given"))?;

        let mut workbook = self.provider.create()?;
        {
            let mut sink = GridSink::new(workbook.as_mut());
            match set {
                SourceSet::Node(node) => {
                    sink.begin_sheet(&format!("NodeEvent-{}", node.duration))?;
                    self.write_tree(&mut sink, node)?;
                }
                SourceSet::Frame(frames) => self.write_frames(&mut sink, frames)?,
                SourceSet::View(rows) => {
                    sink.begin_sheet(VIEW_SHEET)?;
                    sink.write_view_header()?;
                    for item in rows {
                        sink.write_view_row(item)?;
                    }
                }
                SourceSet::Tag { .. } => {
                    return Err(Error::UnsupportedSourceType {
                        backend: self.name(),
                        source_type: set.source_type(),
                    })
                }
            }
        }

        let guard = PendingOutput::new(path);
        workbook.save_as(guard.staging())?;
        guard.commit()?;
        tracing::info!("exported {} to {}", set.source_type(), path.display());
        Ok(())
    }
}
