//! Delimited text (`.csv`) backend.

use std::io::Write;

use super::output::PendingOutput;
use super::{Archive, ArchiveOption, SourceSet};
use crate::export::flatten::{exported_frames, tag_matches, visit_event_nodes, TreeRow};
use crate::export::TextSink;
use crate::model::{BoardItem, CallTreeNode, Frame};
use crate::settings::ArchiveSettings;
use crate::util::{Error, Result};

pub struct TextArchive {
    settings: ArchiveSettings,
}

impl TextArchive {
    pub fn new(settings: &ArchiveSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    fn write_tree<W: Write>(&self, sink: &mut TextSink<W>, root: &CallTreeNode) -> Result<()> {
        let delimiter = self.settings.tag_delimiter.as_str();
        visit_event_nodes(root, |node| sink.write_tree_row(&TreeRow::from_node(node, delimiter)))
    }

    fn write_node<W: Write>(&self, sink: &mut TextSink<W>, node: &CallTreeNode) -> Result<()> {
        sink.write_tree_header()?;
        self.write_tree(sink, node)
    }

    /// One header plus subtree per exported frame.
    fn write_frames<W: Write>(&self, sink: &mut TextSink<W>, frames: &[Frame]) -> Result<()> {
        for (_, scope) in exported_frames(frames) {
            sink.write_tree_header()?;
            self.write_tree(sink, scope)?;
        }
        Ok(())
    }

    fn write_view<W: Write>(&self, sink: &mut TextSink<W>, rows: &[BoardItem]) -> Result<()> {
        sink.write_view_header()?;
        for item in rows {
            sink.write_view_row(item)?;
        }
        Ok(())
    }

    fn write_tags<W: Write>(&self, sink: &mut TextSink<W>, node: &CallTreeNode, frames: &[Frame]) -> Result<()> {
        sink.write_tag_header(&node.tags)?;
        for values in tag_matches(node, frames) {
            sink.write_tag_values(&values)?;
        }
        Ok(())
    }
}

impl Archive for TextArchive {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn open(&self, _option: &mut ArchiveOption) -> Result<()> {
        Err(Error::NotImplemented("reading delimited text exports"))
    }

    fn save(&self, option: &mut ArchiveOption) -> Result<()> {
        let set = SourceSet::resolve(option.source_type, &option.sources)?;
        let path = option
            .file_path
            .as_deref()
            .ok_or_else(|| Error::other("no destination file given"))?;

        let (guard, file) = PendingOutput::create(path)?;
        let lines = {
            let mut sink = TextSink::new(file, &self.settings);
            match set {
                SourceSet::Node(node) => self.write_node(&mut sink, node)?,
                SourceSet::Frame(frames) => self.write_frames(&mut sink, frames)?,
                SourceSet::View(rows) => self.write_view(&mut sink, rows)?,
                SourceSet::Tag { node, frames } => self.write_tags(&mut sink, node, frames)?,
            }
            let lines = sink.lines();
            sink.finish()?.sync_all()?;
            lines
        };
        tracing::info!(lines, "exported {} to {}", set.source_type(), guard.path().display());
        guard.commit()?;
        Ok(())
    }
}
