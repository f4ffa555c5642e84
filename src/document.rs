//! JSON capture documents.
//!
//! A capture document is a serialized snapshot of the data a profiler UI
//! would hand to the archive engine. Event frames refer to frame groups by
//! index so that consecutive frames can share one group.
//!
//! ```json
//! {
//!   "groups": [{ "responses": [{ "response_type": 1, "payload": [1, 2] }] }],
//!   "frames": [
//!     { "kind": "event", "description": "Frame 1", "group": 0,
//!       "root": { "name": "root", "children": [{ "name": "Main", "duration": 16.6 }] } },
//!     { "kind": "sampling", "description": "Samples", "response": { "response_type": 7 } }
//!   ],
//!   "node": { "name": "Update", "tags": [{ "name": "Count", "formatted_value": "" }] },
//!   "view": [{ "function": "Main", "total": 16.6, "count": 1 }]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::archive::{ArchiveSource, ArchiveSourceType};
use crate::model::{BoardItem, CallTreeNode, DataResponse, Frame, FrameGroup};
use crate::util::{Error, Result};

/// Serialized form of a [`Frame`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FrameEntry {
    Event {
        #[serde(default)]
        description: String,
        root: CallTreeNode,
        group: usize,
    },
    Sampling {
        #[serde(default)]
        description: String,
        response: DataResponse,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDocument {
    pub groups: Vec<FrameGroup>,
    pub frames: Vec<FrameEntry>,
    /// Subject of Node exports.
    pub node: Option<CallTreeNode>,
    pub view: Vec<BoardItem>,
    /// Tag source of Tag exports; falls back to `node`.
    pub tag_node: Option<CallTreeNode>,
}

impl CaptureDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Build the frame sequence, sharing one `Arc` per referenced group.
    pub fn frames(&self) -> Result<Vec<Frame>> {
        let groups: Vec<Arc<FrameGroup>> = self.groups.iter().cloned().map(Arc::new).collect();
        let mut frames = Vec::with_capacity(self.frames.len());

        for entry in &self.frames {
            let frame = match entry {
                FrameEntry::Event {
                    description,
                    root,
                    group,
                } => {
                    let shared = groups.get(*group).ok_or_else(|| {
                        Error::other(format!(
                            "frame '{}' refers to group {} of {}",
                            description,
                            group,
                            groups.len()
                        ))
                    })?;
                    Frame::event(description.clone(), root.clone(), Arc::clone(shared))
                }
                FrameEntry::Sampling {
                    description,
                    response,
                } => Frame::sampling(description.clone(), response.clone()),
            };
            frames.push(frame);
        }
        Ok(frames)
    }

    fn node(&self) -> Result<CallTreeNode> {
        self.node
            .clone()
            .ok_or_else(|| Error::other("capture document has no \"node\""))
    }

    /// Source list for exporting this document as `source_type`.
    pub fn sources(&self, source_type: ArchiveSourceType) -> Result<Vec<ArchiveSource>> {
        Ok(match source_type {
            ArchiveSourceType::Node => vec![ArchiveSource::Node(self.node()?)],
            ArchiveSourceType::Frame => vec![ArchiveSource::Frame(self.frames()?)],
            ArchiveSourceType::View => vec![ArchiveSource::View(self.view.clone())],
            ArchiveSourceType::Tag => vec![
                ArchiveSource::Node(match &self.tag_node {
                    Some(node) => node.clone(),
                    None => self.node()?,
                }),
                ArchiveSource::Frame(self.frames()?),
            ],
            ArchiveSourceType::Group => self
                .groups
                .iter()
                .take(1)
                .map(|g| ArchiveSource::Group(Arc::new(g.clone())))
                .collect(),
        })
    }
}
