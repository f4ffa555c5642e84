//! Capture frames and frame groups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{CallTreeNode, DataResponse};

/// Raw records backing a run of consecutive event frames.
///
/// Frames refer to a group through an `Arc`; two frames share a group when
/// their `Arc`s point to the same allocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameGroup {
    pub responses: Vec<DataResponse>,
}

impl FrameGroup {
    pub fn new(responses: Vec<DataResponse>) -> Self {
        Self { responses }
    }

    pub fn shared(responses: Vec<DataResponse>) -> Arc<Self> {
        Arc::new(Self::new(responses))
    }
}

/// An event-tree snapshot. `root` is a synthetic wrapper whose first child is
/// the frame's real top-level scope.
#[derive(Clone, Debug)]
pub struct EventFrame {
    pub description: String,
    pub root: CallTreeNode,
    pub group: Arc<FrameGroup>,
}

impl EventFrame {
    /// The subtree exported for this frame, if the root has any children.
    pub fn first_scope(&self) -> Option<&CallTreeNode> {
        self.root.children.first()
    }
}

/// A raw sampling record captured outside any frame group.
#[derive(Clone, Debug)]
pub struct SamplingFrame {
    pub description: String,
    pub response: DataResponse,
}

/// One capture sample unit.
#[derive(Clone, Debug)]
pub enum Frame {
    Event(EventFrame),
    Sampling(SamplingFrame),
}

impl Frame {
    pub fn event(description: impl Into<String>, root: CallTreeNode, group: Arc<FrameGroup>) -> Self {
        Self::Event(EventFrame {
            description: description.into(),
            root,
            group,
        })
    }

    pub fn sampling(description: impl Into<String>, response: DataResponse) -> Self {
        Self::Sampling(SamplingFrame {
            description: description.into(),
            response,
        })
    }

    pub fn description(&self) -> &str {
        match self {
            Frame::Event(f) => &f.description,
            Frame::Sampling(f) => &f.description,
        }
    }
}
