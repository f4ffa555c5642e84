//! Call-tree nodes and tags.

use serde::{Deserialize, Serialize};

/// Separator used when deriving a node's path from its ancestry.
pub const PATH_SEPARATOR: &str = "/";

/// A display tag attached to a node: name plus its preformatted value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub formatted_value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, formatted_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            formatted_value: formatted_value.into(),
        }
    }
}

/// Which tree a node was built from.
///
/// Only [`NodeKind::Event`] nodes are exported; a sampling node and its
/// whole subtree are skipped by the flattener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Event,
    Sampling,
}

/// A node of a captured call tree. Children are owned exclusively.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallTreeNode {
    pub kind: NodeKind,
    pub name: String,
    /// Exclusive time in milliseconds.
    pub self_duration: f64,
    pub self_percent: f64,
    /// Inclusive time in milliseconds.
    pub duration: f64,
    pub total_percent: f64,
    pub path: String,
    pub tags: Vec<Tag>,
    pub children: Vec<CallTreeNode>,
}

impl CallTreeNode {
    /// Create an event node with zeroed timings.
    pub fn event(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Event,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a sampling node with zeroed timings.
    pub fn sampling(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Sampling,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set self/total timings (milliseconds and percentages).
    pub fn with_timing(
        mut self,
        self_duration: f64,
        self_percent: f64,
        duration: f64,
        total_percent: f64,
    ) -> Self {
        self.self_duration = self_duration;
        self.self_percent = self_percent;
        self.duration = duration;
        self.total_percent = total_percent;
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    pub fn with_child(mut self, child: CallTreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: CallTreeNode) {
        self.children.push(child);
    }

    #[inline]
    pub fn is_event(&self) -> bool {
        self.kind == NodeKind::Event
    }

    /// Number of nodes the flattener emits for this subtree (inclusive).
    pub fn event_node_count(&self) -> usize {
        match self.kind {
            NodeKind::Event => 1 + self.children.iter().map(Self::event_node_count).sum::<usize>(),
            NodeKind::Sampling => 0,
        }
    }

    /// Rewrite `path` for this node and every descendant from the names of
    /// their ancestors. This node's path becomes its own name.
    pub fn derive_paths(&mut self) {
        self.path = self.name.clone();
        let prefix = self.path.clone();
        for child in &mut self.children {
            child.derive_paths_under(&prefix);
        }
    }

    fn derive_paths_under(&mut self, prefix: &str) {
        self.path = format!("{prefix}{PATH_SEPARATOR}{}", self.name);
        let prefix = self.path.clone();
        for child in &mut self.children {
            child.derive_paths_under(&prefix);
        }
    }
}
