//! Tree flattening.
//!
//! Rows are produced by a pre-order, depth-first walk: a parent is emitted
//! before its children and children keep their stored order, so the same
//! tree always flattens to the same row sequence. Sampling nodes are not
//! exported and neither is anything beneath them.

use std::convert::Infallible;

use crate::model::{CallTreeNode, EventFrame, Frame, NodeKind};

/// One exported call-tree row.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeRow<'a> {
    pub name: &'a str,
    pub self_duration: f64,
    pub self_percent: f64,
    pub duration: f64,
    pub total_percent: f64,
    pub path: &'a str,
    /// Tag values joined with the tag delimiter. Empty when the node has no tags.
    pub tags: String,
    /// Number of tags on the node.
    pub tag_count: usize,
}

impl<'a> TreeRow<'a> {
    pub fn from_node(node: &'a CallTreeNode, tag_delimiter: &str) -> Self {
        Self {
            name: &node.name,
            self_duration: node.self_duration,
            self_percent: node.self_percent,
            duration: node.duration,
            total_percent: node.total_percent,
            path: &node.path,
            tags: join_tag_values(node, tag_delimiter),
            tag_count: node.tags.len(),
        }
    }
}

/// Concatenate each tag's formatted value followed by `delimiter`, then trim
/// the trailing delimiter.
pub fn join_tag_values(node: &CallTreeNode, delimiter: &str) -> String {
    let mut out = String::new();
    for tag in &node.tags {
        out.push_str(&tag.formatted_value);
        out.push_str(delimiter);
    }
    trim_end_delimiter(&mut out, delimiter);
    out
}

/// Trim every trailing occurrence of `delimiter`.
fn trim_end_delimiter(s: &mut String, delimiter: &str) {
    if delimiter.is_empty() {
        return;
    }
    while s.ends_with(delimiter) {
        s.truncate(s.len() - delimiter.len());
    }
}

/// Visit the nodes of `root`'s subtree that produce rows, in export order.
pub fn visit_event_nodes<'a, E>(
    root: &'a CallTreeNode,
    mut visit: impl FnMut(&'a CallTreeNode) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind {
            NodeKind::Event => {
                visit(node)?;
                stack.extend(node.children.iter().rev());
            }
            NodeKind::Sampling => {}
        }
    }
    Ok(())
}

/// Flatten `root` into rows.
pub fn flatten_tree<'a>(root: &'a CallTreeNode, tag_delimiter: &str) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::with_capacity(root.event_node_count());
    let visited: Result<(), Infallible> = visit_event_nodes(root, |node| {
        rows.push(TreeRow::from_node(node, tag_delimiter));
        Ok(())
    });
    match visited {
        Ok(()) => rows,
        Err(never) => match never {},
    }
}

/// The event frames of `frames` that export a subtree, paired with the
/// subtree (the first child of the frame's synthetic root).
pub fn exported_frames(frames: &[Frame]) -> impl Iterator<Item = (&EventFrame, &CallTreeNode)> {
    frames.iter().filter_map(|frame| match frame {
        Frame::Event(f) => f.first_scope().map(|scope| (f, scope)),
        Frame::Sampling(_) => None,
    })
}

/// Tag values of every occurrence of `source` inside `frames`.
///
/// For each event frame, every event node below the synthetic root whose
/// name equals `source.name` and that carries at least one tag yields one
/// entry holding its tag values in tag order.
pub fn tag_matches<'a>(source: &CallTreeNode, frames: &'a [Frame]) -> Vec<Vec<&'a str>> {
    let mut out = Vec::new();
    for frame in frames {
        let Frame::Event(f) = frame else {
            continue;
        };
        let mut stack: Vec<&CallTreeNode> = f.root.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.is_event() && node.name == source.name && !node.tags.is_empty() {
                out.push(node.tags.iter().map(|t| t.formatted_value.as_str()).collect());
            }
            stack.extend(node.children.iter().rev());
        }
    }
    out
}
