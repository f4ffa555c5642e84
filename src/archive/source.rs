//! Export sources and source-set validation.

use std::fmt;
use std::sync::Arc;

use crate::model::{BoardItem, CallTreeNode, Frame, FrameGroup};
use crate::util::{Error, Result};

/// What an archive operation is asked to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveSourceType {
    Node,
    Frame,
    Group,
    View,
    /// Cross-reference of one node's tags across a frame sequence.
    Tag,
}

impl fmt::Display for ArchiveSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Node => "Node",
            Self::Frame => "Frame",
            Self::Group => "Group",
            Self::View => "View",
            Self::Tag => "Tag",
        };
        f.write_str(s)
    }
}

/// One input to an archive operation.
#[derive(Clone, Debug)]
pub enum ArchiveSource {
    Node(CallTreeNode),
    Frame(Vec<Frame>),
    Group(Arc<FrameGroup>),
    View(Vec<BoardItem>),
}

impl ArchiveSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "NodeSource",
            Self::Frame(_) => "FrameSource",
            Self::Group(_) => "GroupSource",
            Self::View(_) => "ViewSource",
        }
    }
}

/// A source list checked against its declared [`ArchiveSourceType`].
#[derive(Clone, Copy, Debug)]
pub enum SourceSet<'a> {
    Node(&'a CallTreeNode),
    Frame(&'a [Frame]),
    View(&'a [BoardItem]),
    Tag {
        node: &'a CallTreeNode,
        frames: &'a [Frame],
    },
}

impl<'a> SourceSet<'a> {
    /// Validate `sources` for `source_type`.
    ///
    /// The declared type decides the expected shape; the variants present
    /// are only checked against it, never used to infer it. Group exports
    /// have no defined format and fail with [`Error::NotImplemented`].
    pub fn resolve(source_type: ArchiveSourceType, sources: &'a [ArchiveSource]) -> Result<Self> {
        let expected = match source_type {
            ArchiveSourceType::Group => return Err(Error::NotImplemented("frame group export")),
            ArchiveSourceType::Tag => 2,
            _ => 1,
        };
        if sources.len() != expected {
            return Err(Error::malformed(
                source_type,
                format!("expected {} source(s), got {}", expected, sources.len()),
            ));
        }

        let mismatch = |source: &ArchiveSource, wanted: &str| {
            Error::malformed(source_type, format!("expected {}, got {}", wanted, source.kind()))
        };

        match (source_type, sources) {
            (ArchiveSourceType::Node, [ArchiveSource::Node(node)]) => Ok(Self::Node(node)),
            (ArchiveSourceType::Node, [other]) => Err(mismatch(other, "NodeSource")),
            (ArchiveSourceType::Frame, [ArchiveSource::Frame(frames)]) => Ok(Self::Frame(frames)),
            (ArchiveSourceType::Frame, [other]) => Err(mismatch(other, "FrameSource")),
            (ArchiveSourceType::View, [ArchiveSource::View(rows)]) => Ok(Self::View(rows)),
            (ArchiveSourceType::View, [other]) => Err(mismatch(other, "ViewSource")),
            (ArchiveSourceType::Tag, [ArchiveSource::Node(node), ArchiveSource::Frame(frames)]) => {
                Ok(Self::Tag { node, frames })
            }
            (ArchiveSourceType::Tag, [ArchiveSource::Node(_), other]) => Err(mismatch(other, "FrameSource")),
            (ArchiveSourceType::Tag, [other, _]) => Err(mismatch(other, "NodeSource")),
            _ => Err(Error::malformed(source_type, "unexpected source layout")),
        }
    }

    pub fn source_type(&self) -> ArchiveSourceType {
        match self {
            Self::Node(_) => ArchiveSourceType::Node,
            Self::Frame(_) => ArchiveSourceType::Frame,
            Self::View(_) => ArchiveSourceType::View,
            Self::Tag { .. } => ArchiveSourceType::Tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> ArchiveSource {
        ArchiveSource::Node(CallTreeNode::event("n"))
    }

    fn frames() -> ArchiveSource {
        ArchiveSource::Frame(Vec::new())
    }

    #[test]
    fn test_node_requires_single_node_source() {
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Node, &[]),
            Err(Error::MalformedSourceSet { .. })
        ));
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Node, &[frames()]),
            Err(Error::MalformedSourceSet { .. })
        ));
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Node, &[node(), node()]),
            Err(Error::MalformedSourceSet { .. })
        ));
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Node, &[node()]),
            Ok(SourceSet::Node(_))
        ));
    }

    #[test]
    fn test_tag_requires_node_then_frames() {
        let sources = [node(), frames()];
        let set = SourceSet::resolve(ArchiveSourceType::Tag, &sources).unwrap();
        assert_eq!(set.source_type(), ArchiveSourceType::Tag);

        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Tag, &[frames(), node()]),
            Err(Error::MalformedSourceSet { .. })
        ));
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Tag, &[node()]),
            Err(Error::MalformedSourceSet { .. })
        ));
    }

    #[test]
    fn test_view_and_frame_shapes() {
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::View, &[ArchiveSource::View(Vec::new())]),
            Ok(SourceSet::View(_))
        ));
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Frame, &[node()]),
            Err(Error::MalformedSourceSet { .. })
        ));
    }

    #[test]
    fn test_group_is_not_implemented() {
        let sources = [ArchiveSource::Group(FrameGroup::shared(Vec::new()))];
        assert!(matches!(
            SourceSet::resolve(ArchiveSourceType::Group, &sources),
            Err(Error::NotImplemented(_))
        ));
    }
}
