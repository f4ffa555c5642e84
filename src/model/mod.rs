//! Capture data model.
//!
//! Plain value types handed to the archive engine just before an
//! open/save call:
//! - [`CallTreeNode`] / [`Tag`] - Call-tree nodes and their display tags
//! - [`Frame`] / [`FrameGroup`] - Capture frames and the raw records they share
//! - [`DataResponse`] - Serializable binary record
//! - [`BoardItem`] - Aggregated per-function row of a summary view

mod node;
mod frame;
mod response;
mod board;

pub use node::{CallTreeNode, NodeKind, Tag};
pub use frame::{EventFrame, Frame, FrameGroup, SamplingFrame};
pub use response::{DataResponse, RESPONSE_HEADER_SIZE};
pub use board::BoardItem;
