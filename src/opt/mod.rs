//! The `.opt` capture container.
//!
//! A container is an 8-byte [`ContainerHeader`] followed by a payload stream
//! of serialized [`DataResponse`](crate::model::DataResponse) records. The
//! payload is gzip-compressed when the header's compression flag is set.
//!
//! - [`read_header`] / [`write_header`] - Fixed-size prefix codec
//! - [`open_payload`] / [`open_sink`] - Transparent (de)compression filters
//! - [`write_frames`] - Group-boundary record writer for frame sequences
//! - [`RecordReader`] - Iterates records back out of a payload

pub mod format;
mod header;
mod codec;
mod writer;
mod reader;

pub use header::{read_header, write_header, ContainerHeader};
pub use codec::{open_payload, open_sink, Payload, Sink};
pub use writer::{plan_records, write_frames, WriteStats};
pub use reader::RecordReader;
