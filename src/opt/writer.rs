//! Group-boundary record writer.
//!
//! Frames are scanned in order. Consecutive event frames sharing a group are
//! coalesced; the group's records are flushed once, when the group changes,
//! when a sampling frame arrives, or at the end of the sequence. Sampling
//! frames never take part in grouping.

use std::convert::Infallible;
use std::io::Write;
use std::sync::Arc;

use crate::model::{DataResponse, Frame, FrameGroup};
use crate::util::Result;

/// Counters reported by [`write_frames`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub records: usize,
    pub groups: usize,
    pub bytes: u64,
}

enum Flush<'a> {
    Group(&'a FrameGroup),
    Sampling(&'a DataResponse),
}

fn walk<'a, E>(
    frames: &'a [Frame],
    mut visit: impl FnMut(Flush<'a>) -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    let mut pending: Option<&'a Arc<FrameGroup>> = None;

    for frame in frames {
        match frame {
            Frame::Event(f) => {
                if let Some(group) = pending {
                    if !Arc::ptr_eq(group, &f.group) {
                        visit(Flush::Group(group))?;
                    }
                }
                pending = Some(&f.group);
            }
            Frame::Sampling(f) => {
                if let Some(group) = pending.take() {
                    visit(Flush::Group(group))?;
                }
                visit(Flush::Sampling(&f.response))?;
            }
        }
    }

    if let Some(group) = pending {
        visit(Flush::Group(group))?;
    }
    Ok(())
}

/// Records of `frames` in the order they are written to a container.
pub fn plan_records(frames: &[Frame]) -> Vec<&DataResponse> {
    let mut out = Vec::new();
    let walked: std::result::Result<(), Infallible> = walk(frames, |flush| {
        match flush {
            Flush::Group(group) => out.extend(group.responses.iter()),
            Flush::Sampling(response) => out.push(response),
        }
        Ok(())
    });
    match walked {
        Ok(()) => out,
        Err(never) => match never {},
    }
}

/// Serialize every record of `frames` to `out` in group-boundary order.
pub fn write_frames<W: Write>(frames: &[Frame], out: &mut W) -> Result<WriteStats> {
    let mut stats = WriteStats::default();

    walk(frames, |flush| -> Result<()> {
        let records: &[DataResponse] = match flush {
            Flush::Group(group) => {
                stats.groups += 1;
                &group.responses
            }
            Flush::Sampling(response) => std::slice::from_ref(response),
        };
        for response in records {
            response.write_to(out)?;
            stats.records += 1;
            stats.bytes += response.serialized_len() as u64;
        }
        Ok(())
    })?;

    tracing::debug!(records = stats.records, groups = stats.groups, bytes = stats.bytes, "frames written");
    Ok(stats)
}
