//! Container header codec.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::format::*;
use crate::util::{Error, Result};

/// Decoded container header. The magic is implied: a header only exists
/// once the magic has been verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u16,
    pub is_compressed: bool,
}

impl ContainerHeader {
    pub fn new(is_compressed: bool) -> Self {
        Self {
            version: CURRENT_VERSION,
            is_compressed,
        }
    }

    /// Flags word as stored on disk.
    #[inline]
    pub fn flags(&self) -> u16 {
        if self.is_compressed {
            FLAG_COMPRESSED
        } else {
            0
        }
    }
}

impl Default for ContainerHeader {
    /// New captures are compressed.
    fn default() -> Self {
        Self::new(true)
    }
}

/// Consume the fixed-size prefix from `stream`.
///
/// Fails with [`Error::InvalidHeader`] when the magic does not match or the
/// stream ends early. Unknown versions and reserved flag bits are accepted.
pub fn read_header<R: Read>(stream: &mut R) -> Result<ContainerHeader> {
    let mut buf = [0u8; HEADER_SIZE];
    stream.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::InvalidHeader,
        _ => Error::Io(e),
    })?;

    let mut cursor = &buf[..];
    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != OPT_MAGIC {
        return Err(Error::InvalidHeader);
    }
    let version = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u16::<LittleEndian>()?;

    Ok(ContainerHeader {
        version,
        is_compressed: flags & FLAG_COMPRESSED != 0,
    })
}

/// Write the fixed-size prefix to `stream` and flush it, before any payload.
pub fn write_header<W: Write>(stream: &mut W, header: &ContainerHeader) -> Result<()> {
    let mut buf = [0u8; HEADER_SIZE];
    {
        let mut cursor = &mut buf[..];
        cursor.write_u32::<LittleEndian>(OPT_MAGIC)?;
        cursor.write_u16::<LittleEndian>(header.version)?;
        cursor.write_u16::<LittleEndian>(header.flags())?;
    }
    stream.write_all(&buf)?;
    stream.flush()?;
    Ok(())
}
