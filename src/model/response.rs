//! Serializable binary records ("data responses") stored in `.opt` payloads.
//!
//! Wire layout, little-endian:
//!
//! ```text
//! version: u32 | size: u32 | response_type: u16 | application_id: u16 | payload[size]
//! ```

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::util::{Error, Result};

/// Size of the fixed record prefix in bytes.
pub const RESPONSE_HEADER_SIZE: usize = 12;

/// One raw capture record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataResponse {
    pub version: u32,
    pub response_type: u16,
    pub application_id: u16,
    pub payload: Vec<u8>,
}

impl DataResponse {
    pub fn new(response_type: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            version: 0,
            response_type,
            application_id: 0,
            payload: payload.into(),
        }
    }

    /// Total serialized size including the prefix.
    #[inline]
    pub fn serialized_len(&self) -> usize {
        RESPONSE_HEADER_SIZE + self.payload.len()
    }

    /// Write the record to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let size = u32::try_from(self.payload.len())
            .map_err(|_| Error::other(format!("record payload too large: {} bytes", self.payload.len())))?;
        w.write_u32::<LittleEndian>(self.version)?;
        w.write_u32::<LittleEndian>(size)?;
        w.write_u16::<LittleEndian>(self.response_type)?;
        w.write_u16::<LittleEndian>(self.application_id)?;
        w.write_all(&self.payload)?;
        Ok(())
    }

    /// Read the next record from `r`.
    ///
    /// Returns `Ok(None)` on a clean end of stream (no bytes left before the
    /// prefix). A stream that ends inside a record is an error.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Option<Self>> {
        let mut first = [0u8; 1];
        loop {
            match r.read(&mut first) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let mut rest = [0u8; RESPONSE_HEADER_SIZE - 1];
        r.read_exact(&mut rest)?;
        let mut prefix = [0u8; RESPONSE_HEADER_SIZE];
        prefix[0] = first[0];
        prefix[1..].copy_from_slice(&rest);

        let mut cursor = &prefix[..];
        let version = cursor.read_u32::<LittleEndian>()?;
        let size = cursor.read_u32::<LittleEndian>()? as usize;
        let response_type = cursor.read_u16::<LittleEndian>()?;
        let application_id = cursor.read_u16::<LittleEndian>()?;

        // The size field is untrusted; grow with the data actually present.
        let mut payload = Vec::new();
        r.by_ref().take(size as u64).read_to_end(&mut payload)?;
        if payload.len() != size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("record claims {} payload bytes, stream holds {}", size, payload.len()),
            )
            .into());
        }

        Ok(Some(Self {
            version,
            response_type,
            application_id,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_layout() {
        let mut resp = DataResponse::new(3, vec![0xAA, 0xBB]);
        resp.version = 7;
        resp.application_id = 1;

        let mut buf = Vec::new();
        resp.write_to(&mut buf).unwrap();

        assert_eq!(buf.len(), resp.serialized_len());
        assert_eq!(&buf[0..4], &7u32.to_le_bytes());
        assert_eq!(&buf[4..8], &2u32.to_le_bytes());
        assert_eq!(&buf[8..10], &3u16.to_le_bytes());
        assert_eq!(&buf[10..12], &1u16.to_le_bytes());
        assert_eq!(&buf[12..], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_deserialize_sequence() {
        let mut buf = Vec::new();
        DataResponse::new(1, b"first".to_vec()).write_to(&mut buf).unwrap();
        DataResponse::new(2, Vec::new()).write_to(&mut buf).unwrap();

        let mut r = &buf[..];
        let a = DataResponse::read_from(&mut r).unwrap().unwrap();
        let b = DataResponse::read_from(&mut r).unwrap().unwrap();
        assert_eq!(a.payload, b"first");
        assert_eq!(b.response_type, 2);
        assert!(DataResponse::read_from(&mut r).unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_is_error() {
        let mut buf = Vec::new();
        DataResponse::new(1, b"payload".to_vec()).write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 2);

        let mut r = &buf[..];
        assert!(matches!(DataResponse::read_from(&mut r), Err(Error::Io(_))));
    }

    #[test]
    fn test_oversized_size_field_is_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(b"tiny");

        let mut r = &buf[..];
        match DataResponse::read_from(&mut r) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }
}
