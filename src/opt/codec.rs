//! Transparent payload (de)compression.
//!
//! Compressed payloads are a single gzip member. Writes use the fastest
//! level: capture files are transient and throughput matters more than
//! ratio.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::ContainerHeader;

/// Readable payload stream, raw or gzip-decoded.
pub enum Payload<R: Read> {
    Plain(R),
    Compressed(GzDecoder<R>),
}

impl<R: Read> Payload<R> {
    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self, Payload::Compressed(_))
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> R {
        match self {
            Payload::Plain(r) => r,
            Payload::Compressed(d) => d.into_inner(),
        }
    }
}

impl<R: Read> Read for Payload<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Payload::Plain(r) => r.read(buf),
            Payload::Compressed(d) => d.read(buf),
        }
    }
}

/// Writable payload stream, raw or gzip-encoding.
///
/// Must be closed with [`Sink::finish`] so the gzip trailer is written and
/// the underlying stream is flushed.
pub enum Sink<W: Write> {
    Plain(W),
    Compressed(GzEncoder<W>),
}

impl<W: Write> Sink<W> {
    /// Finish the compression frame (if any), flush, and return the raw stream.
    pub fn finish(self) -> io::Result<W> {
        let mut inner = match self {
            Sink::Plain(w) => w,
            Sink::Compressed(e) => e.finish()?,
        };
        inner.flush()?;
        Ok(inner)
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Compressed(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Compressed(e) => e.flush(),
        }
    }
}

/// Wrap a stream positioned just after the header for reading the payload.
pub fn open_payload<R: Read>(stream: R, header: &ContainerHeader) -> Payload<R> {
    if header.is_compressed {
        Payload::Compressed(GzDecoder::new(stream))
    } else {
        Payload::Plain(stream)
    }
}

/// Wrap a stream positioned just after the header for writing the payload.
///
/// The raw stream is owned by the sink from here on; nothing else may write
/// to it until [`Sink::finish`] hands it back.
pub fn open_sink<W: Write>(stream: W, header: &ContainerHeader) -> Sink<W> {
    if header.is_compressed {
        Sink::Compressed(GzEncoder::new(stream, Compression::fast()))
    } else {
        Sink::Plain(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        let header = ContainerHeader::new(false);
        let mut sink = open_sink(Vec::new(), &header);
        sink.write_all(b"raw bytes").unwrap();
        let out = sink.finish().unwrap();
        assert_eq!(out, b"raw bytes");

        let mut payload = open_payload(&out[..], &header);
        assert!(!payload.is_compressed());
        let mut back = Vec::new();
        payload.read_to_end(&mut back).unwrap();
        assert_eq!(back, b"raw bytes");
    }

    #[test]
    fn test_compressed_roundtrip() {
        let header = ContainerHeader::new(true);
        let original = b"frame frame frame frame ".repeat(200);

        let mut sink = open_sink(Vec::new(), &header);
        sink.write_all(&original).unwrap();
        let out = sink.finish().unwrap();
        assert!(out.len() < original.len());
        // gzip member magic
        assert_eq!(&out[0..2], &[0x1F, 0x8B]);

        let mut payload = open_payload(&out[..], &header);
        assert!(payload.is_compressed());
        let mut back = Vec::new();
        payload.read_to_end(&mut back).unwrap();
        assert_eq!(back, original);
    }
}
