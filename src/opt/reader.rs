//! Reading containers back.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{open_payload, read_header, ContainerHeader, Payload};
use crate::model::DataResponse;
use crate::util::{Error, Result};

/// Iterator over the records of a payload stream.
///
/// Stops after the first error.
pub struct RecordReader<R: Read> {
    stream: R,
    failed: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            failed: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.stream
    }
}

impl RecordReader<Payload<BufReader<File>>> {
    /// Open a container file, validate its header and position a reader on
    /// the first record.
    pub fn open(path: impl AsRef<Path>) -> Result<(ContainerHeader, Self)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::SourceMissing(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let mut stream = BufReader::new(file);
        let header = read_header(&mut stream)?;
        Ok((header, Self::new(open_payload(stream, &header))))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<DataResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match DataResponse::read_from(&mut self.stream) {
            Ok(Some(r)) => Some(Ok(r)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_until_end() {
        let mut buf = Vec::new();
        for i in 0..3u16 {
            DataResponse::new(i, vec![i as u8; 4]).write_to(&mut buf).unwrap();
        }

        let records: Vec<_> = RecordReader::new(&buf[..]).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].response_type, 2);
    }

    #[test]
    fn test_stops_after_error() {
        let mut buf = Vec::new();
        DataResponse::new(1, vec![1; 8]).write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);

        let mut reader = RecordReader::new(&buf[..]);
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.opt");
        assert!(matches!(RecordReader::open(&path), Err(Error::SourceMissing(_))));
    }
}
