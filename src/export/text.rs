//! Delimited text sink.
//!
//! Without quoting, field values are written verbatim and a value that
//! contains the delimiter shifts the columns of its line. With quoting on,
//! such values are wrapped in double quotes (embedded quotes doubled).

use std::borrow::Cow;
use std::io::{BufWriter, Write};

use super::columns::{FrameTableColumn, FrameTreeColumn};
use super::flatten::TreeRow;
use crate::model::{BoardItem, Tag};
use crate::settings::ArchiveSettings;
use crate::util::Result;

pub struct TextSink<W: Write> {
    out: BufWriter<W>,
    delimiter: String,
    quote: bool,
    lines: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, settings: &ArchiveSettings) -> Self {
        Self {
            out: BufWriter::new(out),
            delimiter: settings.field_delimiter.clone(),
            quote: settings.quote_fields,
            lines: 0,
        }
    }

    /// Lines written so far.
    #[inline]
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn field<'s>(&self, value: &'s str) -> Cow<'s, str> {
        let needs_quotes = self.quote
            && (value.contains(self.delimiter.as_str())
                || value.contains('"')
                || value.contains('\n')
                || value.contains('\r'));
        if needs_quotes {
            Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Write one line of fields separated by the delimiter.
    pub fn write_line<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        for (i, value) in fields.iter().enumerate() {
            if i > 0 {
                self.out.write_all(self.delimiter.as_bytes())?;
            }
            let value = self.field(value.as_ref());
            self.out.write_all(value.as_bytes())?;
        }
        self.end_line()
    }

    /// Write one line where every field is followed by the delimiter,
    /// including the last.
    pub fn write_terminated_line<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        for value in fields {
            let value = self.field(value.as_ref());
            self.out.write_all(value.as_bytes())?;
            self.out.write_all(self.delimiter.as_bytes())?;
        }
        self.end_line()
    }

    fn end_line(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn write_tree_header(&mut self) -> Result<()> {
        let header: Vec<&str> = FrameTreeColumn::ALL.iter().map(|c| c.text_header()).collect();
        self.write_line(&header)
    }

    pub fn write_tree_row(&mut self, row: &TreeRow<'_>) -> Result<()> {
        self.write_line(&[
            Cow::Borrowed(row.name),
            Cow::Owned(row.self_duration.to_string()),
            Cow::Owned(row.self_percent.to_string()),
            Cow::Owned(row.duration.to_string()),
            Cow::Owned(row.total_percent.to_string()),
            Cow::Borrowed(row.path),
            Cow::Borrowed(row.tags.as_str()),
        ])
    }

    pub fn write_view_header(&mut self) -> Result<()> {
        let header: Vec<&str> = FrameTableColumn::ALL.iter().map(|c| c.text_header()).collect();
        self.write_line(&header)
    }

    pub fn write_view_row(&mut self, item: &BoardItem) -> Result<()> {
        self.write_line(&[
            Cow::Borrowed(item.function.as_str()),
            Cow::Owned(item.self_time.to_string()),
            Cow::Owned(item.self_percent.to_string()),
            Cow::Owned(item.total.to_string()),
            Cow::Owned(item.max_time.to_string()),
            Cow::Owned(item.count.to_string()),
            Cow::Borrowed(item.path.as_str()),
        ])
    }

    /// Header of a tag export: tag names in order, each delimiter-terminated.
    pub fn write_tag_header(&mut self, tags: &[Tag]) -> Result<()> {
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        self.write_terminated_line(&names)
    }

    pub fn write_tag_values(&mut self, values: &[&str]) -> Result<()> {
        self.write_terminated_line(values)
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        let out = self.out.into_inner().map_err(|e| e.into_error())?;
        Ok(out)
    }
}
