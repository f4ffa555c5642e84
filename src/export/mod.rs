//! Tabular export of call trees.
//!
//! - [`flatten`] - Pre-order tree flattening into [`TreeRow`]s, tag matching
//! - [`TextSink`] - Delimited text output
//! - [`GridSink`] / [`Workbook`] - Addressable cell-grid output
//! - [`FrameTreeColumn`] / [`FrameTableColumn`] - Column layouts

pub mod flatten;
mod columns;
mod text;
mod grid;

pub use columns::{FrameTableColumn, FrameTreeColumn, TAG_DELIMITER, FIELD_DELIMITER};
pub use flatten::TreeRow;
pub use text::TextSink;
pub use grid::{CellValue, GridSink, MemoryWorkbook, MemoryWorkbookProvider, Sheet, Workbook, WorkbookProvider};
