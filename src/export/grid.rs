//! Cell-grid sink.
//!
//! The workbook itself is an external collaborator reached through the
//! [`Workbook`] trait: the engine only adds named sheets and sets cells by
//! 1-based (row, column). [`MemoryWorkbook`] is the in-process
//! implementation; it saves as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::columns::{FrameTableColumn, FrameTreeColumn};
use super::flatten::TreeRow;
use crate::model::BoardItem;
use crate::util::{Error, Result};

/// Value of a single cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

/// Addressable cell-grid output target.
pub trait Workbook {
    /// Append a sheet and make it the target of subsequent `set_cell` calls.
    fn add_sheet(&mut self, name: &str) -> Result<()>;

    /// Set a cell of the current sheet. `row` and `column` are 1-based.
    fn set_cell(&mut self, row: u32, column: u32, value: CellValue) -> Result<()>;

    /// Persist the workbook to `path`.
    fn save_as(&mut self, path: &Path) -> Result<()>;
}

/// Creates a fresh workbook per save.
pub trait WorkbookProvider: Send + Sync {
    fn create(&self) -> Result<Box<dyn Workbook>>;
}

/// One sheet of a [`MemoryWorkbook`], stored sparsely in write order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub cells: Vec<(u32, u32, CellValue)>,
}

impl Sheet {
    pub fn cell(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells
            .iter()
            .rev()
            .find(|(r, c, _)| *r == row && *c == column)
            .map(|(_, _, v)| v)
    }

    /// Highest row index written.
    pub fn rows(&self) -> u32 {
        self.cells.iter().map(|(r, _, _)| *r).max().unwrap_or(0)
    }
}

/// In-memory workbook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryWorkbook {
    pub sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a workbook previously written by [`Workbook::save_as`].
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

impl Workbook for MemoryWorkbook {
    fn add_sheet(&mut self, name: &str) -> Result<()> {
        self.sheets.push(Sheet {
            name: name.to_string(),
            cells: Vec::new(),
        });
        Ok(())
    }

    fn set_cell(&mut self, row: u32, column: u32, value: CellValue) -> Result<()> {
        if row == 0 || column == 0 {
            return Err(Error::Workbook(format!("cell ({row}, {column}) is not 1-based")));
        }
        let sheet = self
            .sheets
            .last_mut()
            .ok_or_else(|| Error::Workbook("no sheet to write to".into()))?;
        sheet.cells.push((row, column, value));
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Provider for [`MemoryWorkbook`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryWorkbookProvider;

impl WorkbookProvider for MemoryWorkbookProvider {
    fn create(&self) -> Result<Box<dyn Workbook>> {
        Ok(Box::new(MemoryWorkbook::new()))
    }
}

/// Writes header and data rows into a workbook, one sheet at a time.
/// Row 1 of each sheet holds the header; data starts on row 2.
pub struct GridSink<'w> {
    workbook: &'w mut dyn Workbook,
    row: u32,
}

impl<'w> GridSink<'w> {
    pub fn new(workbook: &'w mut dyn Workbook) -> Self {
        Self { workbook, row: 0 }
    }

    /// Start a new sheet; row numbering restarts.
    pub fn begin_sheet(&mut self, name: &str) -> Result<()> {
        self.workbook.add_sheet(name)?;
        self.row = 0;
        Ok(())
    }

    /// Last row written on the current sheet.
    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn write_tree_header(&mut self) -> Result<()> {
        self.row += 1;
        for col in FrameTreeColumn::ALL {
            self.workbook.set_cell(self.row, col.index(), col.grid_header().into())?;
        }
        Ok(())
    }

    pub fn write_tree_row(&mut self, row: &TreeRow<'_>) -> Result<()> {
        self.row += 1;
        let r = self.row;
        self.workbook.set_cell(r, FrameTreeColumn::Function.index(), row.name.into())?;
        self.workbook.set_cell(r, FrameTreeColumn::SelfDuration.index(), row.self_duration.into())?;
        self.workbook.set_cell(r, FrameTreeColumn::SelfPercent.index(), row.self_percent.into())?;
        self.workbook.set_cell(r, FrameTreeColumn::Total.index(), row.duration.into())?;
        self.workbook.set_cell(r, FrameTreeColumn::TotalPercent.index(), row.total_percent.into())?;
        self.workbook.set_cell(r, FrameTreeColumn::Path.index(), row.path.into())?;
        if row.tag_count > 0 {
            self.workbook.set_cell(r, FrameTreeColumn::Tags.index(), row.tags.as_str().into())?;
        }
        Ok(())
    }

    pub fn write_view_header(&mut self) -> Result<()> {
        self.row += 1;
        for col in FrameTableColumn::ALL {
            self.workbook.set_cell(self.row, col.index(), col.grid_header().into())?;
        }
        Ok(())
    }

    pub fn write_view_row(&mut self, item: &BoardItem) -> Result<()> {
        self.row += 1;
        let r = self.row;
        self.workbook.set_cell(r, FrameTableColumn::Function.index(), item.function.as_str().into())?;
        self.workbook.set_cell(r, FrameTableColumn::SelfDuration.index(), item.self_time.into())?;
        self.workbook.set_cell(r, FrameTableColumn::SelfPercent.index(), item.self_percent.into())?;
        self.workbook.set_cell(r, FrameTableColumn::Total.index(), item.total.into())?;
        self.workbook.set_cell(r, FrameTableColumn::Max.index(), item.max_time.into())?;
        self.workbook.set_cell(r, FrameTableColumn::Count.index(), (item.count as f64).into())?;
        self.workbook.set_cell(r, FrameTableColumn::Path.index(), item.path.as_str().into())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CallTreeNode;

    #[test]
    fn test_tree_rows_land_below_header() {
        let node = CallTreeNode::event("Update").with_timing(1.0, 2.0, 3.0, 4.0);
        let mut wb = MemoryWorkbook::new();
        {
            let mut sink = GridSink::new(&mut wb);
            sink.begin_sheet("Sheet").unwrap();
            sink.write_tree_header().unwrap();
            sink.write_tree_row(&TreeRow::from_node(&node, "|")).unwrap();
            assert_eq!(sink.row(), 2);
        }

        let sheet = wb.sheet("Sheet").unwrap();
        assert_eq!(sheet.cell(1, 3), Some(&CellValue::Text("SELFPERCENT%".into())));
        assert_eq!(sheet.cell(2, 1), Some(&CellValue::Text("Update".into())));
        assert_eq!(sheet.cell(2, 4), Some(&CellValue::Number(3.0)));
        // untagged node leaves the tag cell empty
        assert_eq!(sheet.cell(2, 7), None);
    }

    #[test]
    fn test_row_numbering_restarts_per_sheet() {
        let node = CallTreeNode::event("A");
        let mut wb = MemoryWorkbook::new();
        let mut sink = GridSink::new(&mut wb);
        sink.begin_sheet("one").unwrap();
        sink.write_tree_header().unwrap();
        sink.write_tree_row(&TreeRow::from_node(&node, "|")).unwrap();
        sink.begin_sheet("two").unwrap();
        assert_eq!(sink.row(), 0);
        sink.write_tree_header().unwrap();
        assert_eq!(sink.row(), 1);
    }

    #[test]
    fn test_set_cell_without_sheet_fails() {
        let mut wb = MemoryWorkbook::new();
        assert!(matches!(wb.set_cell(1, 1, 1.0.into()), Err(Error::Workbook(_))));
        wb.add_sheet("s").unwrap();
        assert!(matches!(wb.set_cell(0, 1, 1.0.into()), Err(Error::Workbook(_))));
    }
}
