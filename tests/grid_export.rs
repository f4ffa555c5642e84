//! Integration tests for cell-grid exports.

use std::path::Path;
use std::sync::Arc;

use capture_archive::archive::{
    grid_factory, ArchiveFactory, ArchiveOption, ArchiveSource, ArchiveSourceType, FormatRegistry,
};
use capture_archive::export::{CellValue, MemoryWorkbook, MemoryWorkbookProvider, Workbook, WorkbookProvider};
use capture_archive::model::{BoardItem, CallTreeNode, DataResponse, Frame, FrameGroup};
use capture_archive::{ArchiveSettings, Error, Result};

use tempfile::tempdir;

fn factory_with(provider: Arc<dyn WorkbookProvider>) -> ArchiveFactory {
    let registry = FormatRegistry::with_defaults();
    registry.register(".xlsx", "Excel Worksheets (*.xlsx)|*.xlsx", grid_factory(provider));
    ArchiveFactory::new(registry, ArchiveSettings::default())
}

fn factory() -> ArchiveFactory {
    factory_with(Arc::new(MemoryWorkbookProvider))
}

fn text(s: &str) -> Option<CellValue> {
    Some(CellValue::Text(s.to_string()))
}

fn tree() -> CallTreeNode {
    let mut tree = CallTreeNode::event("Main")
        .with_timing(1.0, 10.0, 10.0, 100.0)
        .with_child(
            CallTreeNode::event("Update")
                .with_timing(2.0, 20.0, 9.0, 90.0)
                .with_tag("Count", "3")
                .with_tag("Cost", "1.2"),
        );
    tree.derive_paths();
    tree
}

fn save(factory: &ArchiveFactory, path: &Path, source_type: ArchiveSourceType, sources: Vec<ArchiveSource>) -> Result<()> {
    let mut option = ArchiveOption::save(path, source_type, sources);
    factory.save(&mut option)
}

#[test]
fn test_node_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("node.xlsx");
    save(&factory(), &path, ArchiveSourceType::Node, vec![ArchiveSource::Node(tree())]).unwrap();

    let wb = MemoryWorkbook::load(&path).unwrap();
    assert_eq!(wb.sheets.len(), 1);
    let sheet = wb.sheet("NodeEvent-10").expect("sheet named after total duration");

    assert_eq!(sheet.cell(1, 1).cloned(), text("FUNCTION"));
    assert_eq!(sheet.cell(1, 7).cloned(), text("TAGS"));
    assert_eq!(sheet.cell(2, 1).cloned(), text("Main"));
    assert_eq!(sheet.cell(2, 7).cloned(), None);
    assert_eq!(sheet.cell(3, 1).cloned(), text("Update"));
    assert_eq!(sheet.cell(3, 4).cloned(), Some(CellValue::Number(9.0)));
    assert_eq!(sheet.cell(3, 6).cloned(), text("Main/Update"));
    assert_eq!(sheet.cell(3, 7).cloned(), text("3|1.2"));
    assert_eq!(sheet.rows(), 3);
}

#[test]
fn test_one_sheet_per_frame() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frames.xlsx");
    let group = FrameGroup::shared(Vec::new());
    let frames = vec![
        Frame::event("Frame 1", CallTreeNode::event("root").with_child(tree()), Arc::clone(&group)),
        Frame::sampling("Samples", DataResponse::new(1, Vec::new())),
        Frame::event("Frame 2", CallTreeNode::event("root").with_child(CallTreeNode::event("Idle")), group),
    ];
    save(&factory(), &path, ArchiveSourceType::Frame, vec![ArchiveSource::Frame(frames)]).unwrap();

    let wb = MemoryWorkbook::load(&path).unwrap();
    let names: Vec<&str> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Frame 1", "Samples", "Frame 2"]);

    assert_eq!(wb.sheets[0].rows(), 3);
    assert!(wb.sheets[1].cells.is_empty());
    // row numbering restarts on each sheet
    assert_eq!(wb.sheets[2].cell(1, 1).cloned(), text("FUNCTION"));
    assert_eq!(wb.sheets[2].cell(2, 1).cloned(), text("Idle"));
}

#[test]
fn test_view_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("view.xlsx");
    let rows = vec![BoardItem {
        function: "Render".into(),
        self_time: 3.0,
        self_percent: 30.0,
        total: 3.5,
        max_time: 4.0,
        count: 7,
        path: "Main/Render".into(),
    }];
    save(&factory(), &path, ArchiveSourceType::View, vec![ArchiveSource::View(rows)]).unwrap();

    let wb = MemoryWorkbook::load(&path).unwrap();
    let sheet = wb.sheet("Frame").unwrap();
    assert_eq!(sheet.cell(1, 2).cloned(), text("SELFDURATION(MS)"));
    assert_eq!(sheet.cell(1, 5).cloned(), text("MAX(MS)"));
    assert_eq!(sheet.cell(2, 6).cloned(), Some(CellValue::Number(7.0)));
    assert_eq!(sheet.cell(2, 7).cloned(), text("Main/Render"));
}

#[test]
fn test_tag_export_unsupported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tags.xlsx");
    let result = save(
        &factory(),
        &path,
        ArchiveSourceType::Tag,
        vec![ArchiveSource::Node(tree()), ArchiveSource::Frame(Vec::new())],
    );
    assert!(matches!(result, Err(Error::UnsupportedSourceType { .. })));
    assert!(!path.exists());
}

/// Workbook whose cells fail after a fixed number of writes.
struct FailingWorkbook {
    remaining: usize,
}

impl Workbook for FailingWorkbook {
    fn add_sheet(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn set_cell(&mut self, _row: u32, _column: u32, _value: CellValue) -> Result<()> {
        if self.remaining == 0 {
            return Err(Error::Workbook("sheet is full".into()));
        }
        self.remaining -= 1;
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, b"should never be written")?;
        Ok(())
    }
}

struct FailingProvider;

impl WorkbookProvider for FailingProvider {
    fn create(&self) -> Result<Box<dyn Workbook>> {
        Ok(Box::new(FailingWorkbook { remaining: 9 }))
    }
}

#[test]
fn test_sink_failure_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fail.xlsx");
    let result = save(
        &factory_with(Arc::new(FailingProvider)),
        &path,
        ArchiveSourceType::Node,
        vec![ArchiveSource::Node(tree())],
    );
    assert!(matches!(result, Err(Error::Workbook(_))));
    assert!(!path.exists());
}

/// Workbook that writes part of its output and then fails to save.
struct TruncatingWorkbook;

impl Workbook for TruncatingWorkbook {
    fn add_sheet(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn set_cell(&mut self, _row: u32, _column: u32, _value: CellValue) -> Result<()> {
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, b"half a workbook")?;
        Err(Error::Workbook("disk full".into()))
    }
}

struct TruncatingProvider;

impl WorkbookProvider for TruncatingProvider {
    fn create(&self) -> Result<Box<dyn Workbook>> {
        Ok(Box::new(TruncatingWorkbook))
    }
}

#[test]
fn test_failed_save_keeps_existing_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    std::fs::write(&path, b"previous report").unwrap();

    let result = save(
        &factory_with(Arc::new(TruncatingProvider)),
        &path,
        ArchiveSourceType::Node,
        vec![ArchiveSource::Node(tree())],
    );
    assert!(matches!(result, Err(Error::Workbook(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"previous report");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_sink_failure_keeps_existing_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    std::fs::write(&path, b"previous report").unwrap();

    let result = save(
        &factory_with(Arc::new(FailingProvider)),
        &path,
        ArchiveSourceType::Node,
        vec![ArchiveSource::Node(tree())],
    );
    assert!(matches!(result, Err(Error::Workbook(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"previous report");
}
