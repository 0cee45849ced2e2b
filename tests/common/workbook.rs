//! Read generated workbooks back with calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

/// An opened workbook with its merged regions loaded
pub struct WorkbookReader {
    workbook: Xlsx<BufReader<File>>,
}

impl WorkbookReader {
    pub fn open(path: &Path) -> Self {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .unwrap_or_else(|e| panic!("Expected workbook at {}: {e}", path.display()));
        workbook
            .load_merged_regions()
            .expect("load merged regions");
        Self { workbook }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Cell values of sheet `index`
    pub fn sheet(&mut self, index: usize) -> Sheet {
        let name = self.sheet_names()[index].clone();
        let range = self
            .workbook
            .worksheet_range(&name)
            .unwrap_or_else(|e| panic!("Expected sheet '{name}': {e}"));
        let merged = self
            .workbook
            .merged_regions_by_sheet(&name)
            .into_iter()
            .map(|(_, _, dims)| (dims.start, dims.end))
            .collect();
        Sheet { range, merged }
    }
}

/// Values and merged regions of one sheet, positions as `(row, col)`
pub struct Sheet {
    range: Range<Data>,
    merged: Vec<((u32, u32), (u32, u32))>,
}

impl Sheet {
    /// Value at an absolute position, `Data::Empty` outside the used range
    pub fn cell(&self, row: u32, col: u32) -> Data {
        self.range
            .get_value((row, col))
            .cloned()
            .unwrap_or(Data::Empty)
    }

    pub fn number(&self, row: u32, col: u32) -> Option<u32> {
        match self.cell(row, col) {
            Data::Float(n) => Some(n as u32),
            Data::Int(n) => Some(n as u32),
            _ => None,
        }
    }

    pub fn text(&self, row: u32, col: u32) -> Option<String> {
        match self.cell(row, col) {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn merged(&self) -> &[((u32, u32), (u32, u32))] {
        &self.merged
    }

    /// Number of cells holding a value
    pub fn value_count(&self) -> usize {
        self.range.used_cells().count()
    }
}
