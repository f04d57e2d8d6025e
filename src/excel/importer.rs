//! Workbook importer - Excel (.xlsx) → in-memory [`Workbook`]

use crate::error::{RedactorError, RedactorResult};
use crate::excel::styles::StyleReader;
use crate::excel::workbook::{CellValue, Sheet, Workbook};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads every worksheet of a spreadsheet file
pub struct PlanImporter {
    path: PathBuf,
}

impl PlanImporter {
    /// Create a new importer for `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read values of every sheet, then overlay bold flags for xlsx packages
    pub fn import(&self) -> RedactorResult<Workbook> {
        let mut source = open_workbook_auto(&self.path).map_err(|e| {
            RedactorError::Workbook(format!(
                "Failed to open '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut workbook = Workbook::new();
        for sheet_name in source.sheet_names() {
            match source.worksheet_range(&sheet_name) {
                Ok(range) => workbook.add_sheet(self.convert_sheet(&sheet_name, &range)),
                Err(e) => debug!(sheet = %sheet_name, error = %e, "skipping unreadable sheet"),
            }
        }

        if self.is_xlsx_package() {
            self.apply_bold(&mut workbook)?;
        } else {
            debug!(path = %self.path.display(), "not an xlsx package, font weights unavailable");
        }

        Ok(workbook)
    }

    /// Copy a calamine range into a sheet, keeping absolute coordinates
    fn convert_sheet(&self, name: &str, range: &Range<Data>) -> Sheet {
        let mut sheet = Sheet::new(name);
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        for (row, col, data) in range.cells() {
            let value = self.convert_value(data);
            if value != CellValue::Empty {
                sheet.set_value(row + row_offset, col + col_offset, value);
            }
        }
        sheet
    }

    fn convert_value(&self, data: &Data) -> CellValue {
        match data {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            other => CellValue::Text(other.to_string()),
        }
    }

    fn apply_bold(&self, workbook: &mut Workbook) -> RedactorResult<()> {
        let bold = StyleReader::open(&self.path)?.bold_cells()?;
        for (sheet_name, cells) in bold {
            if let Some(sheet) = workbook.sheet_mut(&sheet_name) {
                for (row, col) in cells {
                    sheet.set_bold(row, col, true);
                }
            }
        }
        Ok(())
    }

    fn is_xlsx_package(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "xlsx" | "xlsm"))
            .unwrap_or(false)
    }
}
