//! Cell lookup over a sheet grid
//!
//! Lookups never modify the sheet. A substring match reports which label
//! matched; callers needing the text that follows the label derive it with
//! [`CellMatch::remainder`].

use super::workbook::{CellValue, Sheet, Workbook};

/// Sheet holding the plan rows
pub const PLAN_SHEET: &str = "План";
/// Label of the anchor cell on the plan sheet
pub const PLAN_MARKER: &str = "Считать в плане";
/// Label of the assigned-department column; also ends the semester header scan
pub const DEPARTMENT_COLUMN: &str = "Закрепленная кафедра";
/// Fragment present in every semester header cell
pub const SEMESTER_HEADER: &str = "Семестр";

/// Position of a located cell and the label that matched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMatch<'l> {
    pub row: usize,
    pub col: usize,
    pub label: &'l str,
}

impl CellMatch<'_> {
    /// Text of the matched cell after the matched label
    pub fn remainder(&self, sheet: &Sheet) -> String {
        self.remainder_at(sheet, 0)
    }

    /// Text of the cell `offset` columns right of the match, after the
    /// matched label when that cell repeats it
    pub fn remainder_at(&self, sheet: &Sheet, offset: usize) -> String {
        let text = sheet.text(self.row, self.col + offset);
        match text.find(self.label) {
            Some(pos) => text[pos + self.label.len()..].to_string(),
            None => text,
        }
    }
}

/// Where discipline rows of a plan begin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanAnchor {
    pub row: usize,
    pub col: usize,
}

impl PlanAnchor {
    /// First row that may hold a discipline
    pub fn base_row(&self) -> usize {
        self.row + 3
    }
}

/// Searches one sheet for labelled cells
pub struct CellLocator<'s> {
    sheet: &'s Sheet,
}

impl<'s> CellLocator<'s> {
    pub fn new(sheet: &'s Sheet) -> Self {
        Self { sheet }
    }

    /// Row-major scan for the first cell matching any candidate label
    ///
    /// Text cells match by equality when `strict`, by containment otherwise.
    /// Numeric cells only match in non-strict mode, when a candidate parses to
    /// the same number.
    pub fn find<'l>(&self, labels: &[&'l str], strict: bool) -> Option<CellMatch<'l>> {
        self.sheet.cells().find_map(|(row, col, cell)| {
            labels
                .iter()
                .find(|label| matches_label(&cell.value, label, strict))
                .map(|label| CellMatch {
                    row,
                    col,
                    label: *label,
                })
        })
    }

    /// Single-label form of [`CellLocator::find`]
    pub fn find_one<'l>(&self, label: &'l str, strict: bool) -> Option<CellMatch<'l>> {
        self.find(&[label], strict)
    }

    /// Column of the semester header following the one at (`row`, `col`)
    ///
    /// Steps `offset` columns right; when that cell is not a semester header
    /// or the department sentinel, keeps scanning right one column at a time.
    /// Returns `None` once the row is exhausted or the step overflows.
    pub fn next_semester_cell(&self, row: usize, col: usize, offset: usize) -> Option<usize> {
        let width = self.sheet.row_width(row);
        let start = col.checked_add(offset.max(1))?;
        (start..width).find(|&candidate| {
            let text = self.sheet.text(row, candidate);
            !text.trim().is_empty()
                && (text.contains(SEMESTER_HEADER) || text == DEPARTMENT_COLUMN)
        })
    }
}

fn matches_label(value: &CellValue, label: &str, strict: bool) -> bool {
    match value {
        CellValue::Text(text) => {
            if strict {
                text == label
            } else {
                text.contains(label)
            }
        }
        CellValue::Number(n) => {
            !strict
                && label
                    .trim()
                    .replace(',', ".")
                    .parse::<f64>()
                    .map(|parsed| parsed == *n)
                    .unwrap_or(false)
        }
        CellValue::Empty => false,
    }
}

/// Locate the plan anchor; `None` when the workbook has no plan
pub fn locate_plan_anchor(workbook: &Workbook) -> Option<PlanAnchor> {
    let sheet = workbook.sheet(PLAN_SHEET)?;
    CellLocator::new(sheet)
        .find_one(PLAN_MARKER, false)
        .map(|m| PlanAnchor {
            row: m.row,
            col: m.col,
        })
}
