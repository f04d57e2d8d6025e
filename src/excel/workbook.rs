//! In-memory workbook grid
//!
//! Extraction works on this model rather than on a reader type so plans can be
//! loaded from xlsx files or assembled directly in code.

/// Stored value of a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text rendering; integral numbers print without a decimal part
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A single cell: value plus the bold-font flag of its style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub bold: bool,
}

impl Cell {
    pub fn text(&self) -> String {
        self.value.text()
    }
}

/// A worksheet addressed by 0-based (row, column)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Number of rows (including empty leading rows)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Number of cells stored in `row`
    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map(|r| r.len()).unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Text of a cell, empty when the cell does not exist
    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).map(|c| c.text()).unwrap_or_default()
    }

    pub fn is_bold(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map(|c| c.bold).unwrap_or(false)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        &mut cells[col]
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: CellValue) -> &mut Self {
        self.cell_mut(row, col).value = value;
        self
    }

    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) -> &mut Self {
        self.set_value(row, col, CellValue::Text(text.into()))
    }

    pub fn set_number(&mut self, row: usize, col: usize, number: f64) -> &mut Self {
        self.set_value(row, col, CellValue::Number(number))
    }

    pub fn set_bold(&mut self, row: usize, col: usize, bold: bool) -> &mut Self {
        self.cell_mut(row, col).bold = bold;
        self
    }

    /// Iterate non-empty cells row-major, left to right
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.value != CellValue::Empty)
                .map(move |(c, cell)| (r, c, cell))
        })
    }
}

/// Ordered collection of named sheets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, replacing any sheet with the same name
    pub fn add_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text_rendering() {
        assert_eq!(CellValue::Number(27.0).text(), "27");
        assert_eq!(CellValue::Number(2.5).text(), "2.5");
        assert_eq!(CellValue::Empty.text(), "");
        assert_eq!(CellValue::Text(" + ".into()).text(), " + ");
    }

    #[test]
    fn test_sheet_grows_on_write() {
        let mut sheet = Sheet::new("План");
        sheet.set_text(2, 3, "Лек").set_bold(2, 3, true);

        assert_eq!(sheet.height(), 3);
        assert_eq!(sheet.width(), 4);
        assert_eq!(sheet.row_width(0), 0);
        assert_eq!(sheet.text(2, 3), "Лек");
        assert!(sheet.is_bold(2, 3));
        assert_eq!(sheet.text(10, 10), "");
        assert!(!sheet.is_bold(10, 10));
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let mut sheet = Sheet::new("s");
        sheet.set_text(1, 0, "b").set_text(0, 2, "a").set_number(1, 1, 3.0);
        let order: Vec<String> = sheet.cells().map(|(_, _, c)| c.text()).collect();
        assert_eq!(order, vec!["a", "b", "3"]);
    }

    #[test]
    fn test_add_sheet_replaces_same_name() {
        let mut wb = Workbook::new();
        wb.add_sheet(Sheet::new("План"));
        let mut replacement = Sheet::new("План");
        replacement.set_text(0, 0, "x");
        wb.add_sheet(replacement);
        assert_eq!(wb.sheet_names(), vec!["План"]);
        assert_eq!(wb.sheet("План").map(|s| s.text(0, 0)), Some("x".to_string()));
        assert!(wb.sheet("Нормы").is_none());
    }
}
