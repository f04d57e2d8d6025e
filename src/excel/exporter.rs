//! Hours summary exporter

use crate::core::hours::{hours_value, DISPLAY_SEMESTERS};
use crate::error::{RedactorError, RedactorResult};
use crate::types::{DisciplineHours, TypeWork};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Name of the worksheet written by [`HoursExporter`]
pub const HOURS_SHEET: &str = "Часы";

const FIXED_HEADERS: [&str; 4] = ["Дисциплина", "Вид работы", "Первый семестр", "Всего"];

/// Writes the display-ready hours of each discipline to an .xlsx file
pub struct HoursExporter {
    hours: Vec<DisciplineHours>,
}

impl HoursExporter {
    /// Create a new exporter
    pub fn new(hours: Vec<DisciplineHours>) -> Self {
        Self { hours }
    }

    /// Export to `output_path`
    pub fn export(&self, output_path: &Path) -> RedactorResult<()> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(HOURS_SHEET)
            .map_err(|e| RedactorError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_header(worksheet, &bold)?;

        let mut row = 1u32;
        for discipline in &self.hours {
            for work in Self::summary_rows(discipline) {
                self.write_work_row(worksheet, row, discipline, work)?;
                row += 1;
            }
        }

        workbook
            .save(output_path)
            .map_err(|e| RedactorError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    /// Roll-ups shown for every discipline, in output order
    fn summary_rows(discipline: &DisciplineHours) -> [&TypeWork; 7] {
        let hours = &discipline.semesters_hours;
        [
            &hours.classroom,
            &hours.other_contact,
            &hours.individual,
            &hours.contact,
            &hours.control,
            &hours.total,
            &hours.total_units,
        ]
    }

    fn write_header(&self, worksheet: &mut Worksheet, bold: &Format) -> RedactorResult<()> {
        let semester_headers = (1..=DISPLAY_SEMESTERS).map(|n| format!("Сем. {}", n));
        let headers = FIXED_HEADERS
            .iter()
            .map(|h| h.to_string())
            .chain(semester_headers);

        for (col, header) in headers.enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, &header, bold)
                .map_err(|e| RedactorError::Export(format!("Failed to write header: {}", e)))?;
        }
        Ok(())
    }

    fn write_work_row(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        discipline: &DisciplineHours,
        work: &TypeWork,
    ) -> RedactorResult<()> {
        let write_err = |e: rust_xlsxwriter::XlsxError| {
            RedactorError::Export(format!("Failed to write row {}: {}", row, e))
        };

        worksheet
            .write_string(row, 0, &discipline.name)
            .map_err(write_err)?;
        worksheet.write_string(row, 1, &work.name).map_err(write_err)?;
        if discipline.semesters_hours.first_semester > 0 {
            worksheet
                .write_number(row, 2, discipline.semesters_hours.first_semester as f64)
                .map_err(write_err)?;
        }
        self.write_hours(worksheet, row, 3, &work.total)?;

        for (position, semester) in work.display.iter().enumerate() {
            let col = (FIXED_HEADERS.len() + position) as u16;
            self.write_hours(worksheet, row, col, &semester.hours)?;
        }
        Ok(())
    }

    /// Blank hours leave the cell empty
    fn write_hours(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        hours: &str,
    ) -> RedactorResult<()> {
        if hours.trim().is_empty() {
            return Ok(());
        }
        worksheet
            .write_number(row, col, hours_value(hours))
            .map_err(|e| RedactorError::Export(format!("Failed to write number: {}", e)))?;
        Ok(())
    }
}
