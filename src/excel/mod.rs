//! Spreadsheet access
//!
//! - `workbook`: in-memory sheet grid the extractor works on
//! - `locator`: cell lookup by label
//! - Import: Excel (.xlsx) → [`Workbook`], with bold-font flags
//! - Export: discipline hours → Excel (.xlsx)

mod exporter;
mod importer;
pub mod locator;
pub mod styles;
pub mod workbook;

pub use exporter::{HoursExporter, HOURS_SHEET};
pub use importer::PlanImporter;
pub use locator::{locate_plan_anchor, CellLocator, CellMatch, PlanAnchor};
pub use workbook::{Cell, CellValue, Sheet, Workbook};
