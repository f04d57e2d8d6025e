//! Plan Redactor - curriculum plan extraction
//!
//! Reads academic curriculum plan workbooks and extracts discipline records:
//! code, category, competencies, credit units, assigned department and the
//! per-semester hours of every type of work, rolled up into classroom, other
//! contact, individual, contact, control and total hours.
//!
//! # Example
//!
//! ```no_run
//! use plan_redactor::config::RedactorConfig;
//! use plan_redactor::core::CurriculumExtractor;
//! use plan_redactor::departments::NoDepartments;
//! use plan_redactor::excel::PlanImporter;
//!
//! let workbook = PlanImporter::new("plan.xlsx").import()?;
//! let config = RedactorConfig::default();
//! let extractor = CurriculumExtractor::new(&config, &NoDepartments);
//!
//! for discipline in extractor.extract_all(&workbook, None)? {
//!     println!("{} {}", discipline.code, discipline.name);
//! }
//! # Ok::<(), plan_redactor::error::RedactorError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod departments;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{RedactorError, RedactorResult};
pub use types::{Department, Discipline, DisciplineHours, SemestersHours, TypeWork};
