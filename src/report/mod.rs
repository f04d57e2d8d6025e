//! Report preparation
//!
//! - `filter`: which disciplines a report covers
//! - `info`: approval protocols and authors supplied by the user
//! - `title`: title-page values read from the plan
//! - `context`: discipline records enriched with plan-wide data

mod context;
mod filter;
mod info;
mod title;

pub use context::{build_report, previous_disciplines, ReportContext, ReportDiscipline};
pub use filter::{select_disciplines, Filter};
pub use info::{Protocol, ReportInfo, FILL_MANUALLY};
pub use title::{extract_title_fields, TitleField, TITLE_SHEET};
