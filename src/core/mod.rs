//! Extraction engine: plan rows → discipline records with semester hours

pub mod aggregator;
pub mod extractor;
pub mod hours;

pub use aggregator::HoursAggregator;
pub use extractor::CurriculumExtractor;
