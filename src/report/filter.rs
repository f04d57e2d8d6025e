//! Selection of the disciplines a report is prepared for

use crate::core::CurriculumExtractor;
use crate::error::{RedactorError, RedactorResult};
use crate::excel::Workbook;
use crate::types::Discipline;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub department: Option<String>,
    pub discipline: Option<String>,
    pub all: bool,
}

impl Filter {
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    pub fn department(name: impl Into<String>) -> Self {
        Self {
            department: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn discipline(name: impl Into<String>) -> Self {
        Self {
            discipline: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Disciplines matching `filter`
///
/// `all` and `department` both go through the full extraction (the
/// department, when set, still narrows an `all` request); a lone
/// `discipline` looks the row up by name.
pub fn select_disciplines(
    extractor: &CurriculumExtractor,
    workbook: &Workbook,
    filter: &Filter,
) -> RedactorResult<Vec<Discipline>> {
    if filter.all || filter.department.is_some() {
        return extractor.extract_all(workbook, filter.department.as_deref());
    }
    match &filter.discipline {
        Some(name) => extractor.extract_by_name(workbook, name, Vec::new()),
        None => Err(RedactorError::InvalidFilter(format!(
            "expected all, department or discipline, got {:?}",
            filter
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedactorConfig;
    use crate::departments::NoDepartments;

    #[test]
    fn test_empty_filter_is_invalid() {
        let config = RedactorConfig::default();
        let extractor = CurriculumExtractor::new(&config, &NoDepartments);
        let result = select_disciplines(&extractor, &Workbook::new(), &Filter::default());
        assert!(matches!(result, Err(RedactorError::InvalidFilter(_))));
    }

    #[test]
    fn test_filters_on_workbook_without_plan() {
        let config = RedactorConfig::default();
        let extractor = CurriculumExtractor::new(&config, &NoDepartments);
        let wb = Workbook::new();

        for filter in [
            Filter::all(),
            Filter::department("Кафедра истории"),
            Filter::discipline("История"),
        ] {
            assert!(select_disciplines(&extractor, &wb, &filter).unwrap().is_empty());
        }
    }
}
