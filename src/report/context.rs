//! Report data assembled around extracted disciplines
//!
//! Extraction results are never modified here; each discipline is wrapped in
//! a [`ReportDiscipline`] together with the values derived from the rest of
//! the plan.

use super::info::ReportInfo;
use super::title::TitleField;
use crate::types::{Discipline, DisciplineHours};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDiscipline {
    pub discipline: Discipline,
    /// Disciplines that start in an earlier semester
    pub previous_disciplines: Vec<String>,
    /// Display semester numbers with contact hours; "" for empty slots
    pub semesters: Vec<String>,
    pub report_info: ReportInfo,
    pub department_protocol: String,
    pub commission_protocol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub title: BTreeMap<TitleField, String>,
    pub disciplines: Vec<ReportDiscipline>,
}

/// Names in `all_hours` whose first semester is strictly earlier than the
/// first semester of `discipline`
pub fn previous_disciplines(discipline: &Discipline, all_hours: &[DisciplineHours]) -> Vec<String> {
    let first = discipline.semesters_hours.first_semester;
    all_hours
        .iter()
        .filter(|h| h.name != discipline.name && h.semesters_hours.first_semester < first)
        .map(|h| h.name.clone())
        .collect()
}

fn semester_numbers(discipline: &Discipline) -> Vec<String> {
    discipline
        .semesters_hours
        .contact
        .display
        .iter()
        .map(|s| {
            if s.is_blank() {
                String::new()
            } else {
                s.index.to_string()
            }
        })
        .collect()
}

pub fn build_report(
    disciplines: Vec<Discipline>,
    all_hours: &[DisciplineHours],
    info: &ReportInfo,
    title: BTreeMap<TitleField, String>,
) -> ReportContext {
    let department_protocol = info.department_protocol_string();
    let commission_protocol = info.commission_protocol_string();

    let disciplines = disciplines
        .into_iter()
        .map(|discipline| ReportDiscipline {
            previous_disciplines: previous_disciplines(&discipline, all_hours),
            semesters: semester_numbers(&discipline),
            report_info: info.clone(),
            department_protocol: department_protocol.clone(),
            commission_protocol: commission_protocol.clone(),
            discipline,
        })
        .collect();

    ReportContext { title, disciplines }
}
