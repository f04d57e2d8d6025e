//! Per-semester hours of a discipline row
//!
//! Semester blocks are found by walking the semester header row that sits
//! under "Курс 1". Every block spans `semester_offset` work-type columns; the
//! work-type labels are one row below the semester header. Entries are keyed
//! by the order blocks are met, not by the printed semester number.

use crate::config::RedactorConfig;
use crate::core::hours::{align_and_trim, format_hours, hours_value, merge_by_position, merge_two};
use crate::error::{RedactorError, RedactorResult};
use crate::excel::locator::{CellLocator, PLAN_SHEET, SEMESTER_HEADER};
use crate::excel::{Sheet, Workbook};
use crate::types::{Semester, SemestersHours, TypeWork, WorkCategory, WorkKind};
use tracing::{debug, warn};

/// Header above the first semester block
pub const FIRST_COURSE: &str = "Курс 1";
pub const NORMS_SHEET: &str = "Нормы";
/// Norms row holding the academic hours of one credit unit
pub const CREDIT_UNIT_NORM: &str =
    "Академических часов в одной зачетной единице трудоемкости (з.е.)";
/// Columns between the norm label and its value
const CREDIT_UNIT_VALUE_OFFSET: usize = 5;

pub const CLASSROOM_TITLE: &str = "Аудиторные занятия";
pub const OTHER_CONTACT_TITLE: &str = "Иная контактная работа";
pub const INDIVIDUAL_TITLE: &str = "Самостоятельная работа";
pub const CONTACT_TITLE: &str = "Контактная работа";
pub const CONTROL_TITLE: &str = "Подготовка к экзамену";
pub const TOTAL_TITLE: &str = "Всего часов";
pub const UNITS_TITLE: &str = "Зачетные единицы";

/// Builds [`SemestersHours`] for rows of one plan sheet
pub struct HoursAggregator<'w> {
    plan: &'w Sheet,
    semester_offset: usize,
    credit_unit_hours: u32,
    first_course: (usize, usize),
}

impl<'w> HoursAggregator<'w> {
    /// Locate the semester header and the credit-unit norm once per call
    pub fn new(workbook: &'w Workbook, config: &RedactorConfig) -> RedactorResult<Self> {
        let plan = workbook.sheet(PLAN_SHEET).ok_or_else(|| {
            RedactorError::DataLayout(format!("sheet '{}' not found", PLAN_SHEET))
        })?;
        let course = CellLocator::new(plan)
            .find_one(FIRST_COURSE, false)
            .ok_or_else(|| {
                RedactorError::DataLayout(format!(
                    "header '{}' not found on sheet '{}'",
                    FIRST_COURSE, PLAN_SHEET
                ))
            })?;
        if config.semester_offset > plan.width() {
            return Err(RedactorError::DataLayout(format!(
                "semester offset {} exceeds the {} columns of sheet '{}'",
                config.semester_offset,
                plan.width(),
                PLAN_SHEET
            )));
        }

        Ok(Self {
            plan,
            semester_offset: config.semester_offset.max(1),
            credit_unit_hours: credit_unit_hours(workbook, config.default_credit_unit_hours),
            first_course: (course.row, course.col),
        })
    }

    /// Raw work types of a discipline row, in order of first appearance
    pub fn collect_raw_work(&self, discipline_row: usize) -> Vec<TypeWork> {
        let locator = CellLocator::new(self.plan);
        let header_row = self.first_course.0 + 1;
        let names_row = header_row + 1;

        let mut works: Vec<(String, Option<WorkKind>, Vec<Semester>)> = Vec::new();
        let mut column = Some(self.first_course.1);
        let mut index = 1;

        while let Some(col) = column {
            if !self.plan.text(header_row, col).contains(SEMESTER_HEADER) {
                break;
            }

            for (label, hours) in self.semester_block(names_row, discipline_row, col) {
                let kind = WorkKind::from_label(&label);
                let name = kind.map(|k| k.title().to_string()).unwrap_or(label);
                match works.iter_mut().find(|(n, _, _)| *n == name) {
                    Some((_, _, entries)) => entries.push(Semester::new(index, hours)),
                    None => works.push((name, kind, vec![Semester::new(index, hours)])),
                }
            }

            index += 1;
            column = locator
                .next_semester_cell(header_row, col, self.semester_offset)
                .filter(|&next| next > col);
        }

        works
            .into_iter()
            .map(|(name, kind, entries)| TypeWork::new(name, kind, entries))
            .collect()
    }

    /// (work label, hours) pairs of one block; a repeated label keeps its
    /// first position and its last value
    fn semester_block(
        &self,
        names_row: usize,
        discipline_row: usize,
        col: usize,
    ) -> Vec<(String, String)> {
        let mut block: Vec<(String, String)> = Vec::new();
        for column in col..col.saturating_add(self.semester_offset) {
            let label = self.plan.text(names_row, column);
            let hours = self.plan.text(discipline_row, column);
            match block.iter_mut().find(|(l, _)| *l == label) {
                Some(entry) => entry.1 = hours,
                None => block.push((label, hours)),
            }
        }
        block
    }

    /// Full hours breakdown of a discipline row
    pub fn semesters_hours(&self, discipline_row: usize) -> SemestersHours {
        let (classroom, other_contact, individual) =
            partition(self.collect_raw_work(discipline_row));
        build(classroom, other_contact, individual, self.credit_unit_hours)
    }
}

/// Hours per credit unit from the norms sheet, or `default` when absent
pub fn credit_unit_hours(workbook: &Workbook, default: u32) -> u32 {
    let value = workbook.sheet(NORMS_SHEET).and_then(|norms| {
        CellLocator::new(norms)
            .find_one(CREDIT_UNIT_NORM, false)
            .map(|m| norms.text(m.row, m.col + CREDIT_UNIT_VALUE_OFFSET))
    });

    match value.as_deref().map(|v| v.trim().parse::<u32>()) {
        Some(Ok(hours)) if hours > 0 => hours,
        Some(_) => {
            warn!(value = ?value, default, "unreadable credit unit norm, using default");
            default
        }
        None => {
            debug!(default, "credit unit norm not found, using default");
            default
        }
    }
}

/// Split raw works into (classroom, other contact, individual); works
/// without a recognized kind are dropped
pub fn partition(works: Vec<TypeWork>) -> (Vec<TypeWork>, Vec<TypeWork>, Vec<TypeWork>) {
    let mut classroom = Vec::new();
    let mut other_contact = Vec::new();
    let mut individual = Vec::new();

    for work in works {
        match work.category() {
            Some(WorkCategory::Classroom) => classroom.push(work),
            Some(WorkCategory::OtherContact) => other_contact.push(work),
            Some(WorkCategory::Individual) => individual.push(work),
            None => {}
        }
    }
    (classroom, other_contact, individual)
}

fn category_total(works: &[TypeWork]) -> String {
    format_hours(works.iter().map(|w| hours_value(&w.total)).sum())
}

/// Assemble category totals, roll-ups and aligned display entries
pub fn build(
    classroom_works: Vec<TypeWork>,
    other_contact_works: Vec<TypeWork>,
    individual_works: Vec<TypeWork>,
    credit_unit_hours: u32,
) -> SemestersHours {
    let classroom = merge_by_position(CLASSROOM_TITLE, &classroom_works);
    let other_contact = merge_by_position(OTHER_CONTACT_TITLE, &other_contact_works);
    let individual = merge_by_position(INDIVIDUAL_TITLE, &individual_works);
    let contact = merge_two(CONTACT_TITLE, &classroom, &other_contact);
    let total = merge_two(TOTAL_TITLE, &contact, &individual);

    let control_entries = individual_works
        .iter()
        .find(|w| w.kind == Some(WorkKind::ExamPreparation))
        .map(|w| w.entries.clone())
        .unwrap_or_default();
    let control = TypeWork::new(CONTROL_TITLE, None, control_entries);

    let unit = f64::from(credit_unit_hours.max(1));
    let total_units = TypeWork::new(
        UNITS_TITLE,
        None,
        total
            .entries
            .iter()
            .map(|s| Semester::new(s.index, format_hours(hours_value(&s.hours) / unit)))
            .collect(),
    );

    let first_semester = classroom
        .entries
        .iter()
        .filter(|s| !s.is_blank())
        .map(|s| s.index)
        .min()
        .unwrap_or(-1);

    let mut hours = SemestersHours {
        classroom_works_all: category_total(&classroom_works),
        other_contact_works_all: category_total(&other_contact_works),
        individual_works_all: category_total(&individual_works),
        classroom_works,
        other_contact_works,
        individual_works,
        classroom,
        other_contact,
        individual,
        contact,
        control,
        total,
        total_units,
        credit_unit_hours,
        first_semester,
    };
    align_all(&mut hours);
    hours
}

fn align_all(hours: &mut SemestersHours) {
    let first = hours.first_semester;
    let works = hours
        .classroom_works
        .iter_mut()
        .chain(hours.other_contact_works.iter_mut())
        .chain(hours.individual_works.iter_mut());
    for work in works {
        align_and_trim(work, first);
    }
    for work in [
        &mut hours.classroom,
        &mut hours.other_contact,
        &mut hours.individual,
        &mut hours.contact,
        &mut hours.control,
        &mut hours.total,
        &mut hours.total_units,
    ] {
        align_and_trim(work, first);
    }
}
