//! Hours formatting & positional arithmetic
//! Blank hour strings mean "not offered"; arithmetic treats them as zero and
//! formatting turns an exact zero back into a blank.

use crate::types::{Semester, TypeWork};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of semester columns a document table shows
pub const DISPLAY_SEMESTERS: usize = 4;

/// Numeric value of an hours string (blank or unreadable → 0.0)
pub fn hours_value(hours: &str) -> f64 {
    let trimmed = hours.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Truncate toward zero to one decimal digit, always rendering the decimal
pub fn to_string_hours(hours: f64) -> String {
    // absorbs binary representation error such as 2.3 * 10 = 22.999…
    let nudge = if hours < 0.0 { -1e-9 } else { 1e-9 };
    let tenths = ((hours + nudge) * 10.0) as i64;
    let value = tenths as f64 / 10.0;
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Strip a trailing ".0"; an exact "0" becomes blank
pub fn prepare_hours(hours: &str) -> String {
    let stripped = hours.strip_suffix(".0").unwrap_or(hours);
    if stripped == "0" {
        String::new()
    } else {
        stripped.to_string()
    }
}

/// `prepare_hours(to_string_hours(value))`
pub fn format_hours(value: f64) -> String {
    prepare_hours(&to_string_hours(value))
}

/// Stable sort moving blank entries to the end; filled entries by index
pub fn sort_blanks_last(entries: &[Semester]) -> Vec<Semester> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| match (a.is_blank(), b.is_blank()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.index.cmp(&b.index),
    });
    sorted
}

/// Sum every work's entry at the same block index
pub fn merge_by_position(name: &str, works: &[TypeWork]) -> TypeWork {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
    for work in works {
        for semester in &work.entries {
            *sums.entry(semester.index).or_insert(0.0) += hours_value(&semester.hours);
        }
    }
    TypeWork::new(name, None, collect_sums(sums))
}

/// Element-wise sum of two works by block index; a missing side counts as zero
pub fn merge_two(name: &str, a: &TypeWork, b: &TypeWork) -> TypeWork {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
    for semester in a.entries.iter().chain(b.entries.iter()) {
        *sums.entry(semester.index).or_insert(0.0) += hours_value(&semester.hours);
    }
    TypeWork::new(name, None, collect_sums(sums))
}

fn collect_sums(sums: BTreeMap<i32, f64>) -> Vec<Semester> {
    sums.into_iter()
        .map(|(index, value)| Semester::new(index, format_hours(value)))
        .collect()
}

/// Align a work's display entries to the discipline's first semester
///
/// Display entries are the blanks-last ordering of the raw entries. When the
/// first filled entry starts after `first_semester`, blank placeholders are
/// inserted in front so it lands in its own column. The result is cut to
/// [`DISPLAY_SEMESTERS`] entries.
pub fn align_and_trim(work: &mut TypeWork, first_semester: i32) {
    let mut display = sort_blanks_last(&work.entries);
    let first_index = display
        .first()
        .filter(|s| !s.is_blank())
        .map(|s| s.index);

    if let Some(first_index) = first_index {
        if first_semester >= 0 && first_index > first_semester {
            let padding = (first_index - first_semester) as usize;
            let placeholders = (0..padding).map(|k| Semester::blank(first_semester + k as i32));
            display.splice(0..0, placeholders);
        }
    }

    display.truncate(DISPLAY_SEMESTERS);
    work.display = display;
}
