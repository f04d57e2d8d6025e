//! Discipline extraction over in-memory plan workbooks

mod common;

use plan_redactor::config::RedactorConfig;
use plan_redactor::core::CurriculumExtractor;
use plan_redactor::departments::NoDepartments;
use plan_redactor::error::RedactorError;
use plan_redactor::excel::{Sheet, Workbook};
use plan_redactor::report::{build_report, extract_title_fields, select_disciplines, Filter, ReportInfo, TitleField};
use plan_redactor::types::{Discipline, Semester};
use pretty_assertions::assert_eq;

fn extract(workbook: &Workbook) -> Vec<Discipline> {
    let config = common::config();
    let roster = common::roster();
    CurriculumExtractor::new(&config, &roster)
        .extract_all(workbook, None)
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// FULL EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_extract_all_walks_the_section() {
    let disciplines = extract(&common::plan_workbook());

    let names: Vec<&str> = disciplines.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["История", "Программирование"]);
}

#[test]
fn test_discipline_record_fields() {
    let disciplines = extract(&common::plan_workbook());
    let history = &disciplines[0];

    assert_eq!(history.code, "Б1.О.01");
    assert_eq!(history.mandatory, "обязательной части");
    assert_eq!(history.total_units, 3);
    assert_eq!(history.total_hours, 108);
    assert_eq!(
        history.competencies,
        vec!["УК-1 Поиск и анализ информации", "УК-2 Управление проектами"]
    );
    assert_eq!(history.department.name, "Кафедра истории");
    assert_eq!(history.department.director, "Иванов И.И.");
}

#[test]
fn test_category_switches_at_section_marker() {
    let disciplines = extract(&common::plan_workbook());
    assert_eq!(
        disciplines[1].mandatory,
        "части, формируемой участниками образовательных отношений"
    );
    assert_eq!(disciplines[1].department.name, "Кафедра информатики");
}

#[test]
fn test_semester_hours_of_extracted_discipline() {
    let disciplines = extract(&common::plan_workbook());
    let hours = &disciplines[0].semesters_hours;

    assert_eq!(hours.classroom_works_all, "5");
    assert_eq!(hours.individual_works_all, "34");
    assert_eq!(hours.first_semester, 1);
    assert_eq!(
        hours.total.entries,
        vec![Semester::new(1, "36"), Semester::new(2, "3")]
    );
    assert_eq!(
        hours.total_units.entries,
        vec![Semester::new(1, "1"), Semester::new(2, "")]
    );
    assert_eq!(
        hours.total_units.display,
        vec![Semester::new(1, "1"), Semester::blank(2)]
    );
    assert!(hours.control.entries.is_empty());

    let programming = &disciplines[1].semesters_hours;
    assert_eq!(programming.first_semester, 2);
    assert_eq!(programming.total.total, "72");
}

#[test]
fn test_credit_units_follow_the_norms_sheet() {
    let mut wb = common::plan_workbook();
    wb.sheet_mut("Нормы").unwrap().set_number(2, 5, 24.0);
    let disciplines = extract(&wb);

    let history = &disciplines[0].semesters_hours;
    assert_eq!(history.credit_unit_hours, 24);
    assert_eq!(
        history.total_units.display,
        vec![Semester::new(1, "1.5"), Semester::new(2, "0.1")]
    );

    // starts in the second block, so the blank first block moves to the end
    let programming = &disciplines[1].semesters_hours;
    assert_eq!(programming.credit_unit_hours, 24);
    assert_eq!(
        programming.total_units.display,
        vec![Semester::new(2, "3"), Semester::blank(1)]
    );
}

#[test]
fn test_department_filter_is_exact() {
    let config = common::config();
    let roster = common::roster();
    let extractor = CurriculumExtractor::new(&config, &roster);
    let wb = common::plan_workbook();

    let history = extractor.extract_all(&wb, Some("Кафедра истории")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "История");

    assert!(extractor.extract_all(&wb, Some("кафедра истории")).unwrap().is_empty());
}

#[test]
fn test_without_roster_departments_are_placeholders() {
    let config = common::config();
    let disciplines = CurriculumExtractor::new(&config, &NoDepartments)
        .extract_all(&common::plan_workbook(), None)
        .unwrap();
    assert!(disciplines.iter().all(|d| d.department.is_placeholder()));
}

#[test]
fn test_missing_competencies_sheet_drops_tokens() {
    let mut wb = Workbook::new();
    wb.add_sheet(common::plan_sheet());
    let disciplines = extract(&wb);

    assert_eq!(disciplines.len(), 2);
    assert!(disciplines.iter().all(|d| d.competencies.is_empty()));
    assert!(disciplines.iter().all(|d| d.department.is_placeholder()));
}

// ═══════════════════════════════════════════════════════════════════════════
// LAYOUT EDGE CASES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_anchor_yields_empty_results() {
    let config = common::config();
    let extractor = CurriculumExtractor::new(&config, &NoDepartments);

    let mut wb = Workbook::new();
    wb.add_sheet(Sheet::new("План"));

    assert!(extractor.extract_all(&wb, None).unwrap().is_empty());
    assert!(extractor.extract_discipline_hours(&wb).unwrap().is_empty());
    assert!(extractor.discipline_names(&wb).is_empty());
    assert!(extractor
        .extract_by_name(&wb, "История", Vec::new())
        .unwrap()
        .is_empty());
}

#[test]
fn test_missing_required_header_is_layout_error() {
    let mut plan = common::plan_sheet();
    plan.set_text(0, 5, "Всего");
    let mut wb = Workbook::new();
    wb.add_sheet(plan);

    let config = common::config();
    let result = CurriculumExtractor::new(&config, &NoDepartments).extract_all(&wb, None);
    assert!(matches!(result, Err(RedactorError::DataLayout(_))));
}

#[test]
fn test_competencies_sheet_without_content_header_is_layout_error() {
    let mut wb = common::plan_workbook();
    let mut competencies = Sheet::new("Компетенции");
    competencies.set_text(0, 0, "Код");
    wb.add_sheet(competencies);

    let config = common::config();
    let result = CurriculumExtractor::new(&config, &NoDepartments).extract_all(&wb, None);
    assert!(matches!(result, Err(RedactorError::DataLayout(_))));
}

#[test]
fn test_oversized_semester_offset_is_layout_error() {
    let config = RedactorConfig {
        semester_offset: usize::MAX,
        ..RedactorConfig::default()
    };
    let extractor = CurriculumExtractor::new(&config, &NoDepartments);
    let wb = common::plan_workbook();

    let result = extractor.extract_discipline_hours(&wb);
    assert!(matches!(result, Err(RedactorError::DataLayout(_))));
    let result = extractor.extract_all(&wb, None);
    assert!(matches!(result, Err(RedactorError::DataLayout(_))));
}

#[test]
fn test_section_without_disciplines() {
    let mut plan = common::plan_sheet();
    plan.set_text(3, 0, "Блок 2");
    let mut wb = common::plan_workbook();
    wb.add_sheet(plan);
    assert!(extract(&wb).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// LOOKUP BY NAME, HOURS AND NAMES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_extract_by_name_uses_category_above() {
    let config = common::config();
    let roster = common::roster();
    let extractor = CurriculumExtractor::new(&config, &roster);
    let wb = common::plan_workbook();

    let found = extractor
        .extract_by_name(&wb, "Программирование", Vec::new())
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found, vec![extract(&wb)[1].clone()]);
}

#[test]
fn test_extract_by_name_falls_back_to_default_list() {
    let config = common::config();
    let extractor = CurriculumExtractor::new(&config, &NoDepartments);
    let wb = common::plan_workbook();
    let fallback = extract(&wb);

    let missing = extractor
        .extract_by_name(&wb, "Астрономия", fallback.clone())
        .unwrap();
    assert_eq!(missing, fallback);

    let subtotal = extractor
        .extract_by_name(&wb, "Итого по обязательной части", Vec::new())
        .unwrap();
    assert!(subtotal.is_empty());
}

#[test]
fn test_extract_by_blank_name_returns_default_list() {
    let config = common::config();
    let extractor = CurriculumExtractor::new(&config, &NoDepartments);
    let wb = common::plan_workbook();
    let fallback = extract(&wb);

    for name in ["", "   "] {
        assert!(extractor.extract_by_name(&wb, name, Vec::new()).unwrap().is_empty());
        assert_eq!(
            extractor.extract_by_name(&wb, name, fallback.clone()).unwrap(),
            fallback
        );
    }
}

#[test]
fn test_discipline_hours_match_full_records() {
    let config = common::config();
    let extractor = CurriculumExtractor::new(&config, &NoDepartments);
    let wb = common::plan_workbook();

    let hours = extractor.extract_discipline_hours(&wb).unwrap();
    let full = extract(&wb);
    assert_eq!(hours.len(), full.len());
    for (h, d) in hours.iter().zip(&full) {
        assert_eq!(h.name, d.name);
        assert_eq!(h.semesters_hours, d.semesters_hours);
    }
}

#[test]
fn test_discipline_names() {
    let config = common::config();
    let names = CurriculumExtractor::new(&config, &NoDepartments)
        .discipline_names(&common::plan_workbook());
    assert_eq!(names, vec!["История", "Программирование"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORT PREPARATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_report_for_single_discipline() {
    let config = common::config();
    let roster = common::roster();
    let extractor = CurriculumExtractor::new(&config, &roster);
    let wb = common::plan_workbook();

    let selected =
        select_disciplines(&extractor, &wb, &Filter::discipline("Программирование")).unwrap();
    let all_hours = extractor.extract_discipline_hours(&wb).unwrap();
    let context = build_report(
        selected,
        &all_hours,
        &ReportInfo::default(),
        extract_title_fields(&wb),
    );

    assert_eq!(context.disciplines.len(), 1);
    let report = &context.disciplines[0];
    assert_eq!(report.previous_disciplines, vec!["История"]);
    assert_eq!(report.semesters, vec!["2", ""]);
    assert_eq!(context.title[&TitleField::Qualification], "бакалавр");
    assert_eq!(context.title[&TitleField::Faculty], "Исторический");
}

#[test]
fn test_select_by_department() {
    let config = common::config();
    let roster = common::roster();
    let extractor = CurriculumExtractor::new(&config, &roster);
    let wb = common::plan_workbook();

    let selected =
        select_disciplines(&extractor, &wb, &Filter::department("Кафедра информатики")).unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].name, "Программирование");

    assert_eq!(
        select_disciplines(&extractor, &wb, &Filter::all()).unwrap().len(),
        2
    );
}
