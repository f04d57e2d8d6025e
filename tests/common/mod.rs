//! Shared plan fixtures
//!
//! One small plan with two 2-column semester blocks (Лек, СР):
//!
//! | row | content                                                   |
//! |-----|-----------------------------------------------------------|
//! | 0   | anchor, column headers, "Курс 1"                          |
//! | 1   | "Семестр 1", "Семестр 2", department, competencies        |
//! | 2   | work labels                                               |
//! | 3   | "Обязательная часть"                                      |
//! | 4   | История, semesters 1 and 2, department 27                 |
//! | 5   | bold subtotal row                                         |
//! | 6   | "Часть, формируемая участниками образовательных отношений" |
//! | 7   | Программирование, semester 2 only, department 28          |
//! | 8   | "Блок 2. Практика"                                        |
//! | 9   | marker row past the end of the section                    |

#![allow(dead_code)]

use plan_redactor::config::RedactorConfig;
use plan_redactor::departments::DepartmentRoster;
use plan_redactor::excel::{CellValue, Sheet, Workbook};
use rust_xlsxwriter::Format;
use std::path::Path;

pub const ROSTER_TXT: &str = "Кафедра истории\r\nИванов И.И.\r\nПетров П.П.\r\n\r\nКафедра информатики\r\nСидоров С.С.\r\n";

pub fn config() -> RedactorConfig {
    RedactorConfig {
        semester_offset: 2,
        ..RedactorConfig::default()
    }
}

pub fn roster() -> DepartmentRoster {
    DepartmentRoster::from_txt(ROSTER_TXT)
}

pub fn plan_sheet() -> Sheet {
    let mut plan = Sheet::new("План");
    plan.set_text(0, 1, "Считать в плане")
        .set_text(0, 2, "Индекс")
        .set_text(0, 3, "Наименование")
        .set_text(0, 4, "з.е.")
        .set_text(0, 5, "Итого акад.часов")
        .set_text(0, 6, "Курс 1")
        .set_text(1, 6, "Семестр 1")
        .set_text(1, 8, "Семестр 2")
        .set_text(1, 10, "Закрепленная кафедра")
        .set_text(1, 11, "Компетенции")
        .set_text(2, 6, "Лек")
        .set_text(2, 7, "СР")
        .set_text(2, 8, "Лек")
        .set_text(2, 9, "СР");

    plan.set_text(3, 0, "Обязательная часть")
        .set_text(4, 1, "+")
        .set_text(4, 2, "Б1.О.01")
        .set_text(4, 3, "История")
        .set_number(4, 4, 3.0)
        .set_number(4, 5, 108.0)
        .set_number(4, 6, 2.0)
        .set_number(4, 7, 34.0)
        .set_number(4, 8, 3.0)
        .set_number(4, 10, 27.0)
        .set_text(4, 11, "УК-1; ИУК-2; ПК-9");

    plan.set_text(5, 1, "+")
        .set_text(5, 3, "Итого по обязательной части")
        .set_bold(5, 3, true)
        .set_number(5, 6, 2.0);

    plan.set_text(6, 0, "Часть, формируемая участниками образовательных отношений")
        .set_text(7, 1, "-")
        .set_text(7, 2, "Б1.В.01")
        .set_text(7, 3, "Программирование")
        .set_number(7, 4, 2.0)
        .set_number(7, 5, 72.0)
        .set_number(7, 8, 4.0)
        .set_number(7, 9, 68.0)
        .set_number(7, 10, 28.0)
        .set_text(7, 11, "УК-2");

    plan.set_text(8, 0, "Блок 2. Практика")
        .set_text(9, 1, "+")
        .set_text(9, 3, "Учебная практика");
    plan
}

pub fn plan_workbook() -> Workbook {
    let mut competencies = Sheet::new("Компетенции");
    competencies
        .set_text(0, 0, "Код")
        .set_text(0, 1, "Содержание")
        .set_text(1, 0, "УК-1")
        .set_text(1, 1, "Поиск и анализ информации")
        .set_text(2, 0, "УК-2")
        .set_text(2, 1, "Управление проектами");

    let mut departments = Sheet::new("Кафедры");
    departments
        .set_text(0, 0, "Код")
        .set_text(0, 1, "Название кафедры")
        .set_number(1, 0, 27.0)
        .set_text(1, 1, "Кафедра истории")
        .set_number(2, 0, 28.0)
        .set_text(2, 1, "Кафедра информатики");

    let mut norms = Sheet::new("Нормы");
    norms
        .set_text(2, 0, "Академических часов в одной зачетной единице трудоемкости (з.е.)")
        .set_number(2, 5, 36.0);

    let mut title = Sheet::new("Титул");
    title
        .set_text(0, 0, "Квалификация: бакалавр")
        .set_text(1, 0, "Факультет")
        .set_text(1, 1, "Исторический");

    let mut wb = Workbook::new();
    wb.add_sheet(plan_sheet());
    wb.add_sheet(competencies);
    wb.add_sheet(departments);
    wb.add_sheet(norms);
    wb.add_sheet(title);
    wb
}

/// Write `workbook` to an .xlsx file, bold cells with a bold font
pub fn write_xlsx(workbook: &Workbook, path: &Path) {
    let mut out = rust_xlsxwriter::Workbook::new();
    let bold = Format::new().set_bold();

    for name in workbook.sheet_names() {
        let sheet = workbook.sheet(name).unwrap();
        let worksheet = out.add_worksheet();
        worksheet.set_name(name).unwrap();

        for (row, col, cell) in sheet.cells() {
            let (row, col) = (row as u32, col as u16);
            match (&cell.value, cell.bold) {
                (CellValue::Text(text), false) => {
                    worksheet.write_string(row, col, text).unwrap();
                }
                (CellValue::Text(text), true) => {
                    worksheet.write_string_with_format(row, col, text, &bold).unwrap();
                }
                (CellValue::Number(n), false) => {
                    worksheet.write_number(row, col, *n).unwrap();
                }
                (CellValue::Number(n), true) => {
                    worksheet.write_number_with_format(row, col, *n, &bold).unwrap();
                }
                (CellValue::Empty, _) => {}
            }
        }
    }
    out.save(path).unwrap();
}
