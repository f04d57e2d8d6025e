//! Title-page fields read from the plan's "Титул" sheet

use super::info::FILL_MANUALLY;
use crate::excel::{CellLocator, Workbook};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TITLE_SHEET: &str = "Титул";

/// A value printed on the title page of every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TitleField {
    Qualification,
    FormEducation,
    Faculty,
    Specialization,
    Profile,
    ChairmanUmk,
}

impl TitleField {
    pub const ALL: [TitleField; 6] = [
        TitleField::Qualification,
        TitleField::FormEducation,
        TitleField::Faculty,
        TitleField::Specialization,
        TitleField::Profile,
        TitleField::ChairmanUmk,
    ];

    /// Labels the value is found by, tried together in scan order
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            TitleField::Qualification => &["Квалификация"],
            TitleField::FormEducation => &["Форма обучения"],
            TitleField::Faculty => &["Факультет"],
            TitleField::Specialization => &["Направление подготовки"],
            TitleField::Profile => &["Программа магистратуры", "Профиль"],
            TitleField::ChairmanUmk => &["Председатель УМК"],
        }
    }

    /// Columns between the label cell and the value cell
    pub fn offset(&self) -> usize {
        match self {
            TitleField::Faculty | TitleField::Profile => 1,
            TitleField::ChairmanUmk => 10,
            _ => 0,
        }
    }

    /// Value of the field, or the manual-fill text when it cannot be found
    pub fn extract(&self, workbook: &Workbook) -> String {
        let Some(sheet) = workbook.sheet(TITLE_SHEET) else {
            return FILL_MANUALLY.to_string();
        };
        let Some(m) = CellLocator::new(sheet).find(self.labels(), false) else {
            return FILL_MANUALLY.to_string();
        };

        m.remainder_at(sheet, self.offset())
            .replace([':', '/'], "")
            .trim()
            .to_string()
    }
}

/// Every title field of the workbook
pub fn extract_title_fields(workbook: &Workbook) -> BTreeMap<TitleField, String> {
    TitleField::ALL
        .iter()
        .map(|field| (*field, field.extract(workbook)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Sheet;

    fn workbook() -> Workbook {
        let mut title = Sheet::new(TITLE_SHEET);
        title
            .set_text(0, 0, "Квалификация: бакалавр")
            .set_text(1, 0, "Факультет")
            .set_text(1, 1, "Исторический / ")
            .set_text(2, 0, "Профиль")
            .set_text(2, 1, "Профиль: Отечественная история")
            .set_text(3, 2, "Председатель УМК")
            .set_text(3, 12, "Петров П.П.");
        let mut wb = Workbook::new();
        wb.add_sheet(title);
        wb
    }

    #[test]
    fn test_value_after_label_in_same_cell() {
        assert_eq!(TitleField::Qualification.extract(&workbook()), "бакалавр");
    }

    #[test]
    fn test_value_in_offset_cell() {
        let wb = workbook();
        assert_eq!(TitleField::Faculty.extract(&wb), "Исторический");
        assert_eq!(TitleField::Profile.extract(&wb), "Отечественная история");
        assert_eq!(TitleField::ChairmanUmk.extract(&wb), "Петров П.П.");
    }

    #[test]
    fn test_missing_field_asks_for_manual_fill() {
        let fields = extract_title_fields(&workbook());
        assert_eq!(fields[&TitleField::Specialization], FILL_MANUALLY);
        assert_eq!(fields.len(), 6);

        assert_eq!(
            TitleField::Qualification.extract(&Workbook::new()),
            FILL_MANUALLY
        );
    }
}
