use super::*;
use crate::types::Semester;
use std::io::Write;
use tempfile::TempDir;

// =========================================================================
// format_entries Tests
// =========================================================================

#[test]
fn test_format_entries_marks_blank_slots() {
    let work = TypeWork::new(
        "Лек",
        None,
        vec![Semester::new(1, "18"), Semester::new(2, ""), Semester::new(3, "4")],
    );
    assert_eq!(format_entries(&work), "18 | 4 | -");
}

#[test]
fn test_format_entries_empty_work() {
    assert_eq!(format_entries(&TypeWork::new("СР", None, vec![])), "");
}

// =========================================================================
// load_roster Tests
// =========================================================================

#[test]
fn test_load_roster_without_path() {
    let config = RedactorConfig::default();
    assert!(load_roster(&config).unwrap().is_none());
}

#[test]
fn test_load_roster_from_txt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("departments.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "Кафедра истории\r\nИванов И.И.\r\n").unwrap();

    let config = RedactorConfig {
        departments: Some(path),
        ..RedactorConfig::default()
    };
    let roster = load_roster(&config).unwrap().unwrap();
    assert_eq!(roster.len(), 1);
}

#[test]
fn test_load_roster_missing_file_is_error() {
    let config = RedactorConfig {
        departments: Some(PathBuf::from("/nonexistent/departments.txt")),
        ..RedactorConfig::default()
    };
    assert!(load_roster(&config).is_err());
}

// =========================================================================
// Command error paths
// =========================================================================

#[test]
fn test_names_missing_plan_is_error() {
    let config = RedactorConfig::default();
    assert!(names(PathBuf::from("/nonexistent/plan.xlsx"), &config).is_err());
}

#[test]
fn test_departments_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("departments.csv");
    std::fs::write(&path, "x").unwrap();
    assert!(departments(path).is_err());
}
