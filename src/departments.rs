//! Department roster
//!
//! Maps department names to their director and teachers. Discipline rows only
//! carry a department code; the extractor resolves the code to a name on the
//! plan's departments sheet and then asks a [`DepartmentLookup`] for the rest.

use crate::error::{RedactorError, RedactorResult};
use crate::excel::PlanImporter;
use crate::types::{lowercase_first, uppercase_first, Department};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Resolves a department name to its full record
pub trait DepartmentLookup {
    fn find(&self, name: &str) -> Option<Department>;
}

/// Lookup that never resolves; disciplines get the placeholder department
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDepartments;

impl DepartmentLookup for NoDepartments {
    fn find(&self, _name: &str) -> Option<Department> {
        None
    }
}

/// In-memory department roster
#[derive(Debug, Clone, Default)]
pub struct DepartmentRoster {
    departments: HashMap<String, Department>,
}

fn roster_key(name: &str) -> String {
    lowercase_first(name.trim())
}

impl DepartmentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a roster file, choosing the format by extension
    pub fn load(path: &Path) -> RedactorResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let roster = match extension.as_str() {
            "txt" => Self::from_txt(&std::fs::read_to_string(path)?),
            "xls" | "xlsx" => Self::load_excel(path)?,
            other => {
                return Err(RedactorError::Workbook(format!(
                    "Unsupported department roster format '{}'",
                    other
                )))
            }
        };
        info!(count = roster.len(), path = %path.display(), "departments loaded");
        Ok(roster)
    }

    /// Parse the text format: blocks separated by a blank line, first line
    /// the department name, second the director, then the other teachers
    pub fn from_txt(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let mut roster = Self::new();
        for block in normalized.split("\n\n") {
            let lines: Vec<&str> = block
                .trim()
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if lines.len() < 2 {
                continue;
            }
            roster.insert(lines[0], lines[1], lines[1..].iter().map(|s| s.to_string()).collect());
        }
        roster
    }

    /// First sheet, column A: blocks separated by blank rows, first row the
    /// department name, following rows its teachers (director first)
    fn load_excel(path: &Path) -> RedactorResult<Self> {
        let workbook = PlanImporter::new(path).import()?;
        let mut roster = Self::new();
        let Some(sheet) = workbook.first_sheet() else {
            return Ok(roster);
        };

        let mut block: Vec<String> = Vec::new();
        for row in 0..=sheet.height() {
            let text = sheet.text(row, 0).trim().to_string();
            if !text.is_empty() {
                block.push(text);
            } else if !block.is_empty() {
                roster.insert_block(&block);
                block.clear();
            }
        }
        Ok(roster)
    }

    fn insert_block(&mut self, block: &[String]) {
        match block {
            [name, teachers @ ..] if !teachers.is_empty() => {
                self.insert(name, &teachers[0], teachers.to_vec());
            }
            _ => debug!(?block, "department block without teachers skipped"),
        }
    }

    pub fn insert(&mut self, name: &str, director: &str, teachers: Vec<String>) {
        let department = Department::new(name.trim(), director.trim(), teachers);
        debug!(department = %department.name, "saving department");
        self.departments.insert(roster_key(name), department);
    }

    pub fn get(&self, name: &str) -> Option<&Department> {
        self.departments.get(&roster_key(name))
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Department names with a capital first letter, sorted
    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .departments
            .values()
            .map(|d| uppercase_first(&d.name))
            .collect();
        names.sort();
        names
    }

    pub fn all_teachers(&self) -> BTreeSet<String> {
        self.departments
            .values()
            .flat_map(|d| d.teachers.iter().cloned())
            .collect()
    }

    /// Render in the text format read by [`DepartmentRoster::from_txt`]
    pub fn to_txt(&self) -> String {
        let mut departments: Vec<&Department> = self.departments.values().collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = String::new();
        for department in departments {
            out.push_str(&department.name);
            out.push_str("\r\n");
            out.push_str(&department.director);
            out.push_str("\r\n");
            for teacher in department.teachers.iter().skip(1) {
                out.push_str(teacher);
                out.push_str("\r\n");
            }
            out.push_str("\r\n");
        }
        out
    }

    pub fn save_txt(&self, path: &Path) -> RedactorResult<()> {
        info!(path = %path.display(), "saving departments");
        std::fs::write(path, self.to_txt())?;
        Ok(())
    }
}

impl DepartmentLookup for DepartmentRoster {
    fn find(&self, name: &str) -> Option<Department> {
        self.get(name).cloned()
    }
}
