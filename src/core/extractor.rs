//! Discipline extraction from the plan sheet
//!
//! Rows are walked from three rows below the plan anchor. A row is a
//! discipline candidate when its anchor-column cell holds "+" or "-"; rows with
//! a bold name are subtotals and are skipped. Section-marker rows in the first
//! column switch the mandatory category for the rows that follow. The walk
//! ends at the "Блок 2" row.

use crate::config::RedactorConfig;
use crate::core::aggregator::HoursAggregator;
use crate::departments::DepartmentLookup;
use crate::error::{RedactorError, RedactorResult};
use crate::excel::locator::{locate_plan_anchor, CellLocator, PlanAnchor, DEPARTMENT_COLUMN, PLAN_SHEET};
use crate::excel::{Sheet, Workbook};
use crate::types::{Department, Discipline, DisciplineHours, Mandatory};
use tracing::{debug, info, warn};

/// Text of the first row after the disciplines section
pub const SECTION_END: &str = "Блок 2";
pub const COMPETENCIES_HEADER: &str = "Компетенции";
pub const CREDIT_UNITS_HEADER: &str = "з.е.";
pub const TOTAL_HOURS_HEADER: &str = "Итого акад.часов";
pub const COMPETENCIES_SHEET: &str = "Компетенции";
pub const COMPETENCY_CONTENT_HEADER: &str = "Содержание";
pub const DEPARTMENTS_SHEET: &str = "Кафедры";
pub const DEPARTMENT_NAME_HEADER: &str = "Название кафедры";

/// Plan columns located once per extraction
struct PlanLayout {
    competencies: usize,
    credit_units: usize,
    total_hours: usize,
    department: Option<usize>,
}

struct LookupSheet<'w> {
    sheet: &'w Sheet,
    /// Column read from the row of a matched key
    value_col: usize,
}

/// Everything a discipline row needs, resolved before the row walk
struct PlanContext<'w> {
    plan: &'w Sheet,
    anchor: PlanAnchor,
    layout: PlanLayout,
    competencies: Option<LookupSheet<'w>>,
    departments: Option<LookupSheet<'w>>,
    hours: HoursAggregator<'w>,
}

impl<'w> PlanContext<'w> {
    fn new(
        workbook: &'w Workbook,
        anchor: PlanAnchor,
        config: &RedactorConfig,
    ) -> RedactorResult<Self> {
        let plan = plan_sheet(workbook)?;
        let locator = CellLocator::new(plan);

        let layout = PlanLayout {
            competencies: required_header(plan, COMPETENCIES_HEADER)?,
            credit_units: required_header(plan, CREDIT_UNITS_HEADER)?,
            total_hours: required_header(plan, TOTAL_HOURS_HEADER)?,
            department: locator.find_one(DEPARTMENT_COLUMN, false).map(|m| m.col),
        };
        if layout.department.is_none() {
            warn!("'{}' column not found, departments left empty", DEPARTMENT_COLUMN);
        }

        let competencies = match workbook.sheet(COMPETENCIES_SHEET) {
            Some(sheet) => Some(LookupSheet {
                sheet,
                value_col: required_header(sheet, COMPETENCY_CONTENT_HEADER)?,
            }),
            None => {
                warn!("sheet '{}' not found, competencies left empty", COMPETENCIES_SHEET);
                None
            }
        };

        let departments = workbook.sheet(DEPARTMENTS_SHEET).and_then(|sheet| {
            let name_col = CellLocator::new(sheet)
                .find_one(DEPARTMENT_NAME_HEADER, false)
                .map(|m| m.col);
            if name_col.is_none() {
                warn!("'{}' not found on sheet '{}'", DEPARTMENT_NAME_HEADER, DEPARTMENTS_SHEET);
            }
            name_col.map(|value_col| LookupSheet { sheet, value_col })
        });

        Ok(Self {
            plan,
            anchor,
            layout,
            competencies,
            departments,
            hours: HoursAggregator::new(workbook, config)?,
        })
    }
}

fn plan_sheet(workbook: &Workbook) -> RedactorResult<&Sheet> {
    workbook
        .sheet(PLAN_SHEET)
        .ok_or_else(|| RedactorError::DataLayout(format!("sheet '{}' not found", PLAN_SHEET)))
}

fn required_header(sheet: &Sheet, label: &str) -> RedactorResult<usize> {
    CellLocator::new(sheet)
        .find_one(label, false)
        .map(|m| m.col)
        .ok_or_else(|| {
            RedactorError::DataLayout(format!(
                "header '{}' not found on sheet '{}'",
                label, sheet.name
            ))
        })
}

/// Rows of the disciplines section, up to (not including) the "Блок 2" row
fn section_rows(plan: &Sheet, anchor: PlanAnchor) -> impl Iterator<Item = usize> + '_ {
    let left = anchor.col.saturating_sub(1);
    (anchor.base_row()..plan.height()).take_while(move |&row| {
        !plan.text(row, anchor.col).contains(SECTION_END)
            && !plan.text(row, left).contains(SECTION_END)
    })
}

fn is_marker_row(plan: &Sheet, anchor: PlanAnchor, row: usize) -> bool {
    matches!(plan.text(row, anchor.col).as_str(), "+" | "-")
}

fn name_col(anchor: PlanAnchor) -> usize {
    anchor.col + 2
}

fn parse_int(text: &str) -> i32 {
    text.trim().parse::<i32>().unwrap_or(0)
}

/// Nearest category marker above `row`, or the default category
fn category_above(plan: &Sheet, row: usize) -> Mandatory {
    (0..row)
        .rev()
        .find_map(|r| Mandatory::from_category(&plan.text(r, 0)))
        .unwrap_or_default()
}

/// Builds discipline records from a plan workbook
pub struct CurriculumExtractor<'a> {
    config: &'a RedactorConfig,
    departments: &'a dyn DepartmentLookup,
}

impl<'a> CurriculumExtractor<'a> {
    pub fn new(config: &'a RedactorConfig, departments: &'a dyn DepartmentLookup) -> Self {
        Self {
            config,
            departments,
        }
    }

    /// All disciplines of the section, optionally only those of one department
    pub fn extract_all(
        &self,
        workbook: &Workbook,
        department_filter: Option<&str>,
    ) -> RedactorResult<Vec<Discipline>> {
        let Some(anchor) = locate_plan_anchor(workbook) else {
            info!("plan anchor not found, workbook treated as empty");
            return Ok(Vec::new());
        };
        let ctx = PlanContext::new(workbook, anchor, self.config)?;

        let mut category = Mandatory::default();
        let mut disciplines = Vec::new();
        for row in section_rows(ctx.plan, anchor) {
            if let Some(marker) = Mandatory::from_category(&ctx.plan.text(row, 0)) {
                category = marker;
            }
            if !is_marker_row(ctx.plan, anchor, row) {
                continue;
            }
            let Some(discipline) = self.fill_discipline(&ctx, row, category) else {
                continue;
            };
            if let Some(filter) = department_filter {
                if discipline.department.name != filter {
                    debug!(row, name = %discipline.name, "discipline of another department skipped");
                    continue;
                }
            }
            disciplines.push(discipline);
        }

        info!(count = disciplines.len(), "disciplines extracted");
        Ok(disciplines)
    }

    /// The discipline named `name`, or `default_list` when there is none
    /// or `name` is blank
    pub fn extract_by_name(
        &self,
        workbook: &Workbook,
        name: &str,
        default_list: Vec<Discipline>,
    ) -> RedactorResult<Vec<Discipline>> {
        if name.trim().is_empty() {
            return Ok(default_list);
        }
        let Some(anchor) = locate_plan_anchor(workbook) else {
            return Ok(default_list);
        };
        let plan = plan_sheet(workbook)?;
        let column = name_col(anchor);
        let Some(row) = (0..plan.height()).find(|&r| plan.text(r, column) == name) else {
            debug!(name, "discipline not found");
            return Ok(default_list);
        };

        let category = category_above(plan, row);
        let ctx = PlanContext::new(workbook, anchor, self.config)?;
        Ok(self
            .fill_discipline(&ctx, row, category)
            .map(|discipline| vec![discipline])
            .unwrap_or(default_list))
    }

    /// (name, hours) of every discipline of the section
    pub fn extract_discipline_hours(
        &self,
        workbook: &Workbook,
    ) -> RedactorResult<Vec<DisciplineHours>> {
        let Some(anchor) = locate_plan_anchor(workbook) else {
            return Ok(Vec::new());
        };
        let plan = plan_sheet(workbook)?;
        let hours = HoursAggregator::new(workbook, self.config)?;
        let column = name_col(anchor);

        Ok(section_rows(plan, anchor)
            .filter(|&row| is_marker_row(plan, anchor, row) && !plan.is_bold(row, column))
            .map(|row| DisciplineHours {
                name: plan.text(row, column),
                semesters_hours: hours.semesters_hours(row),
            })
            .collect())
    }

    /// Names of every discipline of the section
    pub fn discipline_names(&self, workbook: &Workbook) -> Vec<String> {
        let Some(anchor) = locate_plan_anchor(workbook) else {
            return Vec::new();
        };
        let Some(plan) = workbook.sheet(PLAN_SHEET) else {
            return Vec::new();
        };
        let column = name_col(anchor);

        section_rows(plan, anchor)
            .filter(|&row| is_marker_row(plan, anchor, row) && !plan.is_bold(row, column))
            .map(|row| plan.text(row, column))
            .collect()
    }

    /// Build the record of one discipline row; `None` for bold (subtotal) rows
    fn fill_discipline(
        &self,
        ctx: &PlanContext,
        row: usize,
        category: Mandatory,
    ) -> Option<Discipline> {
        let column = name_col(ctx.anchor);
        if ctx.plan.is_bold(row, column) {
            debug!(row, "bold row skipped");
            return None;
        }

        let discipline = Discipline {
            code: ctx.plan.text(row, ctx.anchor.col + 1),
            name: ctx.plan.text(row, column),
            mandatory: category.value().to_string(),
            competencies: self.competencies(ctx, row),
            total_units: parse_int(&ctx.plan.text(row, ctx.layout.credit_units)),
            total_hours: parse_int(&ctx.plan.text(row, ctx.layout.total_hours)),
            semesters_hours: ctx.hours.semesters_hours(row),
            department: self.department(ctx, row),
        };
        debug!(row, code = %discipline.code, name = %discipline.name, "discipline built");
        Some(discipline)
    }

    /// "<code> <content>" for each competency code of the row found on the
    /// competencies sheet
    fn competencies(&self, ctx: &PlanContext, row: usize) -> Vec<String> {
        let text = ctx.plan.text(row, ctx.layout.competencies);
        let codes = text
            .split(';')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| code.strip_prefix('И').unwrap_or(code));

        let Some(lookup) = &ctx.competencies else {
            return Vec::new();
        };
        let locator = CellLocator::new(lookup.sheet);

        codes
            .filter_map(|code| match locator.find_one(code, true) {
                Some(m) => Some(format!(
                    "{} {}",
                    lookup.sheet.text(m.row, m.col),
                    lookup.sheet.text(m.row, lookup.value_col)
                )),
                None => {
                    debug!(row, code, "competency not found");
                    None
                }
            })
            .collect()
    }

    /// Department of the row; the placeholder when any step does not resolve
    fn department(&self, ctx: &PlanContext, row: usize) -> Department {
        let code = match ctx.layout.department {
            Some(col) => ctx.plan.text(row, col).trim().to_string(),
            None => return Department::default(),
        };
        if code.is_empty() {
            return Department::default();
        }
        let Some(lookup) = &ctx.departments else {
            return Department::default();
        };

        let locator = CellLocator::new(lookup.sheet);
        let Some(m) = locator
            .find_one(&code, true)
            .or_else(|| locator.find_one(&code, false))
        else {
            warn!(row, code = %code, "department code not found");
            return Department::default();
        };

        let name = lookup.sheet.text(m.row, lookup.value_col);
        self.departments.find(&name).unwrap_or_else(|| {
            warn!(row, department = %name, "department not in roster");
            Department::default()
        })
    }
}
