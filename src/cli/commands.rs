use crate::config::RedactorConfig;
use crate::core::CurriculumExtractor;
use crate::departments::{DepartmentLookup, DepartmentRoster, NoDepartments};
use crate::error::RedactorResult;
use crate::excel::{HoursExporter, PlanImporter, Workbook};
use crate::report::{build_report, extract_title_fields, select_disciplines, Filter, ReportInfo};
use crate::types::{Discipline, DisciplineHours, TypeWork};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Roster named by the config, if any
fn load_roster(config: &RedactorConfig) -> RedactorResult<Option<DepartmentRoster>> {
    config
        .departments
        .as_deref()
        .map(DepartmentRoster::load)
        .transpose()
}

fn import_plan(plan: &Path) -> RedactorResult<Workbook> {
    PlanImporter::new(plan).import()
}

fn print_json<T: Serialize>(value: &T) -> RedactorResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run `f` with an extractor wired to the configured roster
fn with_extractor<T>(
    config: &RedactorConfig,
    f: impl FnOnce(&CurriculumExtractor) -> RedactorResult<T>,
) -> RedactorResult<T> {
    let roster = load_roster(config)?;
    let lookup: &dyn DepartmentLookup = match &roster {
        Some(roster) => roster,
        None => &NoDepartments,
    };
    f(&CurriculumExtractor::new(config, lookup))
}

fn format_entries(work: &TypeWork) -> String {
    work.display
        .iter()
        .map(|s| if s.is_blank() { "-".to_string() } else { s.hours.clone() })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_hours(hours: &crate::types::SemestersHours) {
    for work in [
        &hours.classroom,
        &hours.other_contact,
        &hours.individual,
        &hours.contact,
        &hours.control,
        &hours.total,
        &hours.total_units,
    ] {
        println!(
            "      {:<28} {:>6}   {}",
            work.name.cyan(),
            work.total.bold(),
            format_entries(work)
        );
    }
}

fn print_discipline(discipline: &Discipline) {
    println!(
        "   📘 {} {}",
        discipline.code.bright_blue().bold(),
        discipline.name.bold()
    );
    println!("      Category:   {}", discipline.mandatory);
    let department = if discipline.department.is_placeholder() {
        "-".dimmed().to_string()
    } else {
        discipline.department.name.clone()
    };
    println!("      Department: {}", department);
    println!(
        "      Volume:     {} credit units, {} hours",
        discipline.total_units, discipline.total_hours
    );
    for competency in &discipline.competencies {
        println!("      • {}", competency);
    }
    print_hours(&discipline.semesters_hours);
    println!();
}

/// Execute the disciplines command
pub fn disciplines(
    plan: PathBuf,
    department: Option<String>,
    json: bool,
    config: &RedactorConfig,
) -> RedactorResult<()> {
    let workbook = import_plan(&plan)?;
    let disciplines =
        with_extractor(config, |e| e.extract_all(&workbook, department.as_deref()))?;

    if json {
        return print_json(&disciplines);
    }

    println!("{}", "📋 Plan Redactor - Disciplines".bold().green());
    println!("   Plan: {}", plan.display());
    if let Some(ref d) = department {
        println!("   Department: {}", d.bright_yellow().bold());
    }
    println!();
    for discipline in &disciplines {
        print_discipline(discipline);
    }
    println!(
        "{}",
        format!("✅ {} disciplines", disciplines.len()).bold().green()
    );
    Ok(())
}

/// Execute the discipline command
pub fn discipline(
    plan: PathBuf,
    name: String,
    json: bool,
    config: &RedactorConfig,
) -> RedactorResult<()> {
    let workbook = import_plan(&plan)?;
    let found = with_extractor(config, |e| e.extract_by_name(&workbook, &name, Vec::new()))?;

    if json {
        return print_json(&found);
    }

    match found.first() {
        Some(discipline) => print_discipline(discipline),
        None => println!("{}", format!("⚠️  Discipline '{}' not found", name).yellow()),
    }
    Ok(())
}

/// Execute the hours command
pub fn hours(plan: PathBuf, json: bool, config: &RedactorConfig) -> RedactorResult<()> {
    let workbook = import_plan(&plan)?;
    let hours = CurriculumExtractor::new(config, &NoDepartments).extract_discipline_hours(&workbook)?;

    if json {
        return print_json(&hours);
    }

    println!("{}", "⏱  Plan Redactor - Hours".bold().green());
    println!("   Plan: {}\n", plan.display());
    for DisciplineHours {
        name,
        semesters_hours,
    } in &hours
    {
        println!("   {}", name.bright_blue().bold());
        print_hours(semesters_hours);
        println!();
    }
    Ok(())
}

/// Execute the names command
pub fn names(plan: PathBuf, config: &RedactorConfig) -> RedactorResult<()> {
    let workbook = import_plan(&plan)?;
    for name in CurriculumExtractor::new(config, &NoDepartments).discipline_names(&workbook) {
        println!("{}", name);
    }
    Ok(())
}

/// Execute the export command
pub fn export(plan: PathBuf, output: PathBuf, config: &RedactorConfig) -> RedactorResult<()> {
    println!("{}", "📊 Plan Redactor - Hours Export".bold().green());
    println!("   Plan:   {}", plan.display());
    println!("   Output: {}\n", output.display());

    let workbook = import_plan(&plan)?;
    let hours = CurriculumExtractor::new(config, &NoDepartments).extract_discipline_hours(&workbook)?;
    let count = hours.len();
    HoursExporter::new(hours).export(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   {} disciplines written to {}\n", count, output.display());
    Ok(())
}

/// Execute the report command
pub fn report(
    plan: PathBuf,
    filter: Filter,
    info: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &RedactorConfig,
) -> RedactorResult<()> {
    let workbook = import_plan(&plan)?;
    let info = match info {
        Some(path) => ReportInfo::load(&path)?,
        None => ReportInfo::default(),
    };

    let context = with_extractor(config, |e| {
        let disciplines = select_disciplines(e, &workbook, &filter)?;
        let all_hours = e.extract_discipline_hours(&workbook)?;
        Ok(build_report(
            disciplines,
            &all_hours,
            &info,
            extract_title_fields(&workbook),
        ))
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, serde_json::to_string_pretty(&context)?)?;
            println!(
                "{}",
                format!(
                    "✅ Report data for {} disciplines written to {}",
                    context.disciplines.len(),
                    path.display()
                )
                .bold()
                .green()
            );
            Ok(())
        }
        None => print_json(&context),
    }
}

/// Execute the departments command
pub fn departments(roster: PathBuf) -> RedactorResult<()> {
    let roster = DepartmentRoster::load(&roster)?;

    println!("{}", "🏛  Plan Redactor - Departments".bold().green());
    println!();
    for name in roster.all_names() {
        println!("   {}", name.bright_blue().bold());
        if let Some(department) = roster.get(&name) {
            println!("      Director: {}", department.director);
            println!("      Teachers: {}", department.teachers.len());
        }
    }
    println!();
    println!(
        "{}",
        format!(
            "✅ {} departments, {} teachers",
            roster.len(),
            roster.all_teachers().len()
        )
        .bold()
        .green()
    );
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
