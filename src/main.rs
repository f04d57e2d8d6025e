use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use plan_redactor::cli;
use plan_redactor::config::RedactorConfig;
use plan_redactor::report::Filter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plan-redactor")]
#[command(about = "Extract disciplines and semester hours from curriculum plan workbooks")]
#[command(long_about = "Plan Redactor - curriculum plan extraction

Reads an academic curriculum plan (.xlsx) and extracts, for every discipline
of the disciplines section, its code, category, competencies, credit units,
assigned department and the per-semester hours of each type of work.

COMMANDS:
  disciplines - Full discipline records (optionally for one department)
  discipline  - One discipline by name
  hours       - Semester hours of every discipline
  names       - Discipline names only
  export      - Hours summary to Excel (.xlsx)
  report      - Report data (JSON) for document generation
  departments - Show a department roster

EXAMPLES:
  plan-redactor disciplines plan.xlsx --department \"Кафедра истории\"
  plan-redactor hours plan.xlsx --json
  plan-redactor report plan.xlsx --all --info info.yaml -o report.json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Args)]
struct Settings {
    /// YAML settings file
    #[arg(long, global = true, env = "PLAN_REDACTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Columns per semester block of the plan sheet
    #[arg(long, global = true, env = "PLAN_REDACTOR_SEMESTER_OFFSET")]
    semester_offset: Option<usize>,

    /// Hours per credit unit when the norms sheet has none
    #[arg(long, global = true)]
    credit_unit_hours: Option<u32>,

    /// Department roster (.txt / .xlsx)
    #[arg(long, global = true)]
    departments: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Settings {
    fn resolve(&self) -> anyhow::Result<RedactorConfig> {
        let mut config = match &self.config {
            Some(path) => RedactorConfig::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => RedactorConfig::default(),
        };
        if let Some(offset) = self.semester_offset {
            config.semester_offset = offset;
        }
        if let Some(hours) = self.credit_unit_hours {
            config.default_credit_unit_hours = hours;
        }
        if let Some(ref departments) = self.departments {
            config.departments = Some(departments.clone());
        }
        Ok(config)
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReportSelection {
    /// Every discipline of the plan
    #[arg(long)]
    all: bool,

    /// Disciplines of one department
    #[arg(long)]
    department: Option<String>,

    /// A single discipline by name
    #[arg(long)]
    discipline: Option<String>,
}

impl From<ReportSelection> for Filter {
    fn from(selection: ReportSelection) -> Self {
        Filter {
            department: selection.department,
            discipline: selection.discipline,
            all: selection.all,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List disciplines with their hours, competencies and department
    Disciplines {
        /// Plan workbook (.xlsx)
        plan: PathBuf,

        /// Only disciplines of this department (exact name)
        #[arg(short, long)]
        department: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one discipline by its exact name
    Discipline {
        /// Plan workbook (.xlsx)
        plan: PathBuf,

        /// Discipline name as printed in the plan
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Semester hours of every discipline
    Hours {
        /// Plan workbook (.xlsx)
        plan: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Discipline names, one per line
    Names {
        /// Plan workbook (.xlsx)
        plan: PathBuf,
    },

    /// Export discipline hours to an Excel summary
    Export {
        /// Plan workbook (.xlsx)
        plan: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(short, long)]
        output: PathBuf,
    },

    #[command(long_about = "Prepare report data for document generation.

Selects disciplines (--all, --department or --discipline), enriches each one
with the disciplines that precede it, its semester numbers and the approval
protocols from --info, and adds the title-page values of the plan.

INFO FILE (YAML):
  department_protocol:
    number: 5
    date: 2024-03-03T10:00:00+03:00
  commission_protocol:
    number: 2
    date: 2024-03-10T10:00:00+03:00
  year: 2024
  creators: [\"Иванов И.И.\"]")]
    /// Prepare report data (JSON) for selected disciplines
    Report {
        /// Plan workbook (.xlsx)
        plan: PathBuf,

        #[command(flatten)]
        selection: ReportSelection,

        /// Protocols and authors (YAML)
        #[arg(long)]
        info: Option<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a department roster
    Departments {
        /// Roster file (.txt / .xlsx)
        roster: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.settings.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.settings.resolve()?;

    match cli.command {
        Commands::Disciplines {
            plan,
            department,
            json,
        } => cli::disciplines(plan, department, json, &config)?,

        Commands::Discipline { plan, name, json } => cli::discipline(plan, name, json, &config)?,

        Commands::Hours { plan, json } => cli::hours(plan, json, &config)?,

        Commands::Names { plan } => cli::names(plan, &config)?,

        Commands::Export { plan, output } => cli::export(plan, output, &config)?,

        Commands::Report {
            plan,
            selection,
            info,
            output,
        } => cli::report(plan, selection.into(), info, output, &config)?,

        Commands::Departments { roster } => cli::departments(roster)?,
    }
    Ok(())
}
