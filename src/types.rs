use serde::{Deserialize, Serialize};

//==============================================================================
// Discipline Classification
//==============================================================================

/// Compulsory-vs-elective classification of a plan section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mandatory {
    /// Обязательная часть
    #[default]
    RequiredPart,
    /// Часть, формируемая участниками образовательных отношений
    FormedParticipants,
}

impl Mandatory {
    pub const ALL: [Mandatory; 2] = [Mandatory::RequiredPart, Mandatory::FormedParticipants];

    /// Text of the section-marker row in the first plan column
    pub fn category(&self) -> &'static str {
        match self {
            Mandatory::RequiredPart => "Обязательная часть",
            Mandatory::FormedParticipants => {
                "Часть, формируемая участниками образовательных отношений"
            }
        }
    }

    /// Value placed into a discipline record
    pub fn value(&self) -> &'static str {
        match self {
            Mandatory::RequiredPart => "обязательной части",
            Mandatory::FormedParticipants => {
                "части, формируемой участниками образовательных отношений"
            }
        }
    }

    /// Find the category whose marker text equals `text` exactly
    pub fn from_category(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.category() == text)
    }
}

/// Workload category a work type rolls up into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkCategory {
    Classroom,
    OtherContact,
    Individual,
}

/// Recognized work-type columns of a semester block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkKind {
    Lectures,
    Laboratories,
    Practices,
    Consultations,
    ControlIndividual,
    Certifications,
    Individuals,
    ExamPreparation,
}

impl WorkKind {
    pub const ALL: [WorkKind; 8] = [
        WorkKind::Lectures,
        WorkKind::Laboratories,
        WorkKind::Practices,
        WorkKind::Consultations,
        WorkKind::ControlIndividual,
        WorkKind::Certifications,
        WorkKind::Individuals,
        WorkKind::ExamPreparation,
    ];

    /// Column label printed in the work-name header row
    pub fn label(&self) -> &'static str {
        match self {
            WorkKind::Lectures => "Лек",
            WorkKind::Laboratories => "Лаб",
            WorkKind::Practices => "Пр",
            WorkKind::Consultations => "КРП",
            WorkKind::ControlIndividual => "КСР",
            WorkKind::Certifications => "ИКР",
            WorkKind::Individuals => "СР",
            WorkKind::ExamPreparation => "Контроль",
        }
    }

    /// Full name used in documents
    pub fn title(&self) -> &'static str {
        match self {
            WorkKind::Lectures => "Занятия лекционного типа",
            WorkKind::Laboratories => "Лабораторные занятия",
            WorkKind::Practices => "Практические занятия",
            WorkKind::Consultations => {
                "Групповые и индивидуальные консультации по курсовым работам (курсовым проектам)"
            }
            WorkKind::ControlIndividual => "Контроль самостоятельной работы (КСР)",
            WorkKind::Certifications => "Промежуточная аттестация (ИКР)",
            WorkKind::Individuals => "Самостоятельная работа",
            WorkKind::ExamPreparation => "Подготовка к текущему контролю",
        }
    }

    pub fn category(&self) -> WorkCategory {
        match self {
            WorkKind::Lectures
            | WorkKind::Laboratories
            | WorkKind::Practices
            | WorkKind::Consultations => WorkCategory::Classroom,
            WorkKind::ControlIndividual | WorkKind::Certifications => WorkCategory::OtherContact,
            WorkKind::Individuals | WorkKind::ExamPreparation => WorkCategory::Individual,
        }
    }

    /// Resolve a header label, ignoring whitespace ("К СР" matches "КСР")
    pub fn from_label(label: &str) -> Option<Self> {
        let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL.into_iter().find(|kind| kind.label() == compact)
    }
}

//==============================================================================
// Hours Model
//==============================================================================

/// Hours of one work type in one semester block
///
/// `index` is the sequential position of the semester block in scan order,
/// not the semester number printed on the sheet. Blank `hours` means the work
/// is not offered in that block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub index: i32,
    pub hours: String,
}

impl Semester {
    pub fn new(index: i32, hours: impl Into<String>) -> Self {
        Self {
            index,
            hours: hours.into(),
        }
    }

    pub fn blank(index: i32) -> Self {
        Self::new(index, "")
    }

    pub fn is_blank(&self) -> bool {
        self.hours.trim().is_empty()
    }
}

/// One work type (raw or rolled up) with its per-semester hours
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeWork {
    pub name: String,
    pub kind: Option<WorkKind>,
    /// Entries ordered by semester block index
    pub entries: Vec<Semester>,
    /// Sum of all entries, formatted for display
    pub total: String,
    /// Entries prepared for a document table (blanks last, aligned, at most four)
    pub display: Vec<Semester>,
}

impl TypeWork {
    pub fn new(name: impl Into<String>, kind: Option<WorkKind>, entries: Vec<Semester>) -> Self {
        let total = crate::core::hours::format_hours(
            entries
                .iter()
                .map(|s| crate::core::hours::hours_value(&s.hours))
                .sum(),
        );
        let display = crate::core::hours::sort_blanks_last(&entries);
        Self {
            name: name.into(),
            kind,
            entries,
            total,
            display,
        }
    }

    pub fn category(&self) -> Option<WorkCategory> {
        self.kind.map(|k| k.category())
    }
}

/// Per-semester hours of a discipline, split by workload category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemestersHours {
    pub classroom_works: Vec<TypeWork>,
    pub other_contact_works: Vec<TypeWork>,
    pub individual_works: Vec<TypeWork>,
    pub classroom_works_all: String,
    pub other_contact_works_all: String,
    pub individual_works_all: String,
    pub classroom: TypeWork,
    pub other_contact: TypeWork,
    pub individual: TypeWork,
    pub contact: TypeWork,
    pub control: TypeWork,
    pub total: TypeWork,
    pub total_units: TypeWork,
    pub credit_unit_hours: u32,
    /// Smallest block index with classroom hours, or -1
    pub first_semester: i32,
}

//==============================================================================
// Discipline Records
//==============================================================================

/// Department a discipline is assigned to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub director: String,
    pub teachers: Vec<String>,
}

impl Department {
    pub fn new(name: impl Into<String>, director: impl Into<String>, teachers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            director: director.into(),
            teachers,
        }
    }

    /// Name with its first letter lower-cased, for use mid-sentence
    pub fn name_for_report(&self) -> String {
        lowercase_first(&self.name)
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// A discipline row of the plan, as extracted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discipline {
    pub code: String,
    pub name: String,
    pub mandatory: String,
    pub competencies: Vec<String>,
    pub total_units: i32,
    pub total_hours: i32,
    pub semesters_hours: SemestersHours,
    pub department: Department,
}

/// Name and hours of a discipline, without the rest of the record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineHours {
    pub name: String,
    pub semesters_hours: SemestersHours,
}

pub(crate) fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
