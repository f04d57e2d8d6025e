//! Extraction settings

use crate::error::RedactorResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Width in columns of one semester block when the file does not say otherwise
pub const DEFAULT_SEMESTER_OFFSET: usize = 8;
/// Academic hours per credit unit when the norms sheet does not say otherwise
pub const DEFAULT_CREDIT_UNIT_HOURS: u32 = 36;

/// Settings read from an optional YAML file
///
/// ```yaml
/// semester_offset: 8
/// default_credit_unit_hours: 36
/// departments: departments.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactorConfig {
    /// Columns per semester block (work types of one semester)
    pub semester_offset: usize,
    pub default_credit_unit_hours: u32,
    /// Department roster file (.txt / .xlsx)
    pub departments: Option<PathBuf>,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            semester_offset: DEFAULT_SEMESTER_OFFSET,
            default_credit_unit_hours: DEFAULT_CREDIT_UNIT_HOURS,
            departments: None,
        }
    }
}

impl RedactorConfig {
    /// Load from a YAML file; missing keys keep their defaults
    pub fn load(path: &Path) -> RedactorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> RedactorResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
