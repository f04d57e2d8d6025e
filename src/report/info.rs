//! Approval protocols and authorship attached to generated reports

use crate::error::RedactorResult;
use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text used wherever a report value could not be derived
pub const FILL_MANUALLY: &str = "Необходимо заполнить вручную";

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Approval protocol of a discipline program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    pub number: u32,
    /// RFC 3339 timestamp of the meeting
    pub date: DateTime<FixedOffset>,
    /// Offset the date is shown in; defaults to the timestamp's own offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_seconds: Option<i32>,
}

impl Protocol {
    /// "№ 5 от 3 марта 2024"
    pub fn render(&self) -> String {
        let date = match self.utc_offset_seconds.and_then(FixedOffset::east_opt) {
            Some(offset) => self.date.with_timezone(&offset),
            None => self.date,
        };
        format!(
            "№ {} от {} {} {}",
            self.number,
            date.day(),
            MONTHS_GENITIVE[date.month0() as usize],
            date.year()
        )
    }
}

/// Extra report data supplied by the user
///
/// ```yaml
/// department_protocol:
///   number: 5
///   date: 2024-03-03T10:00:00+03:00
/// year: 2024
/// creators: ["Иванов И.И."]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportInfo {
    pub department_protocol: Option<Protocol>,
    pub commission_protocol: Option<Protocol>,
    pub year: Option<i32>,
    pub creators: Option<Vec<String>>,
}

impl ReportInfo {
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

    pub fn department_protocol_string(&self) -> String {
        protocol_string(self.department_protocol.as_ref())
    }

    pub fn commission_protocol_string(&self) -> String {
        protocol_string(self.commission_protocol.as_ref())
    }
}

fn protocol_string(protocol: Option<&Protocol>) -> String {
    protocol
        .map(Protocol::render)
        .unwrap_or_else(|| FILL_MANUALLY.to_string())
}
