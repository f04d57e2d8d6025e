use thiserror::Error;

pub type RedactorResult<T> = Result<T, RedactorError>;

#[derive(Error, Debug)]
pub enum RedactorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("malformed or unexpected plan layout: {0}")]
    DataLayout(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Export error: {0}")]
    Export(String),
}
