//! CLI command handlers

pub mod commands;

pub use commands::{departments, discipline, disciplines, export, hours, names, report};
