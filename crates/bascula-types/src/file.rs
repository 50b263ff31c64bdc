//! Generated output file metadata

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of report file produced from a generation run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Spreadsheet report (.xlsx)
    #[default]
    Excel,
    /// All ticket slips in one text file
    Txt,
    /// One text slip per ticket, zipped
    Zip,
    /// Spreadsheet rows as CSV
    Csv,
}

impl FileKind {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Excel => "xlsx",
            FileKind::Txt => "txt",
            FileKind::Zip => "zip",
            FileKind::Csv => "csv",
        }
    }

    /// Stem prefix used when naming a freshly generated file
    pub fn file_prefix(&self) -> &'static str {
        match self {
            FileKind::Excel | FileKind::Csv => "reporte",
            FileKind::Txt | FileKind::Zip => "tickets",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Excel => write!(f, "excel"),
            FileKind::Txt => write!(f, "txt"),
            FileKind::Zip => write!(f, "zip"),
            FileKind::Csv => write!(f, "csv"),
        }
    }
}

/// Registry entry for a file written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub id: u64,
    pub name: String,
    pub kind: FileKind,
    pub path: String,
    pub created_at: DateTime<Utc>,
}
