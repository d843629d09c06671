use actix_web::{HttpResponse, ResponseError};
use std::path::PathBuf;
use thiserror::Error;

/// Why a table could not be read. Never fatal: the caller gets an empty
/// table and keeps this as a notice.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("Source not found: {source_name}. Please ensure the dummy data is generated.")]
    SourceNotFound { source_name: String },

    #[error("Sheet '{sheet}' is missing from {source_name}")]
    SheetMissing { sheet: String, source_name: String },

    #[error("Error loading data from '{source_name}': {reason}")]
    Unreadable { source_name: String, reason: String },

    #[error("Error fetching '{url}': {reason}")]
    RemoteFetch { url: String, reason: String },
}

/// Fatal to a generation run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Write Error: failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization Error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV Encoding Error: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Export Error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Data Unavailable: {0}")]
    DataUnavailable(#[from] LoadError),
}

impl ResponseError for DashboardError {
    fn error_response(&self) -> HttpResponse {
        match self {
            DashboardError::ValidationError(_) => {
                HttpResponse::BadRequest().body(self.to_string())
            }
            DashboardError::UnknownTable(_) => HttpResponse::BadRequest().body(self.to_string()),
            DashboardError::ExportError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
            DashboardError::DataUnavailable(_) => {
                HttpResponse::ServiceUnavailable().body(self.to_string())
            }
        }
    }
}
