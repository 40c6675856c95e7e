use std::io;
use thiserror::Error;

/// Errors raised while loading a catalog or settings file.
///
/// The simulation itself never fails; these only cover data coming from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl CatalogError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
