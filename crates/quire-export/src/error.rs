//! Export error types

use thiserror::Error;

use quire_tabs::{TabError, TabId};

use crate::destination::Destination;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("Editor unavailable: {0}")]
    EditorUnavailable(String),

    #[error("Export to {destination} failed: {reason}")]
    Failure {
        destination: Destination,
        reason: String,
    },

    #[error("Tab error: {0}")]
    Tab(TabError),
}

impl From<TabError> for ExportError {
    fn from(e: TabError) -> Self {
        match e {
            TabError::NotFound(id) => ExportError::NotFound(id),
            TabError::EditorUnavailable(label) => ExportError::EditorUnavailable(label),
            other => ExportError::Tab(other),
        }
    }
}

/// Rejection reported by an external export, print or clipboard service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
