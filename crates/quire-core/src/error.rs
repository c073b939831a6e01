//! Core error types

use thiserror::Error;

use quire_export::ExportError;
use quire_tabs::{TabError, TabId};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("Editor unavailable: {0}")]
    EditorUnavailable(String),

    #[error("Export failed: {0}")]
    ExportFailure(String),

    #[error("Clipboard denied: {0}")]
    ClipboardDenied(String),

    #[error("Invalid tab state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<TabError> for CoreError {
    fn from(e: TabError) -> Self {
        match e {
            TabError::NotFound(id) => CoreError::NotFound(id),
            TabError::EditorUnavailable(label) => CoreError::EditorUnavailable(label),
            other => CoreError::InvalidState(other.to_string()),
        }
    }
}

impl From<ExportError> for CoreError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NotFound(id) => CoreError::NotFound(id),
            ExportError::EditorUnavailable(label) => CoreError::EditorUnavailable(label),
            other => CoreError::ExportFailure(other.to_string()),
        }
    }
}
