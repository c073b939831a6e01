//! Tab error types

use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("Editor unavailable: {0}")]
    EditorUnavailable(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl From<quire_surface::SurfaceError> for TabError {
    fn from(e: quire_surface::SurfaceError) -> Self {
        match e {
            quire_surface::SurfaceError::EditorUnavailable(label) => {
                TabError::EditorUnavailable(label)
            }
        }
    }
}
