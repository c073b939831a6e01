//! Surface error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Editor unavailable: {0}")]
    EditorUnavailable(String),
}
