//! Quire Editing Surfaces
//!
//! A tab never talks to a concrete editor widget. It holds a handle to
//! something that can be mounted, holds a string, reports user edits and
//! can be disposed exactly once.

mod buffer;
mod error;
mod surface;

pub use buffer::{BufferSurface, BufferSurfaceFactory};
pub use error::SurfaceError;
pub use surface::{ChangeCallback, EditingSurface, EditingSurfaceFactory, SurfaceConfig};

pub type Result<T> = std::result::Result<T, SurfaceError>;
