//! Quire Tab Management
//!
//! Open documents live as tabs in a registry. Each tab is bound to its own
//! editing surface and moves through a small state machine:
//! `Created -> {Active <-> Inactive} -> Closed`.

mod error;
mod registry;
mod state;
mod sync;
mod tab;

pub use error::TabError;
pub use registry::{TabRegistry, TabSnapshot};
pub use state::TabState;
pub use tab::{SourceDocument, Tab, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
