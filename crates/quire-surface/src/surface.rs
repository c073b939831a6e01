//! Editing surface capability
//!
//! The minimal contract a rich-text editor has to satisfy to back a tab:
//! ```text
//! mount(config) -> surface
//!   get_content / set_content / on_change   (any number of times)
//!   dispose                                 (exactly once)
//! ```

use std::sync::Arc;

use crate::Result;

/// Invoked with the full surface text after every user edit.
pub type ChangeCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Options used when mounting a fresh surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Label of the tab the surface is mounted for, used in diagnostics
    pub label: String,
    /// Text the surface starts with
    pub initial_content: String,
    /// Whether the editor should run its spell checker
    pub spell_checker: bool,
}

impl SurfaceConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            initial_content: String::new(),
            spell_checker: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.initial_content = content.into();
        self
    }
}

pub trait EditingSurface: Send + Sync {
    /// Current text held by the surface
    fn get_content(&self) -> Result<String>;

    /// Replace the text programmatically. Implementations may notify change
    /// listeners from here, as most browser editors do.
    fn set_content(&self, content: &str) -> Result<()>;

    /// Register a listener for user edits
    fn on_change(&self, callback: ChangeCallback) -> Result<()>;

    /// Release the surface. A second call fails with `EditorUnavailable`.
    fn dispose(&self) -> Result<()>;

    fn is_disposed(&self) -> bool;
}

pub trait EditingSurfaceFactory: Send + Sync {
    fn mount(&self, config: SurfaceConfig) -> Result<Arc<dyn EditingSurface>>;
}
