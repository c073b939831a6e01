//! Tab data structure
//!
//! A tab shows:
//! - Title (fixed when the tab is opened)
//! - The document text, or its rendered preview

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::state::TabState;
use crate::Result;

/// Monotonic tab identifier, never reused within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

impl std::str::FromStr for TabId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.strip_prefix("tab-")
            .and_then(|n| n.parse().ok())
            .map(TabId)
            .ok_or_else(|| format!("Invalid tab id: {}", s))
    }
}

/// Document handed over by the host application when a tab is opened
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Identifier of the record the document was produced from
    pub id: String,
    /// Display name, may be empty
    pub name: String,
    /// Initial text, often empty and filled in later
    pub body: String,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    /// Display title, fixed at creation
    pub title: String,
    /// Id of the source document, lookup only
    pub source_ref: String,
    /// Stored text; while the tab is active the surface is authoritative
    pub content: String,
    pub preview_mode: bool,
    /// Rendered preview, kept only while `preview_mode` is on
    pub preview_html: Option<String>,
    /// Insertion sequence number, oldest first
    pub created_order: u64,
    /// Current state in the state machine
    pub state: TabState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tab {
    pub fn new(id: TabId, document: &SourceDocument, placeholder: &str) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: derive_title(&document.name, placeholder, id),
            source_ref: document.id.clone(),
            content: document.body.clone(),
            preview_mode: false,
            preview_html: None,
            created_order: id.0,
            state: TabState::Created,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TabState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Tab state transition"
        );

        self.state = new_state;
        self.updated_at = Utc::now();

        Ok(())
    }

    pub fn activate(&mut self) -> Result<()> {
        self.transition_to(TabState::Active)
    }

    /// Move an active tab to the background
    pub fn deactivate(&mut self) -> Result<()> {
        if self.state == TabState::Active {
            self.transition_to(TabState::Inactive)
        } else {
            Ok(())
        }
    }

    pub fn close(&mut self) -> Result<()> {
        self.transition_to(TabState::Closed)
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Toggle preview; switching it off drops the rendered html
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview_mode = enabled;
        if !enabled {
            self.preview_html = None;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.state == TabState::Active
    }
}

fn derive_title(name: &str, placeholder: &str, id: TabId) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("{} {}", placeholder, id.0)
    } else {
        name.to_string()
    }
}
