//! Command table
//!
//! The UI translates clicks and keystrokes into an `Action` and hands it to
//! `Workspace::dispatch`. Text form, for key bindings and scripting:
//! - `switch <tab>` / `close <tab>` / `copy <tab>`
//! - `export <tab> [file|docx|print]`
//! - `preview <tab> on|off`
//! - `close-all` / `export-all`

use serde::{Deserialize, Serialize};

use quire_export::{BulkExportSummary, Destination};
use quire_tabs::{Tab, TabId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Switch(TabId),
    Close(TabId),
    CloseAll,
    Export(TabId, Destination),
    ExportAll,
    Copy(TabId),
    SetPreview(TabId, bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Switch,
    Close,
    CloseAll,
    Export,
    ExportAll,
    Copy,
    SetPreview,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Switch(_) => ActionKind::Switch,
            Action::Close(_) => ActionKind::Close,
            Action::CloseAll => ActionKind::CloseAll,
            Action::Export(_, _) => ActionKind::Export,
            Action::ExportAll => ActionKind::ExportAll,
            Action::Copy(_) => ActionKind::Copy,
            Action::SetPreview(_, _) => ActionKind::SetPreview,
        }
    }

    /// Tab the action is aimed at, if it targets a single one
    pub fn target(&self) -> Option<TabId> {
        match self {
            Action::Switch(id)
            | Action::Close(id)
            | Action::Export(id, _)
            | Action::Copy(id)
            | Action::SetPreview(id, _) => Some(*id),
            Action::CloseAll | Action::ExportAll => None,
        }
    }

    /// Parse the text form of an action
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let verb = parts.next()?.to_lowercase();

        let action = match verb.as_str() {
            "close-all" => Action::CloseAll,
            "export-all" => Action::ExportAll,
            "switch" => Action::Switch(parts.next()?.parse().ok()?),
            "close" => Action::Close(parts.next()?.parse().ok()?),
            "copy" => Action::Copy(parts.next()?.parse().ok()?),
            "export" => {
                let id = parts.next()?.parse().ok()?;
                let destination = match parts.next() {
                    Some(d) => d.parse().ok()?,
                    None => Destination::File,
                };
                Action::Export(id, destination)
            }
            "preview" => {
                let id = parts.next()?.parse().ok()?;
                let enabled = match parts.next()?.to_lowercase().as_str() {
                    "on" | "true" => true,
                    "off" | "false" => false,
                    _ => return None,
                };
                Action::SetPreview(id, enabled)
            }
            _ => return None,
        };

        // Trailing words mean the input was not what we think it is
        if parts.next().is_some() {
            return None;
        }

        Some(action)
    }
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Switch => "switch",
            ActionKind::Close => "close",
            ActionKind::CloseAll => "close-all",
            ActionKind::Export => "export",
            ActionKind::ExportAll => "export-all",
            ActionKind::Copy => "copy",
            ActionKind::SetPreview => "preview",
        }
    }
}

/// What a tab looks like to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub title: String,
    pub state: String,
    pub is_active: bool,
    pub preview_mode: bool,
    pub preview_html: Option<String>,
}

impl From<Tab> for TabInfo {
    fn from(tab: Tab) -> Self {
        let is_active = tab.is_active();
        Self {
            id: tab.id,
            title: tab.title,
            state: tab.state.as_str().to_string(),
            is_active,
            preview_mode: tab.preview_mode,
            preview_html: tab.preview_html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutput {
    Tab(TabInfo),
    Closed(usize),
    Exported(BulkExportSummary),
    Done,
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CommandResult<U> {
        CommandResult {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targeted_actions() {
        assert_eq!(Action::parse("switch tab-2"), Some(Action::Switch(TabId(2))));
        assert_eq!(Action::parse("CLOSE tab-3"), Some(Action::Close(TabId(3))));
        assert_eq!(
            Action::parse("export tab-1"),
            Some(Action::Export(TabId(1), Destination::File))
        );
        assert_eq!(
            Action::parse("export tab-1 docx"),
            Some(Action::Export(TabId(1), Destination::Document))
        );
        assert_eq!(
            Action::parse("preview tab-4 on"),
            Some(Action::SetPreview(TabId(4), true))
        );
    }

    #[test]
    fn test_parse_bulk_actions() {
        assert_eq!(Action::parse("export-all"), Some(Action::ExportAll));
        assert_eq!(Action::parse("  close-all "), Some(Action::CloseAll));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Action::parse("").is_none());
        assert!(Action::parse("switch").is_none());
        assert!(Action::parse("switch 2").is_none());
        assert!(Action::parse("export tab-1 pdf").is_none());
        assert!(Action::parse("preview tab-1 maybe").is_none());
        assert!(Action::parse("close-all now").is_none());
    }

    #[test]
    fn test_kind_and_target() {
        let action = Action::Export(TabId(7), Destination::Print);
        assert_eq!(action.kind(), ActionKind::Export);
        assert_eq!(action.target(), Some(TabId(7)));
        assert_eq!(Action::ExportAll.target(), None);
        assert_eq!(ActionKind::CloseAll.as_str(), "close-all");
    }

    #[test]
    fn test_command_result_map() {
        let result = CommandResult::ok(2).map(|n| n * 10);
        assert!(result.success);
        assert_eq!(result.data, Some(20));

        let failed: CommandResult<i32> = CommandResult::err("nope".to_string());
        assert_eq!(failed.map(|n| n + 1).error.as_deref(), Some("nope"));
    }
}
