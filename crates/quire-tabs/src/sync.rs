//! Content synchronization between tabs and their surfaces
//!
//! Write-through: a user edit on the active tab lands in `Tab::content`
//! immediately. Switching and closing still re-read the surface, so a
//! dropped or coalesced change event cannot leave stale content behind.

use parking_lot::RwLock;
use std::sync::Weak;

use quire_surface::ChangeCallback;

use crate::registry::{RegistryState, TabEntry};
use crate::tab::TabId;
use crate::Result;

/// Pull the live surface text into the tab
pub(crate) fn flush(entry: &mut TabEntry) -> Result<()> {
    let live = entry.surface.get_content()?;
    if live != entry.tab.content {
        tracing::trace!(tab_id = %entry.tab.id, len = live.len(), "Flushed surface content");
        entry.tab.set_content(live);
    }
    Ok(())
}

/// Push the stored tab text into its surface
pub(crate) fn load(entry: &TabEntry) -> Result<()> {
    entry.surface.set_content(&entry.tab.content)?;
    Ok(())
}

/// Change listener installed on every mounted surface.
///
/// Only edits on the active tab are recorded; the registry is held weakly
/// so a surface outliving its registry does not keep it alive.
///
/// Surfaces may notify from inside `set_content`, which the registry calls
/// while holding its own lock. Such events are skipped: every registry
/// operation that writes a surface re-reads or overwrites the tab content
/// itself.
pub(crate) fn write_through(state: Weak<RwLock<RegistryState>>, id: TabId) -> ChangeCallback {
    Box::new(move |content: &str| {
        let Some(state) = state.upgrade() else {
            return;
        };

        let Some(mut state) = state.try_write() else {
            tracing::trace!(tab_id = %id, "Registry busy, change event skipped");
            return;
        };
        if state.active_id != Some(id) {
            return;
        }

        if let Some(entry) = state.tabs.get_mut(&id) {
            entry.tab.set_content(content.to_string());
        }
    })
}
