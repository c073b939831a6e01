//! Tab Registry
//!
//! Owns every open tab, its editing surface and the active pointer.
//! One registry exists per UI context; clones share the same state.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use quire_surface::{EditingSurface, EditingSurfaceFactory, SurfaceConfig};

use crate::error::TabError;
use crate::sync;
use crate::tab::{SourceDocument, Tab, TabId};
use crate::Result;

pub const DEFAULT_PLACEHOLDER_TITLE: &str = "BRD";

pub(crate) struct TabEntry {
    pub(crate) tab: Tab,
    pub(crate) surface: Arc<dyn EditingSurface>,
}

pub(crate) struct RegistryState {
    /// Keyed by monotonic id, so iteration is creation order
    pub(crate) tabs: BTreeMap<TabId, TabEntry>,
    pub(crate) active_id: Option<TabId>,
    next_id: u64,
}

/// Title and live text of a tab, captured before any async work starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub id: TabId,
    pub title: String,
    pub text: String,
}

pub struct TabRegistry {
    state: Arc<RwLock<RegistryState>>,
    surfaces: Arc<dyn EditingSurfaceFactory>,
    placeholder: String,
}

impl TabRegistry {
    pub fn new(surfaces: Arc<dyn EditingSurfaceFactory>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                tabs: BTreeMap::new(),
                active_id: None,
                next_id: 0,
            })),
            surfaces,
            placeholder: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }

    /// Prefix used for tabs whose document has no name
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Open a tab for `document`. The new tab is not activated.
    pub fn create(&self, document: &SourceDocument) -> Result<TabId> {
        let id = {
            let mut state = self.state.write();
            state.next_id += 1;
            TabId(state.next_id)
        };

        let tab = Tab::new(id, document, &self.placeholder);

        let surface = self
            .surfaces
            .mount(SurfaceConfig::new(id.to_string()).with_content(tab.content.clone()))?;

        if let Err(e) = surface.on_change(sync::write_through(Arc::downgrade(&self.state), id)) {
            let _ = surface.dispose();
            return Err(e.into());
        }

        tracing::info!(tab_id = %id, title = %tab.title, source = %tab.source_ref, "Created new tab");

        self.state.write().tabs.insert(id, TabEntry { tab, surface });

        Ok(id)
    }

    /// Make `id` the active tab.
    ///
    /// The outgoing tab is flushed from its surface first, then the target's
    /// stored content is written into its own surface.
    pub fn switch_active(&self, id: TabId) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        if !state.tabs.contains_key(&id) {
            return Err(TabError::NotFound(id));
        }

        if state.active_id == Some(id) {
            return Ok(());
        }

        let previous = state.active_id;

        if let Some(prev_id) = previous {
            if let Some(outgoing) = state.tabs.get_mut(&prev_id) {
                sync::flush(outgoing)?;
            }
        }

        let incoming = state.tabs.get_mut(&id).ok_or(TabError::NotFound(id))?;
        sync::load(incoming)?;
        incoming.tab.activate()?;

        if let Some(prev_id) = previous {
            if let Some(outgoing) = state.tabs.get_mut(&prev_id) {
                outgoing.tab.deactivate()?;
            }
        }

        state.active_id = Some(id);

        tracing::info!(tab_id = %id, previous = ?previous.map(|p| p.to_string()), "Switched active tab");

        Ok(())
    }

    /// Close a tab, disposing its surface, and return it in `Closed` state.
    ///
    /// Closing the active tab promotes the oldest survivor.
    pub fn close(&self, id: TabId) -> Result<Tab> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let mut entry = state.tabs.remove(&id).ok_or(TabError::NotFound(id))?;
        let was_active = state.active_id == Some(id);

        if was_active {
            if let Err(e) = sync::flush(&mut entry) {
                tracing::warn!(tab_id = %id, error = %e, "Could not flush tab before close");
            }
        }

        if let Err(e) = entry.surface.dispose() {
            tracing::warn!(tab_id = %id, error = %e, "Surface already unavailable at close");
        }

        entry.tab.close()?;

        if was_active {
            state.active_id = None;

            if let Some((&next_id, next)) = state.tabs.iter_mut().next() {
                if let Err(e) = sync::load(next) {
                    tracing::warn!(tab_id = %next_id, error = %e, "Could not load promoted tab");
                }
                next.tab.activate()?;
                state.active_id = Some(next_id);

                tracing::info!(tab_id = %next_id, "Promoted tab after close");
            }
        }

        tracing::info!(tab_id = %id, "Closed tab");

        Ok(entry.tab)
    }

    /// Close every tab oldest-first. Returns how many were closed.
    pub fn close_all(&self) -> usize {
        self.ids()
            .into_iter()
            .filter(|id| self.close(*id).is_ok())
            .count()
    }

    /// Snapshot of all tabs in creation order
    pub fn list(&self) -> Vec<Tab> {
        self.state
            .read()
            .tabs
            .values()
            .map(|entry| entry.tab.clone())
            .collect()
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.state.read().tabs.keys().copied().collect()
    }

    pub fn get(&self, id: TabId) -> Result<Tab> {
        self.state
            .read()
            .tabs
            .get(&id)
            .map(|entry| entry.tab.clone())
            .ok_or(TabError::NotFound(id))
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.state.read().tabs.contains_key(&id)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.state.read().active_id
    }

    pub fn active(&self) -> Option<Tab> {
        let state = self.state.read();
        state
            .active_id
            .and_then(|id| state.tabs.get(&id))
            .map(|entry| entry.tab.clone())
    }

    pub fn len(&self) -> usize {
        self.state.read().tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().tabs.is_empty()
    }

    /// Surface handle bound to a tab
    pub fn surface(&self, id: TabId) -> Result<Arc<dyn EditingSurface>> {
        self.state
            .read()
            .tabs
            .get(&id)
            .map(|entry| Arc::clone(&entry.surface))
            .ok_or(TabError::NotFound(id))
    }

    /// Text currently held by the tab's surface
    pub fn live_content(&self, id: TabId) -> Result<String> {
        let state = self.state.read();
        let entry = state.tabs.get(&id).ok_or(TabError::NotFound(id))?;
        Ok(entry.surface.get_content()?)
    }

    /// Capture the title and live text of a tab
    pub fn snapshot(&self, id: TabId) -> Result<TabSnapshot> {
        let state = self.state.read();
        let entry = state.tabs.get(&id).ok_or(TabError::NotFound(id))?;

        Ok(TabSnapshot {
            id,
            title: entry.tab.title.clone(),
            text: entry.surface.get_content()?,
        })
    }

    /// Replace a tab's text, both stored and on its surface
    pub fn update_content(&self, id: TabId, content: String) -> Result<Tab> {
        let mut state = self.state.write();
        let entry = state.tabs.get_mut(&id).ok_or(TabError::NotFound(id))?;

        entry.surface.set_content(&content)?;
        entry.tab.set_content(content);

        Ok(entry.tab.clone())
    }

    pub fn set_preview_mode(&self, id: TabId, enabled: bool) -> Result<Tab> {
        let mut state = self.state.write();
        let entry = state.tabs.get_mut(&id).ok_or(TabError::NotFound(id))?;

        entry.tab.set_preview_mode(enabled);

        Ok(entry.tab.clone())
    }

    /// Store rendered preview html. Ignored when preview is off.
    pub fn set_preview_html(&self, id: TabId, html: String) -> Result<()> {
        let mut state = self.state.write();
        let entry = state.tabs.get_mut(&id).ok_or(TabError::NotFound(id))?;

        if entry.tab.preview_mode {
            entry.tab.preview_html = Some(html);
        }

        Ok(())
    }
}

impl Clone for TabRegistry {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            surfaces: Arc::clone(&self.surfaces),
            placeholder: self.placeholder.clone(),
        }
    }
}
