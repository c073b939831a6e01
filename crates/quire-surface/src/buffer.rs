//! In-memory buffer surface
//!
//! Backs tabs when no graphical editor is attached, and stands in for one in
//! tests. `edit` plays the role of a keystroke: it replaces the text and
//! notifies listeners, while `set_content` stays silent.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::SurfaceError;
use crate::surface::{ChangeCallback, EditingSurface, EditingSurfaceFactory, SurfaceConfig};
use crate::Result;

struct BufferState {
    content: String,
    disposed: bool,
    listeners: Vec<Arc<ChangeCallback>>,
}

pub struct BufferSurface {
    label: String,
    state: Mutex<BufferState>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl BufferSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            label: config.label,
            state: Mutex::new(BufferState {
                content: config.initial_content,
                disposed: false,
                listeners: Vec::new(),
            }),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Simulate a user edit: replace the text and notify every listener
    pub fn edit(&self, content: &str) -> Result<()> {
        let listeners = {
            let mut state = self.state.lock();
            if state.disposed {
                return Err(self.unavailable());
            }
            state.content = content.to_string();
            state.listeners.clone()
        };

        // Listeners may call back into whoever owns this surface,
        // so they run without the buffer lock held.
        for listener in listeners {
            listener(content);
        }

        Ok(())
    }

    /// Number of `get_content` calls served so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set_content` calls served so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn unavailable(&self) -> SurfaceError {
        SurfaceError::EditorUnavailable(self.label.clone())
    }
}

impl EditingSurface for BufferSurface {
    fn get_content(&self) -> Result<String> {
        let state = self.state.lock();
        if state.disposed {
            return Err(self.unavailable());
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(state.content.clone())
    }

    fn set_content(&self, content: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.disposed {
            return Err(self.unavailable());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        state.content = content.to_string();
        Ok(())
    }

    fn on_change(&self, callback: ChangeCallback) -> Result<()> {
        let mut state = self.state.lock();
        if state.disposed {
            return Err(self.unavailable());
        }
        state.listeners.push(Arc::new(callback));
        Ok(())
    }

    fn dispose(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.disposed {
            return Err(self.unavailable());
        }
        state.disposed = true;
        state.listeners.clear();

        tracing::debug!(surface = %self.label, "Disposed editing surface");

        Ok(())
    }

    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

/// Mounts `BufferSurface`s and keeps a handle to each one it created
#[derive(Default)]
pub struct BufferSurfaceFactory {
    mounted: Mutex<Vec<Arc<BufferSurface>>>,
}

impl BufferSurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every surface mounted so far, in mount order
    pub fn mounted(&self) -> Vec<Arc<BufferSurface>> {
        self.mounted.lock().clone()
    }

    /// Surface mounted for `label`, the most recent one if several share it
    pub fn surface(&self, label: &str) -> Option<Arc<BufferSurface>> {
        self.mounted
            .lock()
            .iter()
            .rev()
            .find(|s| s.label() == label)
            .cloned()
    }
}

impl EditingSurfaceFactory for BufferSurfaceFactory {
    fn mount(&self, config: SurfaceConfig) -> Result<Arc<dyn EditingSurface>> {
        let surface = Arc::new(BufferSurface::new(config));
        self.mounted.lock().push(Arc::clone(&surface));

        tracing::debug!(surface = %surface.label(), "Mounted buffer surface");

        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let surface = BufferSurface::new(SurfaceConfig::new("tab-1"));

        for text in ["", "plain", "# Title\n## Scope\n### Detail", "ünïcödé\n\n"] {
            surface.set_content(text).unwrap();
            assert_eq!(surface.get_content().unwrap(), text);
        }
    }

    #[test]
    fn test_initial_content() {
        let surface = BufferSurface::new(SurfaceConfig::new("tab-1").with_content("draft"));
        assert_eq!(surface.get_content().unwrap(), "draft");
    }

    #[test]
    fn test_edit_notifies_but_set_content_does_not() {
        let surface = BufferSurface::new(SurfaceConfig::new("tab-1"));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        surface
            .on_change(Box::new(move |text| sink.lock().push(text.to_string())))
            .unwrap();

        surface.set_content("quiet").unwrap();
        surface.edit("typed").unwrap();

        assert_eq!(*seen.lock(), vec!["typed".to_string()]);
        assert_eq!(surface.get_content().unwrap(), "typed");
    }

    #[test]
    fn test_dispose_exactly_once() {
        let surface = BufferSurface::new(SurfaceConfig::new("tab-7"));
        surface.dispose().unwrap();
        assert!(surface.is_disposed());

        assert_eq!(
            surface.dispose(),
            Err(SurfaceError::EditorUnavailable("tab-7".to_string()))
        );
        assert!(surface.get_content().is_err());
        assert!(surface.set_content("late").is_err());
        assert!(surface.edit("late").is_err());
    }

    #[test]
    fn test_factory_tracks_mounts() {
        let factory = BufferSurfaceFactory::new();
        factory.mount(SurfaceConfig::new("tab-1")).unwrap();
        factory.mount(SurfaceConfig::new("tab-2")).unwrap();

        assert_eq!(factory.mounted().len(), 2);
        assert_eq!(factory.surface("tab-2").unwrap().label(), "tab-2");
        assert!(factory.surface("tab-3").is_none());
    }
}
