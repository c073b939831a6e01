//! Clipboard capability

use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;

use quire_export::{ServiceError, ServiceResult};

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: String) -> BoxFuture<'_, ServiceResult>;
}

/// Process-local clipboard for hosts without a system clipboard
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write, as a browser does without
    /// permission
    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'_, ServiceResult> {
        async move {
            if self.denied {
                return Err(ServiceError::Rejected(
                    "clipboard write not permitted".to_string(),
                ));
            }
            *self.contents.lock() = Some(text);
            Ok(())
        }
        .boxed()
    }
}
