//! Quire Core
//!
//! One `Workspace` per UI context owns the open tabs, their editing
//! surfaces and the export pipeline. The UI only issues `Action`s and
//! renders what the workspace reports back.

mod action;
mod clipboard;
mod config;
mod error;
mod log;
mod workspace;

pub use action::{Action, ActionKind, ActionOutput, CommandResult, TabInfo};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::Config;
pub use error::CoreError;
pub use log::{LogEntry, LogViewer};
pub use workspace::{Capabilities, Workspace};

// Re-export core components
pub use quire_export::{
    BulkExportSummary, CmarkRenderer, Destination, DocumentExportService, ExportError,
    FsMarkdownExporter, HtmlPrintService, LogLevel, LogSink, MarkdownFileExporter,
    MarkdownRenderService, Paragraph, ParagraphLevel, PrintService, ServiceError, ServiceResult,
};
pub use quire_surface::{
    BufferSurface, BufferSurfaceFactory, EditingSurface, EditingSurfaceFactory, SurfaceConfig,
    SurfaceError,
};
pub use quire_tabs::{SourceDocument, Tab, TabError, TabId, TabRegistry, TabState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
