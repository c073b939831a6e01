//! Capabilities the orchestrator delegates to
//!
//! Each one is injected, so hosts bind their own document writer or print
//! dialog and tests substitute fakes.

use futures_util::future::BoxFuture;

use crate::error::ServiceError;
use crate::paragraph::Paragraph;

pub type ServiceResult = std::result::Result<(), ServiceError>;

pub trait MarkdownFileExporter: Send + Sync {
    /// Save `text` as `<title_hint>_<YYYYMMDD>.md`. Returns false on failure.
    fn export(&self, text: String, title_hint: String) -> BoxFuture<'_, bool>;
}

pub trait DocumentExportService: Send + Sync {
    fn export(&self, paragraphs: Vec<Paragraph>, filename: String) -> BoxFuture<'_, ServiceResult>;
}

pub trait PrintService: Send + Sync {
    /// Resolves once the page has been handed to the print flow. A service
    /// able to observe the dialog may wait for it instead; completion and
    /// dismissal are both `Ok`.
    fn print(&self, html: String, title: String) -> BoxFuture<'_, ServiceResult>;
}

pub trait MarkdownRenderService: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
