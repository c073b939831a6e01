//! Quire Export
//!
//! Turns the live text of a tab into an artifact:
//! - `File`: markdown file named `<title>_<YYYYMMDD>.md`
//! - `Document`: word-processor paragraphs with heading levels 1-3
//! - `Print`: rendered html handed to a print-capable surface
//!
//! Bulk export runs the file export over every tab, one at a time.

mod destination;
mod error;
mod markdown;
mod naming;
mod orchestrator;
mod paragraph;
mod print;
mod render;
mod services;
mod sink;

pub use destination::Destination;
pub use error::{ExportError, ServiceError};
pub use markdown::FsMarkdownExporter;
pub use naming::{date_stamp, document_file_name, markdown_file_name, print_title, sanitize_file_name};
pub use orchestrator::{BulkExportSummary, ExportOrchestrator, ExportServices};
pub use paragraph::{segment, Paragraph, ParagraphLevel};
pub use print::{print_page, HtmlPrintService};
pub use render::CmarkRenderer;
pub use services::{
    DocumentExportService, MarkdownFileExporter, MarkdownRenderService, PrintService,
    ServiceResult,
};
pub use sink::{LogLevel, LogSink};

pub type Result<T> = std::result::Result<T, ExportError>;
