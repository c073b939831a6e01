//! Export Orchestrator
//!
//! Every export first captures the tab's title and live surface text, so a
//! tab closed while its export is in flight does not disturb the export.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use quire_tabs::{TabId, TabRegistry, TabSnapshot};

use crate::destination::Destination;
use crate::error::ExportError;
use crate::naming::{document_file_name, print_title};
use crate::paragraph::segment;
use crate::services::{
    DocumentExportService, MarkdownFileExporter, MarkdownRenderService, PrintService,
};
use crate::sink::{LogLevel, LogSink};
use crate::Result;

#[derive(Clone)]
pub struct ExportServices {
    pub markdown: Arc<dyn MarkdownFileExporter>,
    pub document: Arc<dyn DocumentExportService>,
    pub print: Arc<dyn PrintService>,
    pub renderer: Arc<dyn MarkdownRenderService>,
}

/// Outcome of a bulk export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkExportSummary {
    pub total: usize,
    pub succeeded: usize,
}

impl BulkExportSummary {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn message(&self) -> String {
        if self.all_succeeded() {
            format!("Successfully exported all {} tabs.", self.total)
        } else {
            format!(
                "Successfully exported {} of {} tabs.",
                self.succeeded, self.total
            )
        }
    }
}

pub struct ExportOrchestrator {
    registry: TabRegistry,
    services: ExportServices,
    sink: Arc<dyn LogSink>,
}

impl ExportOrchestrator {
    pub fn new(registry: TabRegistry, services: ExportServices, sink: Arc<dyn LogSink>) -> Self {
        Self {
            registry,
            services,
            sink,
        }
    }

    pub fn services(&self) -> &ExportServices {
        &self.services
    }

    /// Export one tab. Failures are logged and reported as `false`.
    pub async fn export(&self, id: TabId, destination: Destination) -> bool {
        let snapshot = match self.registry.snapshot(id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report_lookup_failure(ExportError::from(e));
                return false;
            }
        };

        self.export_snapshot(snapshot, destination).await.is_ok()
    }

    /// Export text captured earlier, independent of the registry
    pub async fn export_snapshot(
        &self,
        snapshot: TabSnapshot,
        destination: Destination,
    ) -> Result<()> {
        tracing::debug!(tab_id = %snapshot.id, destination = %destination, "Exporting tab");

        match destination {
            Destination::File => self.export_markdown(snapshot).await,
            Destination::Document => self.export_document(snapshot).await,
            Destination::Print => self.export_print(snapshot).await,
        }
    }

    /// Export every tab as markdown, strictly one after another
    pub async fn export_all(&self) -> BulkExportSummary {
        let ids = self.registry.ids();

        if ids.is_empty() {
            self.sink.log("No tabs to export.", LogLevel::Warning);
            return BulkExportSummary {
                total: 0,
                succeeded: 0,
            };
        }

        self.sink.log(
            &format!("Starting export of {} tabs...", ids.len()),
            LogLevel::Info,
        );

        let total = ids.len();
        let mut succeeded = 0;

        for id in ids {
            // Captured right before its own export, so edits made while
            // earlier tabs were exporting are included.
            let snapshot = match self.registry.snapshot(id) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(tab_id = %id, error = %e, "Skipping tab in bulk export");
                    self.report_lookup_failure(ExportError::from(e));
                    continue;
                }
            };

            // Awaited before the next one starts: document generation is
            // heavy, and overlapping runs exhaust the host.
            if self
                .run_markdown(snapshot.text, snapshot.title.clone())
                .await
            {
                succeeded += 1;
            } else {
                self.sink.log(
                    &format!("Failed to export {}", snapshot.title),
                    LogLevel::Error,
                );
            }
        }

        let summary = BulkExportSummary { total, succeeded };
        let level = if summary.all_succeeded() {
            LogLevel::Info
        } else {
            LogLevel::Warning
        };
        self.sink.log(&summary.message(), level);

        tracing::info!(total, succeeded, "Bulk export finished");

        summary
    }

    async fn export_markdown(&self, snapshot: TabSnapshot) -> Result<()> {
        let TabSnapshot { title, text, .. } = snapshot;

        if self.run_markdown(text, title.clone()).await {
            self.sink
                .log(&format!("Exported {} successfully", title), LogLevel::Info);
            Ok(())
        } else {
            self.sink
                .log(&format!("Failed to export {}", title), LogLevel::Error);
            Err(ExportError::Failure {
                destination: Destination::File,
                reason: format!("markdown export of {} was rejected", title),
            })
        }
    }

    async fn run_markdown(&self, text: String, title: String) -> bool {
        self.services.markdown.export(text, title).await
    }

    async fn export_document(&self, snapshot: TabSnapshot) -> Result<()> {
        let paragraphs = segment(&snapshot.text);
        let filename = document_file_name(&snapshot.title);

        match self
            .services
            .document
            .export(paragraphs, filename.clone())
            .await
        {
            Ok(()) => {
                self.sink.log(
                    &format!("Successfully exported {}.", filename),
                    LogLevel::Info,
                );
                Ok(())
            }
            Err(e) => {
                self.sink
                    .log(&format!("Error exporting DOCX: {}", e), LogLevel::Error);
                Err(ExportError::Failure {
                    destination: Destination::Document,
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn export_print(&self, snapshot: TabSnapshot) -> Result<()> {
        let html = self.services.renderer.render(&snapshot.text);
        let title = print_title(&snapshot.title, Local::now().date_naive());

        match self.services.print.print(html, title.clone()).await {
            Ok(()) => {
                self.sink
                    .log(&format!("Printed {}", snapshot.title), LogLevel::Info);
                Ok(())
            }
            Err(e) => {
                self.sink
                    .log(&format!("Print failed for {}: {}", title, e), LogLevel::Error);
                Err(ExportError::Failure {
                    destination: Destination::Print,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn report_lookup_failure(&self, error: ExportError) {
        match &error {
            ExportError::NotFound(id) => {
                self.sink
                    .log(&format!("Tab {} not found", id), LogLevel::Warning);
            }
            ExportError::EditorUnavailable(label) => {
                self.sink.log(
                    &format!("Could not find editor for tab {}", label),
                    LogLevel::Error,
                );
            }
            other => self.sink.log(&other.to_string(), LogLevel::Error),
        }
    }
}

impl Clone for ExportOrchestrator {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            services: self.services.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}
