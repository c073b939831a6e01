//! Workspace
//!
//! Owns all tab state for one UI context. The UI holds a handle, issues
//! operations or `Action`s, and renders the `CommandResult`s and log entries
//! it gets back. No failure escapes as a panic.

use std::sync::Arc;

use quire_export::{
    BulkExportSummary, CmarkRenderer, Destination, DocumentExportService, ExportOrchestrator,
    ExportServices, FsMarkdownExporter, HtmlPrintService, LogLevel, LogSink, MarkdownFileExporter,
    MarkdownRenderService, PrintService,
};
use quire_surface::{BufferSurfaceFactory, EditingSurfaceFactory};
use quire_tabs::{SourceDocument, TabId, TabRegistry};

use crate::action::{Action, ActionKind, ActionOutput, CommandResult, TabInfo};
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::Config;
use crate::error::CoreError;
use crate::log::LogViewer;
use crate::Result;

/// Everything the workspace talks to outside itself
#[derive(Clone)]
pub struct Capabilities {
    pub surfaces: Arc<dyn EditingSurfaceFactory>,
    pub markdown: Arc<dyn MarkdownFileExporter>,
    pub document: Arc<dyn DocumentExportService>,
    pub print: Arc<dyn PrintService>,
    pub renderer: Arc<dyn MarkdownRenderService>,
    pub clipboard: Arc<dyn Clipboard>,
}

impl Capabilities {
    /// Shipped implementations for everything except the document writer,
    /// which the host has to supply.
    pub fn standard(config: &Config, document: Arc<dyn DocumentExportService>) -> Self {
        let mut print = HtmlPrintService::new(config.export_dir.clone());
        if !config.open_print_view {
            print = print.without_launch();
        }

        Self {
            surfaces: Arc::new(BufferSurfaceFactory::new()),
            markdown: Arc::new(FsMarkdownExporter::new(config.export_dir.clone())),
            document,
            print: Arc::new(print),
            renderer: Arc::new(CmarkRenderer::new()),
            clipboard: Arc::new(MemoryClipboard::new()),
        }
    }
}

pub struct Workspace {
    config: Arc<Config>,
    registry: TabRegistry,
    orchestrator: ExportOrchestrator,
    renderer: Arc<dyn MarkdownRenderService>,
    clipboard: Arc<dyn Clipboard>,
    log: LogViewer,
}

impl Workspace {
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        let Capabilities {
            surfaces,
            markdown,
            document,
            print,
            renderer,
            clipboard,
        } = capabilities;

        let log = LogViewer::new(config.log_capacity);
        let registry = TabRegistry::new(surfaces).with_placeholder(config.placeholder_title.clone());
        let services = ExportServices {
            markdown,
            document,
            print,
            renderer: Arc::clone(&renderer),
        };
        let sink: Arc<dyn LogSink> = Arc::new(log.clone());
        let orchestrator = ExportOrchestrator::new(registry.clone(), services, sink);

        tracing::info!(export_dir = %config.export_dir.display(), "Workspace ready");

        Self {
            config: Arc::new(config),
            registry,
            orchestrator,
            renderer,
            clipboard,
            log,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn log_viewer(&self) -> &LogViewer {
        &self.log
    }

    // ==================== Tabs ====================

    /// Open a tab for `document` and bring it to the front
    pub fn open_document(&self, document: &SourceDocument) -> CommandResult<TabInfo> {
        let result = (|| -> Result<TabInfo> {
            let id = self.registry.create(document)?;
            self.registry.switch_active(id)?;
            tracing::info!(tab_id = %id, "Opened document");
            Ok(self.registry.get(id)?.into())
        })();
        self.finish(result)
    }

    pub fn switch_tab(&self, id: TabId) -> CommandResult<TabInfo> {
        let result = (|| -> Result<TabInfo> {
            self.registry.switch_active(id)?;
            Ok(self.registry.get(id)?.into())
        })();
        self.finish(result)
    }

    /// Close a tab. The returned info describes the tab as it was closed.
    pub fn close_tab(&self, id: TabId) -> CommandResult<TabInfo> {
        let result = self.registry.close(id).map(TabInfo::from).map_err(CoreError::from);
        self.finish(result)
    }

    pub fn close_all_tabs(&self) -> CommandResult<usize> {
        let closed = self.registry.close_all();
        tracing::info!(closed, "Closed all tabs");
        CommandResult::ok(closed)
    }

    /// Replace a tab's text. Re-renders the preview when it is shown.
    pub fn update_tab_content(&self, id: TabId, content: String) -> CommandResult<TabInfo> {
        let result = (|| -> Result<TabInfo> {
            let tab = self.registry.update_content(id, content)?;
            if tab.preview_mode {
                self.refresh_preview(id)?;
            }
            Ok(self.registry.get(id)?.into())
        })();
        self.finish(result)
    }

    pub fn set_preview_mode(&self, id: TabId, enabled: bool) -> CommandResult<TabInfo> {
        let result = (|| -> Result<TabInfo> {
            self.registry.set_preview_mode(id, enabled)?;
            if enabled {
                self.refresh_preview(id)?;
            }
            Ok(self.registry.get(id)?.into())
        })();
        self.finish(result)
    }

    pub fn tabs(&self) -> Vec<TabInfo> {
        self.registry.list().into_iter().map(TabInfo::from).collect()
    }

    pub fn active_tab(&self) -> Option<TabInfo> {
        self.registry.active().map(TabInfo::from)
    }

    fn refresh_preview(&self, id: TabId) -> Result<()> {
        let text = self.registry.live_content(id)?;
        let html = self.renderer.render(&text);
        self.registry.set_preview_html(id, html)?;
        tracing::debug!(tab_id = %id, "Preview refreshed");
        Ok(())
    }

    // ==================== Export ====================

    pub async fn export_tab(&self, id: TabId, destination: Destination) -> CommandResult<()> {
        let snapshot = match self.registry.snapshot(id) {
            Ok(snapshot) => snapshot,
            Err(e) => return self.fail(e.into()),
        };

        // The orchestrator has already logged the outcome
        match self.orchestrator.export_snapshot(snapshot, destination).await {
            Ok(()) => CommandResult::ok(()),
            Err(e) => CommandResult::err(CoreError::from(e).to_string()),
        }
    }

    /// Export every open tab as markdown, one after another
    pub async fn export_all(&self) -> CommandResult<BulkExportSummary> {
        let summary = self.orchestrator.export_all().await;

        if summary.all_succeeded() {
            CommandResult::ok(summary)
        } else {
            CommandResult {
                success: false,
                data: Some(summary),
                error: Some(summary.message()),
            }
        }
    }

    /// Put a tab's live text on the clipboard
    pub async fn copy_content(&self, id: TabId) -> CommandResult<()> {
        let text = match self.registry.live_content(id) {
            Ok(text) => text,
            Err(e) => return self.fail(e.into()),
        };

        match self.clipboard.write_text(text).await {
            Ok(()) => {
                self.log.log("Content copied to clipboard", LogLevel::Info);
                CommandResult::ok(())
            }
            Err(e) => {
                tracing::warn!(tab_id = %id, error = %e, "Clipboard write failed");
                self.log.log("Failed to copy content", LogLevel::Error);
                CommandResult::err(CoreError::ClipboardDenied(e.to_string()).to_string())
            }
        }
    }

    // ==================== Commands ====================

    /// Whether the UI should offer `action` right now
    pub fn is_enabled(&self, action: &Action) -> bool {
        match action.kind() {
            ActionKind::CloseAll | ActionKind::ExportAll => !self.registry.is_empty(),
            _ => action
                .target()
                .map(|id| self.registry.contains(id))
                .unwrap_or(false),
        }
    }

    pub async fn dispatch(&self, action: Action) -> CommandResult<ActionOutput> {
        tracing::debug!(action = action.kind().as_str(), "Dispatching action");

        match action {
            Action::Switch(id) => self.switch_tab(id).map(ActionOutput::Tab),
            Action::Close(id) => self.close_tab(id).map(ActionOutput::Tab),
            Action::CloseAll => self.close_all_tabs().map(ActionOutput::Closed),
            Action::Export(id, destination) => self
                .export_tab(id, destination)
                .await
                .map(|()| ActionOutput::Done),
            Action::ExportAll => self.export_all().await.map(ActionOutput::Exported),
            Action::Copy(id) => self.copy_content(id).await.map(|()| ActionOutput::Done),
            Action::SetPreview(id, enabled) => {
                self.set_preview_mode(id, enabled).map(ActionOutput::Tab)
            }
        }
    }

    fn finish<T>(&self, result: Result<T>) -> CommandResult<T> {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => self.fail(e),
        }
    }

    fn fail<T>(&self, error: CoreError) -> CommandResult<T> {
        match &error {
            CoreError::NotFound(id) => {
                self.log.log(&format!("Tab {} not found", id), LogLevel::Warning);
            }
            CoreError::EditorUnavailable(label) => {
                self.log.log(
                    &format!("Could not find editor for tab {}", label),
                    LogLevel::Error,
                );
            }
            other => self.log.log(&other.to_string(), LogLevel::Error),
        }
        CommandResult::err(error.to_string())
    }
}

impl Clone for Workspace {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            registry: self.registry.clone(),
            orchestrator: self.orchestrator.clone(),
            renderer: Arc::clone(&self.renderer),
            clipboard: Arc::clone(&self.clipboard),
            log: self.log.clone(),
        }
    }
}
