use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;

use quire_core::{
    Action, ActionOutput, BufferSurfaceFactory, Capabilities, Config, Destination,
    DocumentExportService, EditingSurface, LogLevel, MarkdownFileExporter, MemoryClipboard,
    Paragraph, ParagraphLevel, ServiceError, ServiceResult, SourceDocument, TabId, Workspace,
};

#[derive(Default)]
struct FlakyExporter {
    fail_on: Vec<usize>,
    calls: AtomicUsize,
    titles: Mutex<Vec<String>>,
}

impl MarkdownFileExporter for FlakyExporter {
    fn export(&self, _text: String, title_hint: String) -> BoxFuture<'_, bool> {
        async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::task::yield_now().await;
            self.titles.lock().push(title_hint);
            !self.fail_on.contains(&call)
        }
        .boxed()
    }
}

#[derive(Default)]
struct Documents {
    received: Mutex<Vec<(Vec<Paragraph>, String)>>,
}

impl DocumentExportService for Documents {
    fn export(&self, paragraphs: Vec<Paragraph>, filename: String) -> BoxFuture<'_, ServiceResult> {
        async move {
            if filename.starts_with("Broken") {
                return Err(ServiceError::Rejected("writer crashed".to_string()));
            }
            self.received.lock().push((paragraphs, filename));
            Ok(())
        }
        .boxed()
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    surfaces: Arc<BufferSurfaceFactory>,
    markdown: Arc<FlakyExporter>,
    documents: Arc<Documents>,
    clipboard: Arc<MemoryClipboard>,
    ws: Workspace,
}

fn harness_with(markdown: FlakyExporter, clipboard: MemoryClipboard) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(dir.path().to_path_buf());
    config.open_print_view = false;

    let surfaces = Arc::new(BufferSurfaceFactory::new());
    let markdown = Arc::new(markdown);
    let documents = Arc::new(Documents::default());
    let clipboard = Arc::new(clipboard);

    let mut capabilities = Capabilities::standard(&config, documents.clone());
    capabilities.surfaces = surfaces.clone();
    capabilities.markdown = markdown.clone();
    capabilities.clipboard = clipboard.clone();

    Harness {
        _dir: dir,
        surfaces,
        markdown,
        documents,
        clipboard,
        ws: Workspace::new(config, capabilities),
    }
}

fn harness() -> Harness {
    harness_with(FlakyExporter::default(), MemoryClipboard::new())
}

fn open(ws: &Workspace, name: &str, body: &str) -> TabId {
    ws.open_document(&SourceDocument::new(name, name).with_body(body))
        .data
        .unwrap()
        .id
}

fn type_into(h: &Harness, id: TabId, text: &str) {
    h.surfaces.surface(&id.to_string()).unwrap().edit(text).unwrap();
}

#[test]
fn test_edits_survive_switching() {
    let h = harness();
    let login = open(&h.ws, "Login", "");
    let billing = open(&h.ws, "Billing", "");

    h.ws.switch_tab(billing);
    type_into(&h, billing, "billing notes");
    h.ws.switch_tab(login);

    let stored = h.ws.registry().get(billing).unwrap();
    assert_eq!(stored.content, "billing notes");

    h.ws.switch_tab(billing);
    let surface = h.surfaces.surface(&billing.to_string()).unwrap();
    assert_eq!(surface.get_content().unwrap(), "billing notes");
}

#[test]
fn test_ids_are_distinct_and_increasing() {
    let h = harness();
    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        ids.push(open(&h.ws, name, ""));
    }
    h.ws.close_tab(ids[1]);
    ids.push(open(&h.ws, "D", ""));

    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(h.ws.tabs().len(), 3);
}

#[test]
fn test_closing_active_promotes_oldest() {
    let h = harness();
    let a = open(&h.ws, "A", "");
    let b = open(&h.ws, "B", "");
    let c = open(&h.ws, "C", "");
    assert_eq!(h.ws.active_tab().map(|t| t.id), Some(c));

    let closed = h.ws.close_tab(c).data.unwrap();
    assert_eq!(closed.state, "closed");
    assert_eq!(h.ws.active_tab().map(|t| t.id), Some(a));

    h.ws.close_tab(a);
    assert_eq!(h.ws.active_tab().map(|t| t.id), Some(b));
}

#[tokio::test]
async fn test_closed_tab_is_not_found_everywhere() {
    let h = harness();
    let id = open(&h.ws, "Only", "text");
    assert!(h.ws.close_tab(id).success);
    assert!(h.ws.active_tab().is_none());

    assert!(!h.ws.switch_tab(id).success);
    assert!(!h.ws.close_tab(id).success);
    assert!(!h.ws.update_tab_content(id, "x".to_string()).success);
    assert!(!h.ws.export_tab(id, Destination::File).await.success);
    assert!(!h.ws.copy_content(id).await.success);

    assert_eq!(h.markdown.calls.load(Ordering::SeqCst), 0);
    let last = h.ws.log_viewer().last().unwrap();
    assert_eq!(last.level, LogLevel::Warning);
    assert_eq!(last.message, format!("Tab {} not found", id));
}

#[tokio::test]
async fn test_bulk_export_reports_partial_success() {
    let exporter = FlakyExporter {
        fail_on: vec![2],
        ..Default::default()
    };
    let h = harness_with(exporter, MemoryClipboard::new());
    for name in ["First", "Second", "Third"] {
        open(&h.ws, name, name);
    }

    let result = h.ws.export_all().await;

    assert!(!result.success);
    let summary = result.data.unwrap();
    assert_eq!((summary.succeeded, summary.total), (2, 3));
    assert_eq!(result.error.as_deref(), Some("Successfully exported 2 of 3 tabs."));
    assert_eq!(*h.markdown.titles.lock(), vec!["First", "Second", "Third"]);
    assert_eq!(h.ws.tabs().len(), 3);

    assert_eq!(
        h.ws.log_viewer().messages(),
        vec![
            "Starting export of 3 tabs...",
            "Failed to export Second",
            "Successfully exported 2 of 3 tabs.",
        ]
    );
}

#[tokio::test]
async fn test_bulk_export_calls_exporter_once_per_tab() {
    let h = harness();
    for name in ["A", "B", "C", "D", "E"] {
        open(&h.ws, name, "");
    }

    let result = h.ws.dispatch(Action::ExportAll).await;

    assert!(result.success);
    assert_eq!(h.markdown.calls.load(Ordering::SeqCst), 5);
    match result.data {
        Some(ActionOutput::Exported(summary)) => assert!(summary.all_succeeded()),
        other => panic!("unexpected output: {:?}", other),
    }
}

#[tokio::test]
async fn test_export_all_without_tabs() {
    let h = harness();

    let result = h.ws.export_all().await;

    assert!(result.success);
    let last = h.ws.log_viewer().last().unwrap();
    assert_eq!(last.message, "No tabs to export.");
    assert_eq!(last.level, LogLevel::Warning);
}

#[tokio::test]
async fn test_document_export_through_dispatch() {
    let h = harness();
    let id = open(&h.ws, "Billing", "");
    type_into(&h, id, "# Billing\n### Edge cases\n#### not a heading");

    let result = h
        .ws
        .dispatch(Action::parse(&format!("export {} docx", id)).unwrap())
        .await;
    assert!(result.success);

    let received = h.documents.received.lock();
    let (paragraphs, filename) = &received[0];
    assert_eq!(filename, "Billing.docx");
    assert_eq!(paragraphs[1].level, ParagraphLevel::Heading3);
    assert_eq!(paragraphs[2], Paragraph::body("#### not a heading"));
}

#[tokio::test]
async fn test_document_failure_is_reported() {
    let h = harness();
    let id = open(&h.ws, "Broken", "text");

    let result = h.ws.export_tab(id, Destination::Document).await;

    assert!(!result.success);
    let last = h.ws.log_viewer().last().unwrap();
    assert_eq!(last.level, LogLevel::Error);
    assert!(last.message.starts_with("Error exporting DOCX:"));
}

#[tokio::test]
async fn test_print_writes_page() {
    let h = harness();
    let id = open(&h.ws, "Login", "# Login\n\n- [x] done");

    let result = h.ws.export_tab(id, Destination::Print).await;

    assert!(result.success);
    let pages: Vec<_> = std::fs::read_dir(&h.ws.config().export_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "html").unwrap_or(false))
        .collect();
    assert_eq!(pages.len(), 1);
    let page = std::fs::read_to_string(pages[0].path()).unwrap();
    assert!(page.contains("window.print()"));
    assert!(page.contains("<h1>Login</h1>"));
}

#[tokio::test]
async fn test_copy_content() {
    let h = harness();
    let id = open(&h.ws, "Login", "");
    type_into(&h, id, "fresh text");

    let result = h.ws.dispatch(Action::Copy(id)).await;

    assert!(result.success);
    assert_eq!(h.clipboard.contents().as_deref(), Some("fresh text"));
    assert_eq!(
        h.ws.log_viewer().last().unwrap().message,
        "Content copied to clipboard"
    );
}

#[tokio::test]
async fn test_copy_denied_is_not_fatal() {
    let h = harness_with(FlakyExporter::default(), MemoryClipboard::denied());
    let id = open(&h.ws, "Login", "text");

    let result = h.ws.copy_content(id).await;

    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("Clipboard denied"));
    let last = h.ws.log_viewer().last().unwrap();
    assert_eq!(last.message, "Failed to copy content");
    assert_eq!(last.level, LogLevel::Error);
    assert!(h.ws.registry().contains(id));
}

#[test]
fn test_surface_round_trip() {
    let h = harness();
    let id = open(&h.ws, "Notes", "");
    let surface = h.ws.registry().surface(id).unwrap();

    for text in ["", "# One", "## Two\n### Three", "plain\n\nlines"] {
        surface.set_content(text).unwrap();
        assert_eq!(surface.get_content().unwrap(), text);
    }
}

#[test]
fn test_switch_to_active_is_noop() {
    let h = harness();
    let id = open(&h.ws, "Login", "body");
    let surface = h.surfaces.surface(&id.to_string()).unwrap();
    let (reads, writes) = (surface.read_count(), surface.write_count());

    assert!(h.ws.switch_tab(id).success);

    assert_eq!(surface.read_count(), reads);
    assert_eq!(surface.write_count(), writes);
    assert_eq!(h.ws.registry().get(id).unwrap().content, "body");
}
