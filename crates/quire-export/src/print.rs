//! Print view as a self-printing html page

use futures_util::future::{BoxFuture, FutureExt};
use std::path::{Path, PathBuf};

use crate::error::ServiceError;
use crate::naming::sanitize_file_name;
use crate::services::{PrintService, ServiceResult};

const PRINT_STYLE: &str = r#"
        @media print {
            body { font-size: 12pt; }
            a[href]:after { content: none !important; }
            @page { margin: 0.5in; }
        }
        body { padding: 1rem; font-family: sans-serif; }
"#;

// Give styles a moment to apply, then print and close once the dialog is done
const PRINT_SCRIPT: &str = r#"
        window.onload = function() {
            setTimeout(function() {
                window.onafterprint = function() { window.close(); };
                window.print();
            }, 500);
        };
"#;

/// Full html document that prints itself on load and closes afterwards
pub fn print_page(body_html: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"container\">{}</div>\n<script>{}</script>\n</body>\n</html>\n",
        escape_html(title),
        PRINT_STYLE,
        body_html,
        PRINT_SCRIPT
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Writes the print page next to other exports and opens it in the
/// platform browser, which runs the print dialog
pub struct HtmlPrintService {
    dir: PathBuf,
    launch: bool,
}

impl HtmlPrintService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            launch: true,
        }
    }

    /// Only write the page, never hand it to the platform opener
    pub fn without_launch(mut self) -> Self {
        self.launch = false;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, title: &str) -> PathBuf {
        self.dir.join(sanitize_file_name(&format!("{}.html", title)))
    }
}

impl PrintService for HtmlPrintService {
    fn print(&self, html: String, title: String) -> BoxFuture<'_, ServiceResult> {
        // Resolves on handoff to the opener. The browser's print dialog is
        // not observable from here.
        async move {
            tokio::fs::create_dir_all(&self.dir).await?;

            let path = self.page_path(&title);
            tokio::fs::write(&path, print_page(&html, &title)).await?;

            if self.launch {
                open::that_detached(&path)
                    .map_err(|e| ServiceError::Rejected(format!("could not open print view: {}", e)))?;
            }

            tracing::info!(path = %path.display(), title = %title, launched = self.launch, "Handed off print view");

            Ok::<(), ServiceError>(())
        }
        .boxed()
    }
}
