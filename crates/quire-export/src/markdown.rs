//! Markdown file export into a directory

use chrono::Local;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::{Path, PathBuf};

use crate::naming::{markdown_file_name, sanitize_file_name};
use crate::services::MarkdownFileExporter;

pub struct FsMarkdownExporter {
    dir: PathBuf,
}

impl FsMarkdownExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the export of `title_hint` would be written to today
    pub fn target_path(&self, title_hint: &str) -> PathBuf {
        let file_name = markdown_file_name(title_hint, Local::now().date_naive());
        self.dir.join(sanitize_file_name(&file_name))
    }
}

impl MarkdownFileExporter for FsMarkdownExporter {
    fn export(&self, text: String, title_hint: String) -> BoxFuture<'_, bool> {
        async move {
            let path = self.target_path(&title_hint);

            if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
                tracing::error!(dir = %self.dir.display(), error = %e, "Failed to create export directory");
                return false;
            }

            match tokio::fs::write(&path, text.as_bytes()).await {
                Ok(()) => {
                    tracing::info!(path = %path.display(), bytes = text.len(), "Wrote markdown export");
                    true
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Markdown export failed");
                    false
                }
            }
        }
        .boxed()
    }
}
