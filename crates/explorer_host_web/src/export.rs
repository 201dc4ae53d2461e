//! Clipboard and Blob-download adapter.

use explorer_host::{ExportFuture, ExportService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Browser export adapter backed by the async Clipboard API and object-URL downloads.
pub struct WebExportService;

impl ExportService for WebExportService {
    fn copy_text<'a>(&'a self, text: &'a str) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async move { bridge::copy_text(text).await })
    }

    fn save_text_file<'a>(
        &'a self,
        filename: &'a str,
        mime_type: &'a str,
        contents: &'a str,
    ) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async move { bridge::save_text_file(filename, mime_type, contents) })
    }
}
