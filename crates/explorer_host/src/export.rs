//! Clipboard and save-as-file contracts used by the dataset viewer.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ExportService`].
pub type ExportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for moving text out of the page.
pub trait ExportService {
    /// Writes `text` to the system clipboard.
    fn copy_text<'a>(&'a self, text: &'a str) -> ExportFuture<'a, Result<(), String>>;

    /// Offers `contents` as a downloaded file named `filename`.
    fn save_text_file<'a>(
        &'a self,
        filename: &'a str,
        mime_type: &'a str,
        contents: &'a str,
    ) -> ExportFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Export service for targets without clipboard or download support.
pub struct NoopExportService;

impl ExportService for NoopExportService {
    fn copy_text<'a>(&'a self, _text: &'a str) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async { Err("clipboard unavailable".to_string()) })
    }

    fn save_text_file<'a>(
        &'a self,
        _filename: &'a str,
        _mime_type: &'a str,
        _contents: &'a str,
    ) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async { Err("file download unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// File offered through [`MemoryExportService::save_text_file`].
pub struct SavedFile {
    /// Suggested filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File contents.
    pub contents: String,
}

#[derive(Debug, Default)]
struct MemoryExportInner {
    clipboard: Vec<String>,
    saved: Vec<SavedFile>,
}

#[derive(Debug, Clone, Default)]
/// Recording export service for tests.
pub struct MemoryExportService {
    inner: Rc<RefCell<MemoryExportInner>>,
}

impl MemoryExportService {
    /// Clipboard writes so far.
    pub fn clipboard(&self) -> Vec<String> {
        self.inner.borrow().clipboard.clone()
    }

    /// Files offered so far.
    pub fn saved_files(&self) -> Vec<SavedFile> {
        self.inner.borrow().saved.clone()
    }
}

impl ExportService for MemoryExportService {
    fn copy_text<'a>(&'a self, text: &'a str) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().clipboard.push(text.to_string());
            Ok(())
        })
    }

    fn save_text_file<'a>(
        &'a self,
        filename: &'a str,
        mime_type: &'a str,
        contents: &'a str,
    ) -> ExportFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().saved.push(SavedFile {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
                contents: contents.to_string(),
            });
            Ok(())
        })
    }
}
