//! Browser (`wasm32`) implementations of [`explorer_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer: the reqwest-backed storage client, plus
//! dialog, URL, clipboard/download, toast and file-reading adapters built on a small JS bridge.
//! Non-wasm builds compile the same API against fallbacks so the workspace tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod dialogs;
pub mod export;
pub mod external_url;
pub mod files;
pub mod http;
pub mod notifications;

pub use adapters::build_host_services;
pub use dialogs::WebDialogService;
pub use export::WebExportService;
pub use external_url::WebExternalUrlService;
pub use files::{read_file_text, read_file_upload};
pub use http::HttpStorageService;
pub use notifications::WebNotificationService;
