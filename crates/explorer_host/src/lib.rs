//! Typed host-domain contracts and shared models for the storage explorer client.
//!
//! This crate is the API-first boundary between the explorer runtime and the remote storage
//! service. It owns the wire models (records, folder tree, datasets), the error taxonomy, the
//! endpoint table, and the service traits the runtime is written against. Concrete browser
//! adapters live in `explorer_host_web`; the `Noop*` and `Memory*` adapters here back non-browser
//! targets and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod dialogs;
pub mod error;
pub mod export;
pub mod external_url;
pub mod host;
pub mod notifications;
pub mod records;
pub mod storage;

pub use config::{Endpoint, EndpointMethod, ServiceConfig, API_BASE_ENV, DEFAULT_API_BASE};
pub use dialogs::{DialogFuture, DialogService, MemoryDialogService, NoopDialogService};
pub use error::StorageError;
pub use export::{ExportFuture, ExportService, MemoryExportService, NoopExportService, SavedFile};
pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, MemoryExternalUrlService, NoopExternalUrlService,
    UrlTarget,
};
pub use host::HostServices;
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, Notice, NoticeLevel, NotificationFuture,
    NotificationService,
};
pub use records::{
    DatasetPayload, DatasetSummary, FileTree, FileUpload, Record, RecordId, ResolvedUrl,
    StoredUpload, TreeBranch, TreeCategory, TreeSubfolder, UploadResponse,
};
pub use storage::{MemoryStorageService, NoopStorageService, StorageFuture, StorageService};
