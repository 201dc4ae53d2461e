//! Host service bundle injected into the explorer runtime.

use std::rc::Rc;

use crate::{
    DialogService, ExportService, ExternalUrlService, NoopDialogService, NoopExportService,
    NoopExternalUrlService, NoopNotificationService, NoopStorageService, NotificationService,
    ServiceConfig, StorageService,
};

/// Runtime-selected service bundle for the explorer, upload and dataset views.
///
/// Adapter selection happens once at the entry layer; runtime code only sees the trait objects.
#[derive(Clone)]
pub struct HostServices {
    /// Remote storage service.
    pub storage: Rc<dyn StorageService>,
    /// Confirmation/alert dialogs.
    pub dialogs: Rc<dyn DialogService>,
    /// URL opening and navigation.
    pub urls: Rc<dyn ExternalUrlService>,
    /// Toast notifications.
    pub notifications: Rc<dyn NotificationService>,
    /// Clipboard and file export.
    pub export: Rc<dyn ExportService>,
    /// Service address the storage adapter was built with.
    pub config: ServiceConfig,
}

impl HostServices {
    /// Bundle of no-op adapters for non-browser targets.
    pub fn noop() -> Self {
        Self {
            storage: Rc::new(NoopStorageService),
            dialogs: Rc::new(NoopDialogService),
            urls: Rc::new(NoopExternalUrlService),
            notifications: Rc::new(NoopNotificationService),
            export: Rc::new(NoopExportService),
            config: ServiceConfig::default(),
        }
    }
}
