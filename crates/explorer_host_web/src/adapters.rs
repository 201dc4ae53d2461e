use std::rc::Rc;

use explorer_host::{HostServices, ServiceConfig};

use crate::{
    HttpStorageService, WebDialogService, WebExportService, WebExternalUrlService,
    WebNotificationService,
};

/// Builds the browser [`HostServices`] bundle for `config`.
pub fn build_host_services(config: ServiceConfig) -> HostServices {
    HostServices {
        storage: Rc::new(HttpStorageService::new(config.clone())),
        dialogs: Rc::new(WebDialogService),
        urls: Rc::new(WebExternalUrlService),
        notifications: Rc::new(WebNotificationService),
        export: Rc::new(WebExportService),
        config,
    }
}
