//! In-page toast adapter.

use explorer_host::{Notice, NotificationFuture, NotificationService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Browser toast adapter; toasts slide in bottom-right and dismiss themselves.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            bridge::show_toast(notice.level, &notice.title, &notice.body);
            Ok(())
        })
    }
}
