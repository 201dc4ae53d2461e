//! Modal dialog adapter backed by `window.confirm` / `window.alert`.

use explorer_host::{DialogFuture, DialogService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Browser dialog adapter.
pub struct WebDialogService;

impl DialogService for WebDialogService {
    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async move { bridge::confirm(message) })
    }

    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, ()> {
        Box::pin(async move { bridge::alert(message) })
    }
}
