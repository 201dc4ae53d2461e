//! Host-side execution of explorer runtime effects.
//!
//! Each effect runs against the injected [`HostServices`] bundle and may yield one follow-up
//! [`ExplorerAction`] to feed back into the reducer.

use explorer_host::{HostServices, UrlTarget};
use leptos::logging;

use crate::{
    reducer::{ExplorerAction, RuntimeEffect, DELETE_CONFIRMATION},
    table::RecordAction,
};

/// Executes one effect and returns the action that reports its outcome, if any.
pub async fn run_runtime_effect(
    host: &HostServices,
    effect: RuntimeEffect,
) -> Option<ExplorerAction> {
    match effect {
        RuntimeEffect::FetchTree(reason) => Some(match host.storage.load_tree().await {
            Ok(tree) => ExplorerAction::TreeLoaded { reason, tree },
            Err(error) => {
                logging::warn!("explorer tree load failed: {error}");
                ExplorerAction::TreeLoadFailed { reason, error }
            }
        }),
        RuntimeEffect::FetchSearch { query } => Some(match host.storage.search(&query).await {
            Ok(records) => ExplorerAction::SearchCompleted { query, records },
            Err(error) => {
                logging::warn!("explorer search `{query}` failed: {error}");
                ExplorerAction::SearchFailed { query, error }
            }
        }),
        RuntimeEffect::ResolveUrl { action, record_id } => {
            let resolved = match action {
                RecordAction::View => host.storage.view_url(&record_id).await,
                RecordAction::Download => host.storage.download_url(&record_id).await,
                RecordAction::Delete => return None,
            };
            Some(match resolved {
                Ok(url) => ExplorerAction::UrlResolved { action, url },
                Err(error) => {
                    logging::warn!("resolving url for record {record_id} failed: {error}");
                    ExplorerAction::UrlResolveFailed {
                        action,
                        record_id,
                        error,
                    }
                }
            })
        }
        RuntimeEffect::ConfirmDelete { record_id } => host
            .dialogs
            .confirm(DELETE_CONFIRMATION)
            .await
            .then_some(ExplorerAction::DeleteConfirmed(record_id)),
        RuntimeEffect::DeleteRecord { record_id } => {
            Some(match host.storage.delete(&record_id).await {
                Ok(()) => ExplorerAction::DeleteSucceeded(record_id),
                Err(error) => {
                    logging::warn!("deleting record {record_id} failed: {error}");
                    ExplorerAction::DeleteFailed { record_id, error }
                }
            })
        }
        RuntimeEffect::OpenUrl(url) => {
            open(host, UrlTarget::NewContext, &url).await;
            None
        }
        RuntimeEffect::NavigateTo(url) => {
            open(host, UrlTarget::CurrentContext, &url).await;
            None
        }
        RuntimeEffect::Alert(message) => {
            host.dialogs.alert(&message).await;
            None
        }
    }
}

async fn open(host: &HostServices, target: UrlTarget, url: &str) {
    let result = match target {
        UrlTarget::NewContext => host.urls.open_url(url).await,
        UrlTarget::CurrentContext => host.urls.navigate(url).await,
    };
    if let Err(err) = result {
        logging::warn!("opening `{url}` failed: {err}");
    }
}
