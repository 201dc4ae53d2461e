//! Reducer actions, side-effect intents and transition logic for the explorer session.
//!
//! Completions are applied in arrival order. Two overlapping requests may therefore resolve
//! last-writer-wins; every individual render is still internally consistent.

use explorer_host::{FileTree, Record, RecordId, ResolvedUrl, StorageError};
use thiserror::Error;

use crate::{
    model::{ExplorerState, FolderKey, SelectionKey, TreeStatus},
    table::{RecordAction, RowAction, TableMessage},
    tree::FolderTreeView,
};

/// Prompt shown before a record is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this file?";
/// Alert shown when a search request fails.
pub const SEARCH_FAILED_ALERT: &str = "Search failed. Check backend.";
/// Alert shown when a delete request fails.
pub const DELETE_FAILED_ALERT: &str = "Failed to delete file.";
/// Alert shown when a view URL cannot be resolved.
pub const VIEW_FAILED_ALERT: &str = "Could not open file.";
/// Alert shown when a download URL cannot be resolved.
pub const DOWNLOAD_FAILED_ALERT: &str = "Could not download file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a tree load was issued.
pub enum TreeLoadReason {
    /// Initial page load.
    Boot,
    /// Explicit refresh control.
    Refresh,
    /// Reload following a successful delete.
    AfterDelete,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_explorer`].
pub enum ExplorerAction {
    /// Load the tree when the explorer page mounts. Rows left from an earlier visit are
    /// replaced by the select-folder prompt.
    Boot,
    /// Clear the selection and reload the tree.
    Refresh,
    /// A tree request completed.
    TreeLoaded {
        reason: TreeLoadReason,
        tree: FileTree,
    },
    /// A tree request failed.
    TreeLoadFailed {
        reason: TreeLoadReason,
        error: StorageError,
    },
    /// A folder node was clicked.
    SelectFolder(FolderKey),
    /// A grouped category label was clicked.
    ToggleCategory(String),
    /// The search input was submitted with this raw text.
    SubmitSearch(String),
    /// A search request completed.
    SearchCompleted { query: String, records: Vec<Record> },
    /// A search request failed.
    SearchFailed { query: String, error: StorageError },
    /// A row control was activated.
    ActivateRow(RowAction),
    /// The user accepted the delete prompt.
    DeleteConfirmed(RecordId),
    /// The service deleted the record.
    DeleteSucceeded(RecordId),
    /// The service rejected the delete.
    DeleteFailed {
        record_id: RecordId,
        error: StorageError,
    },
    /// A view or download URL was resolved.
    UrlResolved {
        action: RecordAction,
        url: ResolvedUrl,
    },
    /// A view or download URL could not be resolved.
    UrlResolveFailed {
        action: RecordAction,
        record_id: RecordId,
        error: StorageError,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_explorer`] and executed by the host layer.
pub enum RuntimeEffect {
    /// Fetch the folder tree.
    FetchTree(TreeLoadReason),
    /// Run a search.
    FetchSearch { query: String },
    /// Resolve a view or download URL for a record.
    ResolveUrl {
        action: RecordAction,
        record_id: RecordId,
    },
    /// Ask the user to confirm a delete.
    ConfirmDelete { record_id: RecordId },
    /// Delete a record.
    DeleteRecord { record_id: RecordId },
    /// Open a URL in a new browsing context.
    OpenUrl(String),
    /// Navigate the current browsing context.
    NavigateTo(String),
    /// Show a blocking alert.
    Alert(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reducer rejection for actions that reference state that does not exist.
pub enum ReducerError {
    /// The folder key is not a selectable node of the current tree.
    #[error("folder `{0}` not found in tree")]
    FolderNotFound(String),
    /// No grouped category has this name.
    #[error("category group `{0}` not found in tree")]
    CategoryNotFound(String),
    /// Delete controls never resolve a URL.
    #[error("delete action does not resolve a url")]
    UrlForDelete,
}

/// Applies an [`ExplorerAction`] to `state` and collects the resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action names a folder or category absent from the current
/// tree, or pairs a resolved URL with the delete control. `state` is left unchanged in that case.
pub fn reduce_explorer(
    state: &mut ExplorerState,
    action: ExplorerAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        ExplorerAction::Boot => {
            state.selection = SelectionKey::None;
            state.table.render_message(TableMessage::SelectFolder);
            state.tree_status = TreeStatus::Loading;
            effects.push(RuntimeEffect::FetchTree(TreeLoadReason::Boot));
        }
        ExplorerAction::Refresh => {
            state.selection = SelectionKey::None;
            state.table.render_message(TableMessage::SelectFolder);
            state.tree_status = TreeStatus::Loading;
            effects.push(RuntimeEffect::FetchTree(TreeLoadReason::Refresh));
        }
        ExplorerAction::TreeLoaded { tree, .. } => {
            state.tree = FolderTreeView::build(&tree);
            state.tree_status = TreeStatus::Ready;
            if matches!(state.selection, SelectionKey::Folder(_)) {
                state.selection = SelectionKey::None;
            }
        }
        ExplorerAction::TreeLoadFailed { reason, error } => {
            state.tree_status = TreeStatus::Failed(error.to_string());
            if reason != TreeLoadReason::AfterDelete {
                state.table.render_message(TableMessage::LoadFailed);
            }
        }
        ExplorerAction::SelectFolder(key) => {
            let records = state
                .tree
                .records_for(&key)
                .ok_or_else(|| ReducerError::FolderNotFound(key.to_string()))?
                .to_vec();
            state.selection = SelectionKey::Folder(key);
            state
                .table
                .render_records(&records, TableMessage::EmptyFolder);
        }
        ExplorerAction::ToggleCategory(name) => {
            if !state.tree.toggle_group(&name) {
                return Err(ReducerError::CategoryNotFound(name));
            }
        }
        ExplorerAction::SubmitSearch(raw) => {
            let query = raw.trim();
            if !query.is_empty() {
                effects.push(RuntimeEffect::FetchSearch {
                    query: query.to_string(),
                });
            }
        }
        ExplorerAction::SearchCompleted { query, records } => {
            state.table.render_records(
                &records,
                TableMessage::NoSearchResults {
                    query: query.clone(),
                },
            );
            state.selection = SelectionKey::Search { query };
        }
        ExplorerAction::SearchFailed { .. } => {
            effects.push(RuntimeEffect::Alert(SEARCH_FAILED_ALERT.to_string()));
        }
        ExplorerAction::ActivateRow(RowAction { action, record_id }) => match action {
            RecordAction::View | RecordAction::Download => {
                effects.push(RuntimeEffect::ResolveUrl { action, record_id });
            }
            RecordAction::Delete => effects.push(RuntimeEffect::ConfirmDelete { record_id }),
        },
        ExplorerAction::DeleteConfirmed(record_id) => {
            effects.push(RuntimeEffect::DeleteRecord { record_id });
        }
        ExplorerAction::DeleteSucceeded(_) => {
            state.selection = SelectionKey::None;
            state.table.render_message(TableMessage::Deleted);
            state.tree_status = TreeStatus::Loading;
            effects.push(RuntimeEffect::FetchTree(TreeLoadReason::AfterDelete));
        }
        ExplorerAction::DeleteFailed { .. } => {
            effects.push(RuntimeEffect::Alert(DELETE_FAILED_ALERT.to_string()));
        }
        ExplorerAction::UrlResolved { action, url } => match action {
            RecordAction::View => effects.push(RuntimeEffect::OpenUrl(url.url)),
            RecordAction::Download => effects.push(RuntimeEffect::NavigateTo(url.url)),
            RecordAction::Delete => return Err(ReducerError::UrlForDelete),
        },
        ExplorerAction::UrlResolveFailed { action, .. } => {
            let message = match action {
                RecordAction::Download => DOWNLOAD_FAILED_ALERT,
                RecordAction::View | RecordAction::Delete => VIEW_FAILED_ALERT,
            };
            effects.push(RuntimeEffect::Alert(message.to_string()));
        }
    }
    Ok(effects)
}
