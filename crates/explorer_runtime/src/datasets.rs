//! Dataset list and JSON payload viewer.
//!
//! The viewer is a two-state machine. `List` holds the latest list render; `Viewing` additionally
//! holds one payload. Requesting a payload always drops the held one first, so the viewer never
//! moves from one payload straight to another.

use explorer_host::{DatasetPayload, DatasetSummary, HostServices, StorageError};
use leptos::logging;
use serde_json::Value;

use crate::format::format_timestamp;

pub const DATASETS_LOADING: &str = "Loading datasets...";
pub const DATASETS_LOAD_FAILED: &str = "Error loading datasets.";
pub const NO_DATASETS_STORED: &str = "No datasets stored yet.";
pub const DATASET_FETCH_FAILED_ALERT: &str = "Error fetching dataset JSON.";
pub const JSON_COPIED_ALERT: &str = "JSON copied to clipboard.";
pub const JSON_COPY_FAILED_ALERT: &str = "Failed to copy JSON.";

const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display-ready dataset list row.
pub struct DatasetRow {
    pub id: i64,
    pub type_label: String,
    pub name: String,
    pub created: String,
}

impl From<&DatasetSummary> for DatasetRow {
    fn from(summary: &DatasetSummary) -> Self {
        Self {
            id: summary.id,
            type_label: summary.type_label(),
            name: summary.display_name(),
            created: format_timestamp(summary.created_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Dataset list body.
pub enum DatasetListView {
    /// Rows sorted by id.
    Rows(Vec<DatasetRow>),
    /// Single message cell.
    Message(String),
}

impl Default for DatasetListView {
    fn default() -> Self {
        Self::Message(DATASETS_LOADING.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Payload currently shown in the viewer.
pub struct ViewedDataset {
    /// Id reported by the payload response.
    pub dataset_id: i64,
    pub storage_type: Option<String>,
    /// Payload data, pretty-printed with two-space indentation.
    pub pretty: String,
}

impl ViewedDataset {
    fn from_payload(payload: DatasetPayload) -> Self {
        Self {
            dataset_id: payload.dataset_id,
            storage_type: payload.storage_type,
            pretty: pretty_json(&payload.data),
        }
    }

    /// Viewer header.
    pub fn title(&self) -> String {
        format!("Dataset {}", self.dataset_id)
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> String {
        format!("dataset_{}.json", self.dataset_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Viewer state.
pub enum DatasetPhase {
    List,
    Viewing,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Dataset page state.
pub struct DatasetViewerState {
    /// List body.
    pub list: DatasetListView,
    /// Held payload, if viewing.
    pub viewing: Option<ViewedDataset>,
    /// Id most recently requested with "View JSON".
    pub pending: Option<i64>,
}

impl DatasetViewerState {
    /// Current phase.
    pub fn phase(&self) -> DatasetPhase {
        if self.viewing.is_some() {
            DatasetPhase::Viewing
        } else {
            DatasetPhase::List
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_datasets`].
pub enum DatasetAction {
    /// Load the list; the raw query is trimmed and a blank one lists everything.
    Load(String),
    Loaded {
        query: Option<String>,
        datasets: Vec<DatasetSummary>,
    },
    LoadFailed {
        query: Option<String>,
        error: StorageError,
    },
    /// "View JSON" on a list row.
    View(i64),
    PayloadLoaded(DatasetPayload),
    PayloadFailed { id: i64, error: StorageError },
    /// Copy the held payload to the clipboard.
    Copy,
    /// Save the held payload as a file.
    Download,
}

#[derive(Debug, Clone, PartialEq)]
/// Side effects emitted by [`reduce_datasets`].
pub enum DatasetEffect {
    FetchList { query: Option<String> },
    FetchPayload(i64),
    CopyText(String),
    SaveFile { filename: String, contents: String },
    Alert(String),
}

/// Applies a [`DatasetAction`] and returns the side effects to run.
///
/// A payload only enters the viewer when its id matches the latest requested one; anything
/// arriving after a newer "View JSON" click or a list reload is discarded.
pub fn reduce_datasets(state: &mut DatasetViewerState, action: DatasetAction) -> Vec<DatasetEffect> {
    let mut effects = Vec::new();
    match action {
        DatasetAction::Load(raw) => {
            let query = Some(raw.trim())
                .filter(|query| !query.is_empty())
                .map(str::to_string);
            state.viewing = None;
            state.pending = None;
            state.list = DatasetListView::Message(DATASETS_LOADING.to_string());
            effects.push(DatasetEffect::FetchList { query });
        }
        DatasetAction::Loaded {
            query,
            mut datasets,
        } => {
            state.list = if datasets.is_empty() {
                DatasetListView::Message(match query {
                    Some(query) => format!("No datasets found for \"{query}\"."),
                    None => NO_DATASETS_STORED.to_string(),
                })
            } else {
                datasets.sort_by_key(|summary| summary.id);
                DatasetListView::Rows(datasets.iter().map(DatasetRow::from).collect())
            };
        }
        DatasetAction::LoadFailed { .. } => {
            state.list = DatasetListView::Message(DATASETS_LOAD_FAILED.to_string());
        }
        DatasetAction::View(id) => {
            state.viewing = None;
            state.pending = Some(id);
            effects.push(DatasetEffect::FetchPayload(id));
        }
        DatasetAction::PayloadLoaded(payload) => {
            if state.pending == Some(payload.dataset_id) {
                state.pending = None;
                state.viewing = Some(ViewedDataset::from_payload(payload));
            } else {
                logging::log!("discarding stale payload for dataset {}", payload.dataset_id);
            }
        }
        DatasetAction::PayloadFailed { id, .. } => {
            if state.pending == Some(id) {
                state.pending = None;
                effects.push(DatasetEffect::Alert(DATASET_FETCH_FAILED_ALERT.to_string()));
            }
        }
        DatasetAction::Copy => {
            if let Some(viewing) = &state.viewing {
                effects.push(DatasetEffect::CopyText(viewing.pretty.clone()));
            }
        }
        DatasetAction::Download => {
            if let Some(viewing) = &state.viewing {
                effects.push(DatasetEffect::SaveFile {
                    filename: viewing.file_name(),
                    contents: viewing.pretty.clone(),
                });
            }
        }
    }
    effects
}

/// Pretty-prints a JSON value with two-space indentation.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Executes one dataset effect and returns its follow-up action, if any.
pub async fn run_dataset_effect(
    host: &HostServices,
    effect: DatasetEffect,
) -> Option<DatasetAction> {
    match effect {
        DatasetEffect::FetchList { query } => {
            Some(match host.storage.list_datasets(query.as_deref()).await {
                Ok(datasets) => DatasetAction::Loaded { query, datasets },
                Err(error) => {
                    logging::warn!("dataset list failed: {error}");
                    DatasetAction::LoadFailed { query, error }
                }
            })
        }
        DatasetEffect::FetchPayload(id) => Some(match host.storage.dataset(id).await {
            Ok(payload) => DatasetAction::PayloadLoaded(payload),
            Err(error) => {
                logging::warn!("dataset {id} fetch failed: {error}");
                DatasetAction::PayloadFailed { id, error }
            }
        }),
        DatasetEffect::CopyText(text) => {
            let message = match host.export.copy_text(&text).await {
                Ok(()) => JSON_COPIED_ALERT,
                Err(err) => {
                    logging::warn!("copy to clipboard failed: {err}");
                    JSON_COPY_FAILED_ALERT
                }
            };
            host.dialogs.alert(message).await;
            None
        }
        DatasetEffect::SaveFile { filename, contents } => {
            if let Err(err) = host
                .export
                .save_text_file(&filename, JSON_MIME, &contents)
                .await
            {
                logging::warn!("saving `{filename}` failed: {err}");
            }
            None
        }
        DatasetEffect::Alert(message) => {
            host.dialogs.alert(&message).await;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, rc::Rc};

    use explorer_host::{MemoryDialogService, MemoryExportService, MemoryStorageService};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn summary(id: i64, storage_type: &str, table: Option<&str>) -> DatasetSummary {
        DatasetSummary {
            id,
            storage_type: Some(storage_type.to_string()),
            sql_table_name: table.map(str::to_string),
            mongo_collection_name: None,
            original_name: None,
            created_at: None,
        }
    }

    struct Fixture {
        host: HostServices,
        storage: MemoryStorageService,
        dialogs: MemoryDialogService,
        export: MemoryExportService,
        state: DatasetViewerState,
    }

    impl Fixture {
        fn new() -> Self {
            let storage = MemoryStorageService::default();
            storage.insert_dataset(summary(7, "sql", Some("orders")), json!([{ "a": 1 }]));
            storage.insert_dataset(summary(3, "nosql", None), json!({ "b": true }));
            let dialogs = MemoryDialogService::default();
            let export = MemoryExportService::default();
            let host = HostServices {
                storage: Rc::new(storage.clone()),
                dialogs: Rc::new(dialogs.clone()),
                export: Rc::new(export.clone()),
                ..HostServices::noop()
            };
            Self {
                host,
                storage,
                dialogs,
                export,
                state: DatasetViewerState::default(),
            }
        }

        fn dispatch(&mut self, action: DatasetAction) {
            let mut pending = VecDeque::from([action]);
            while let Some(action) = pending.pop_front() {
                for effect in reduce_datasets(&mut self.state, action) {
                    if let Some(next) = block_on(run_dataset_effect(&self.host, effect)) {
                        pending.push_back(next);
                    }
                }
            }
        }
    }

    fn payload(id: i64) -> DatasetPayload {
        DatasetPayload {
            dataset_id: id,
            storage_type: None,
            data: json!({ "id": id }),
        }
    }

    #[test]
    fn blank_query_lists_everything_sorted_by_id() {
        let mut fixture = Fixture::new();
        fixture.dispatch(DatasetAction::Load("  ".to_string()));

        assert_eq!(fixture.storage.calls(), vec!["list_datasets"]);
        let DatasetListView::Rows(rows) = &fixture.state.list else {
            panic!("expected rows");
        };
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![3, 7]);
        assert_eq!(rows[0].name, "dataset_3");
        assert_eq!(rows[0].type_label, "NOSQL");
        assert_eq!(rows[1].name, "orders");
    }

    #[test]
    fn empty_results_name_the_query() {
        let mut fixture = Fixture::new();
        fixture.dispatch(DatasetAction::Load(" missing ".to_string()));
        assert_eq!(fixture.storage.calls(), vec!["list_datasets:missing"]);
        assert_eq!(
            fixture.state.list,
            DatasetListView::Message("No datasets found for \"missing\".".to_string())
        );

        let mut state = DatasetViewerState::default();
        reduce_datasets(
            &mut state,
            DatasetAction::Loaded {
                query: None,
                datasets: Vec::new(),
            },
        );
        assert_eq!(
            state.list,
            DatasetListView::Message(NO_DATASETS_STORED.to_string())
        );
    }

    #[test]
    fn list_failure_shows_error_message() {
        let mut fixture = Fixture::new();
        fixture
            .storage
            .fail_operation("list_datasets", StorageError::Transport("down".to_string()));
        fixture.dispatch(DatasetAction::Load(String::new()));
        assert_eq!(
            fixture.state.list,
            DatasetListView::Message(DATASETS_LOAD_FAILED.to_string())
        );
    }

    #[test]
    fn viewing_pretty_prints_and_labels_from_payload() {
        let mut fixture = Fixture::new();
        fixture.dispatch(DatasetAction::Load(String::new()));
        fixture.dispatch(DatasetAction::View(3));

        assert_eq!(fixture.state.phase(), DatasetPhase::Viewing);
        let viewing = fixture.state.viewing.as_ref().expect("viewing");
        assert_eq!(viewing.title(), "Dataset 3");
        assert_eq!(viewing.pretty, "{\n  \"b\": true\n}");

        fixture.dispatch(DatasetAction::Load(String::new()));
        assert_eq!(fixture.state.phase(), DatasetPhase::List);
    }

    #[test]
    fn late_payload_never_shows_under_newer_selection() {
        let mut state = DatasetViewerState::default();
        assert_eq!(
            reduce_datasets(&mut state, DatasetAction::View(7)),
            vec![DatasetEffect::FetchPayload(7)]
        );
        reduce_datasets(&mut state, DatasetAction::View(3));
        reduce_datasets(&mut state, DatasetAction::PayloadLoaded(payload(3)));
        assert_eq!(state.viewing.as_ref().map(|v| v.dataset_id), Some(3));

        reduce_datasets(&mut state, DatasetAction::PayloadLoaded(payload(7)));
        let viewing = state.viewing.as_ref().expect("viewing");
        assert_eq!(viewing.title(), "Dataset 3");
        assert!(viewing.pretty.contains("3"));
    }

    #[test]
    fn selecting_another_dataset_clears_the_held_payload_first() {
        let mut state = DatasetViewerState::default();
        reduce_datasets(&mut state, DatasetAction::View(7));
        reduce_datasets(&mut state, DatasetAction::PayloadLoaded(payload(7)));
        assert_eq!(state.phase(), DatasetPhase::Viewing);

        reduce_datasets(&mut state, DatasetAction::View(3));
        assert_eq!(state.phase(), DatasetPhase::List);
        assert!(reduce_datasets(&mut state, DatasetAction::Copy).is_empty());
    }

    #[test]
    fn fetch_failure_alerts() {
        let mut fixture = Fixture::new();
        fixture.dispatch(DatasetAction::View(42));
        assert_eq!(fixture.dialogs.alerts(), vec![DATASET_FETCH_FAILED_ALERT]);
        assert_eq!(fixture.state.phase(), DatasetPhase::List);
    }

    #[test]
    fn copy_and_download_use_the_held_payload() {
        let mut fixture = Fixture::new();
        fixture.dispatch(DatasetAction::Copy);
        fixture.dispatch(DatasetAction::Download);
        assert!(fixture.export.clipboard().is_empty());
        assert!(fixture.export.saved_files().is_empty());

        fixture.dispatch(DatasetAction::View(7));
        fixture.dispatch(DatasetAction::Copy);
        fixture.dispatch(DatasetAction::Download);

        let pretty = "[\n  {\n    \"a\": 1\n  }\n]".to_string();
        assert_eq!(fixture.export.clipboard(), vec![pretty.clone()]);
        assert_eq!(fixture.dialogs.alerts(), vec![JSON_COPIED_ALERT]);
        let saved = fixture.export.saved_files();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].filename, "dataset_7.json");
        assert_eq!(saved[0].mime_type, "application/json");
        assert_eq!(saved[0].contents, pretty);
    }

    #[test]
    fn copy_failure_alerts() {
        let mut fixture = Fixture::new();
        fixture.host.export = Rc::new(explorer_host::NoopExportService);
        fixture.dispatch(DatasetAction::View(7));
        fixture.dispatch(DatasetAction::Copy);
        assert_eq!(fixture.dialogs.alerts(), vec![JSON_COPY_FAILED_ALERT]);
    }
}
