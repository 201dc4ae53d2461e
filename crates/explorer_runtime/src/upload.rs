//! File and raw-JSON upload controllers.
//!
//! Both controls allow one outstanding request each. Outcomes are reported as [`Notice`] toasts
//! plus a result panel.

use explorer_host::{FileUpload, HostServices, Notice, RecordId, StorageError, UploadResponse};
use leptos::logging;
use thiserror::Error;

use crate::datasets::pretty_json;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result panel contents for a finished file upload.
pub enum UploadReceipt {
    /// The file was stored as a record.
    Stored {
        id: RecordId,
        stored_as: String,
        category: String,
        /// View link, when it could be resolved.
        view_url: Option<String>,
    },
    /// The service ingested the file and answered with its own acknowledgment (pretty-printed).
    Acknowledged(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// File upload control state.
pub struct FileUploadState {
    /// Chosen file. A new choice replaces the old one and hides the previous result.
    pub selected: Option<FileUpload>,
    /// A request is outstanding.
    pub in_flight: bool,
    /// Result of the last successful upload.
    pub receipt: Option<UploadReceipt>,
}

impl FileUploadState {
    /// Records a browse or drop selection.
    pub fn select(&mut self, file: FileUpload) {
        self.selected = Some(file);
        self.receipt = None;
    }

    /// Name of the chosen file.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|file| file.file_name.as_str())
    }

    /// Whether the upload control is enabled.
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.in_flight
    }

    /// Marks a request as started and returns the file to send, or `None` if the control is
    /// disabled.
    pub fn begin(&mut self) -> Option<FileUpload> {
        if !self.can_upload() {
            return None;
        }
        self.in_flight = true;
        self.selected.clone()
    }

    /// Settles the outstanding request and returns the toast to show.
    pub fn finish(
        &mut self,
        file_name: &str,
        outcome: Result<UploadReceipt, StorageError>,
    ) -> Notice {
        self.in_flight = false;
        match outcome {
            Ok(receipt) => {
                self.receipt = Some(receipt);
                Notice::success("Upload successful", format!("{file_name} has been uploaded."))
            }
            Err(err) => {
                logging::warn!("upload of `{file_name}` failed: {err}");
                Notice::error("Upload failed", "Error uploading file.")
            }
        }
    }
}

/// Sends `file` and resolves a view link for the stored record.
///
/// # Errors
///
/// Returns the [`StorageError`] of the upload request. A failed view-link lookup only drops the
/// link.
pub async fn upload_file(
    host: &HostServices,
    file: &FileUpload,
) -> Result<UploadReceipt, StorageError> {
    match host.storage.upload_file(file).await? {
        UploadResponse::Stored(stored) => {
            let view_url = match host.storage.view_url(&stored.id).await {
                Ok(resolved) => Some(resolved.url),
                Err(err) => {
                    logging::warn!("view link for upload {} failed: {err}", stored.id);
                    None
                }
            };
            Ok(UploadReceipt::Stored {
                category: stored.category().to_string(),
                id: stored.id,
                stored_as: stored.stored_as,
                view_url,
            })
        }
        UploadResponse::Acknowledged(ack) => Ok(UploadReceipt::Acknowledged(pretty_json(&ack))),
    }
}

/// Shows `notice` as a toast. A failing toast adapter is only logged.
pub async fn show_notice(host: &HostServices, notice: &Notice) {
    if let Err(err) = host.notifications.notify(notice).await {
        logging::warn!("toast failed: {err}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of the raw-JSON upload path.
pub enum JsonUploadError {
    /// The text area was blank.
    #[error("no JSON provided")]
    Empty,
    /// Local validation or the service call failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl JsonUploadError {
    /// Toast for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Empty => Notice::error("Error", "No JSON provided."),
            Self::Storage(StorageError::MalformedInput(_)) => {
                Notice::error("Invalid JSON", "Please fix JSON syntax errors.")
            }
            Self::Storage(_) => Notice::error("Upload failed", "Could not send JSON."),
        }
    }
}

/// Trims `raw` and checks that it parses as JSON.
///
/// # Errors
///
/// [`JsonUploadError::Empty`] for blank input, [`StorageError::MalformedInput`] for a syntax
/// error.
pub fn validate_json_input(raw: &str) -> Result<&str, JsonUploadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JsonUploadError::Empty);
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .map_err(|err| StorageError::MalformedInput(err.to_string()))?;
    Ok(trimmed)
}

/// Validates and sends raw JSON, returning the pretty-printed acknowledgment.
///
/// # Errors
///
/// See [`validate_json_input`]; service failures are wrapped in [`JsonUploadError::Storage`].
/// Invalid input never reaches the network.
pub async fn submit_json(host: &HostServices, raw: &str) -> Result<String, JsonUploadError> {
    let body = validate_json_input(raw)?;
    let ack = host.storage.upload_json(body).await?;
    Ok(pretty_json(&ack))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Raw-JSON control state.
pub struct JsonUploadState {
    /// A request is outstanding.
    pub in_flight: bool,
    /// Pretty-printed acknowledgment of the last success.
    pub response: Option<String>,
}

impl JsonUploadState {
    /// Marks a request as started. Returns `false` when one is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Settles the outstanding request and returns the toast to show.
    pub fn finish(&mut self, outcome: Result<String, JsonUploadError>) -> Notice {
        self.in_flight = false;
        match outcome {
            Ok(response) => {
                self.response = Some(response);
                Notice::success("JSON Stored", "JSON successfully processed.")
            }
            Err(err) => {
                logging::warn!("json upload failed: {err}");
                err.notice()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Upload control shown on the page.
pub enum UploadMode {
    #[default]
    File,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// State of both upload controls.
///
/// Lives for the whole session so that switching [`UploadMode`] never drops an outstanding
/// request, its toast or the pasted text.
pub struct UploadSession {
    /// Control currently shown.
    pub mode: UploadMode,
    /// File upload control.
    pub file: FileUploadState,
    /// Raw-JSON control.
    pub json: JsonUploadState,
    /// Text area contents of the raw-JSON control.
    pub json_text: String,
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use explorer_host::{MemoryNotificationService, MemoryStorageService, NoticeLevel};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn host(storage: &MemoryStorageService) -> HostServices {
        HostServices {
            storage: Rc::new(storage.clone()),
            ..HostServices::noop()
        }
    }

    fn file(name: &str) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: b"hello".to_vec(),
        }
    }

    #[test]
    fn upload_is_disabled_without_selection_or_while_in_flight() {
        let mut state = FileUploadState::default();
        assert!(!state.can_upload());
        assert_eq!(state.begin(), None);

        state.select(file("a.txt"));
        assert!(state.can_upload());
        assert_eq!(state.begin(), Some(file("a.txt")));
        assert!(!state.can_upload());
        assert_eq!(state.begin(), None);

        state.finish("a.txt", Err(StorageError::Transport("down".to_string())));
        assert!(state.can_upload());
    }

    #[test]
    fn new_selection_hides_previous_result() {
        let mut state = FileUploadState::default();
        state.select(file("a.txt"));
        state.begin();
        state.finish("a.txt", Ok(UploadReceipt::Acknowledged("{}".to_string())));
        assert!(state.receipt.is_some());

        state.select(file("b.txt"));
        assert_eq!(state.selected_name(), Some("b.txt"));
        assert_eq!(state.receipt, None);
    }

    #[test]
    fn stored_upload_reports_location_and_view_link() {
        let storage = MemoryStorageService::with_records(Vec::new());
        let receipt = block_on(upload_file(&host(&storage), &file("notes.txt"))).expect("upload");
        assert_eq!(
            receipt,
            UploadReceipt::Stored {
                id: RecordId::from(1),
                stored_as: "uploads/notes.txt".to_string(),
                category: "uploads".to_string(),
                view_url: Some("memory://view/1".to_string()),
            }
        );
        assert_eq!(storage.calls(), vec!["upload_file:notes.txt", "view_url:1"]);

        let mut state = FileUploadState::default();
        let notice = state.finish("notes.txt", Ok(receipt));
        assert_eq!(
            notice,
            Notice::success("Upload successful", "notes.txt has been uploaded.")
        );
    }

    #[test]
    fn failed_view_lookup_keeps_the_upload() {
        let storage = MemoryStorageService::default();
        storage.fail_operation("view_url", StorageError::Transport("down".to_string()));
        let receipt = block_on(upload_file(&host(&storage), &file("a.txt"))).expect("upload");
        assert!(matches!(receipt, UploadReceipt::Stored { view_url: None, .. }));
    }

    #[test]
    fn failed_upload_toasts_error() {
        let storage = MemoryStorageService::default();
        storage.fail_operation(
            "upload_file",
            StorageError::Status {
                status: 500,
                body: String::new(),
            },
        );
        let outcome = block_on(upload_file(&host(&storage), &file("a.txt")));
        let mut state = FileUploadState::default();
        let notice = state.finish("a.txt", outcome);
        assert_eq!(notice, Notice::error("Upload failed", "Error uploading file."));
        assert_eq!(state.receipt, None);
    }

    #[test]
    fn blank_or_invalid_json_never_reaches_the_service() {
        let storage = MemoryStorageService::default();
        let host = host(&storage);

        let blank = block_on(submit_json(&host, "   ")).expect_err("blank");
        assert_eq!(blank, JsonUploadError::Empty);
        assert_eq!(blank.notice().title, "Error");

        let invalid = block_on(submit_json(&host, "{ nope")).expect_err("invalid");
        assert!(matches!(
            invalid,
            JsonUploadError::Storage(StorageError::MalformedInput(_))
        ));
        assert_eq!(
            invalid.notice(),
            Notice::error("Invalid JSON", "Please fix JSON syntax errors.")
        );
        assert!(storage.calls().is_empty());
    }

    #[test]
    fn valid_json_is_sent_trimmed_and_ack_pretty_printed() {
        let storage = MemoryStorageService::default();
        let ack = block_on(submit_json(&host(&storage), "  [1, 2]  ")).expect("submit");
        assert_eq!(
            ack,
            "{\n  \"dataset_id\": 1,\n  \"storage_type\": \"sql\"\n}"
        );
        assert_eq!(storage.calls(), vec!["upload_json"]);

        let mut state = JsonUploadState::default();
        assert!(state.begin());
        assert!(!state.begin());
        let notice = state.finish(Ok(ack));
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(!state.in_flight);
    }

    #[test]
    fn service_failure_maps_to_send_error_toast() {
        let storage = MemoryStorageService::default();
        storage.fail_operation("upload_json", StorageError::Transport("down".to_string()));
        let err = block_on(submit_json(&host(&storage), "{}")).expect_err("send");
        assert_eq!(
            err.notice(),
            Notice::error("Upload failed", "Could not send JSON.")
        );
    }

    #[test]
    fn settled_upload_toast_reaches_the_notification_service() {
        let storage = MemoryStorageService::default();
        let notifications = MemoryNotificationService::default();
        let host = HostServices {
            notifications: Rc::new(notifications.clone()),
            ..host(&storage)
        };

        let mut state = JsonUploadState::default();
        state.begin();
        let notice = state.finish(block_on(submit_json(&host, "")));
        block_on(show_notice(&host, &notice));

        assert_eq!(
            notifications.notices(),
            vec![Notice::error("Error", "No JSON provided.")]
        );
    }

    #[test]
    fn switching_modes_keeps_outstanding_requests_gated() {
        let mut session = UploadSession::default();
        session.file.select(file("a.txt"));
        assert_eq!(session.file.begin(), Some(file("a.txt")));

        session.mode = UploadMode::Json;
        session.json_text = "{\"a\": 1}".to_string();
        assert!(session.json.begin());

        session.mode = UploadMode::File;
        assert!(!session.file.can_upload());
        assert_eq!(session.file.begin(), None);

        let notice = session
            .file
            .finish("a.txt", Ok(UploadReceipt::Acknowledged("{}".to_string())));
        assert_eq!(notice, Notice::success("Upload successful", "a.txt has been uploaded."));
        assert!(session.file.can_upload());

        session.mode = UploadMode::Json;
        assert!(!session.json.begin());
        assert_eq!(session.json_text, "{\"a\": 1}");
    }
}
