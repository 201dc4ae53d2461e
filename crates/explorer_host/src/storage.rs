//! Storage-service contract plus no-op and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;

use crate::error::StorageError;
use crate::records::{
    DatasetPayload, DatasetSummary, FileTree, FileUpload, Record, RecordId, ResolvedUrl,
    StoredUpload, TreeBranch, TreeCategory, TreeSubfolder, UploadResponse,
};

/// Object-safe boxed future used by [`StorageService`] async methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Remote storage service consumed by the explorer, upload and dataset views.
pub trait StorageService {
    /// Loads the full category/subfolder tree (`GET /files/tree`).
    fn load_tree<'a>(&'a self) -> StorageFuture<'a, Result<FileTree, StorageError>>;

    /// Runs a full-text search over record names (`GET /search`).
    fn search<'a>(&'a self, query: &'a str) -> StorageFuture<'a, Result<Vec<Record>, StorageError>>;

    /// Resolves an in-browser viewing URL for a record (`GET /view/{id}`).
    fn view_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>>;

    /// Resolves a download URL for a record (`GET /download/{id}`).
    fn download_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>>;

    /// Deletes a record (`DELETE /delete/{id}`).
    fn delete<'a>(&'a self, id: &'a RecordId) -> StorageFuture<'a, Result<(), StorageError>>;

    /// Uploads a file as multipart field `file` (`POST /upload`).
    fn upload_file<'a>(
        &'a self,
        file: &'a FileUpload,
    ) -> StorageFuture<'a, Result<UploadResponse, StorageError>>;

    /// Submits a raw JSON document (`POST /json/upload`).
    fn upload_json<'a>(&'a self, raw: &'a str) -> StorageFuture<'a, Result<Value, StorageError>>;

    /// Lists dataset summaries, optionally filtered (`GET /json/datasets`).
    fn list_datasets<'a>(
        &'a self,
        query: Option<&'a str>,
    ) -> StorageFuture<'a, Result<Vec<DatasetSummary>, StorageError>>;

    /// Fetches one dataset's full payload (`GET /json/{id}`).
    fn dataset<'a>(&'a self, id: i64) -> StorageFuture<'a, Result<DatasetPayload, StorageError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op storage adapter for unsupported targets and baseline tests.
pub struct NoopStorageService;

impl NoopStorageService {
    fn unsupported_error(op: &str) -> StorageError {
        StorageError::Unavailable(op.to_string())
    }
}

impl StorageService for NoopStorageService {
    fn load_tree<'a>(&'a self) -> StorageFuture<'a, Result<FileTree, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("load_tree")) })
    }

    fn search<'a>(
        &'a self,
        _query: &'a str,
    ) -> StorageFuture<'a, Result<Vec<Record>, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("search")) })
    }

    fn view_url<'a>(
        &'a self,
        _id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("view_url")) })
    }

    fn download_url<'a>(
        &'a self,
        _id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("download_url")) })
    }

    fn delete<'a>(&'a self, _id: &'a RecordId) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("delete")) })
    }

    fn upload_file<'a>(
        &'a self,
        _file: &'a FileUpload,
    ) -> StorageFuture<'a, Result<UploadResponse, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("upload_file")) })
    }

    fn upload_json<'a>(&'a self, _raw: &'a str) -> StorageFuture<'a, Result<Value, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("upload_json")) })
    }

    fn list_datasets<'a>(
        &'a self,
        _query: Option<&'a str>,
    ) -> StorageFuture<'a, Result<Vec<DatasetSummary>, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("list_datasets")) })
    }

    fn dataset<'a>(&'a self, _id: i64) -> StorageFuture<'a, Result<DatasetPayload, StorageError>> {
        Box::pin(async { Err(Self::unsupported_error("dataset")) })
    }
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    records: Vec<Record>,
    datasets: Vec<(DatasetSummary, Value)>,
    failures: HashMap<&'static str, StorageError>,
    calls: Vec<String>,
    next_id: i64,
}

#[derive(Debug, Clone, Default)]
/// In-memory storage service that mirrors the remote grouping and search rules.
///
/// Records are grouped by `stored_path`: the first segment is the category, and paths with at
/// least three segments place the record in the second segment's subfolder. Operations can be
/// forced to fail with [`MemoryStorageService::fail_operation`], and every call is logged for
/// assertions.
pub struct MemoryStorageService {
    inner: Rc<RefCell<MemoryStorageInner>>,
}

impl MemoryStorageService {
    /// Creates a store seeded with `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: Rc::new(RefCell::new(MemoryStorageInner {
                records,
                next_id,
                ..MemoryStorageInner::default()
            })),
        }
    }

    /// Adds a dataset with its payload.
    pub fn insert_dataset(&self, summary: DatasetSummary, data: Value) {
        self.inner.borrow_mut().datasets.push((summary, data));
    }

    /// Forces every later call of `op` (a [`StorageService`] method name) to fail with `error`.
    pub fn fail_operation(&self, op: &'static str, error: StorageError) {
        self.inner.borrow_mut().failures.insert(op, error);
    }

    /// Clears a failure installed with [`MemoryStorageService::fail_operation`].
    pub fn restore_operation(&self, op: &'static str) {
        self.inner.borrow_mut().failures.remove(op);
    }

    /// Calls issued so far, formatted as `op` or `op:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    /// Current record snapshot.
    pub fn records(&self) -> Vec<Record> {
        self.inner.borrow().records.clone()
    }

    fn begin(&self, op: &'static str, arg: Option<&str>) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(match arg {
            Some(arg) => format!("{op}:{arg}"),
            None => op.to_string(),
        });
        match inner.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> StorageError {
        StorageError::Status {
            status: 404,
            body: format!("{what} not found"),
        }
    }

    fn find_record(&self, id: &RecordId) -> Result<Record, StorageError> {
        self.inner
            .borrow()
            .records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("File"))
    }

    fn build_tree(records: &[Record]) -> FileTree {
        let mut tree = FileTree::default();
        for record in records {
            let Some(path) = record.stored_path.as_deref() else {
                continue;
            };
            let parts: Vec<&str> = path.split('/').collect();
            let category = parts[0].to_string();
            let subfolder = (parts.len() >= 3).then(|| parts[1].to_string());

            let slot = match tree.categories.iter().position(|c| c.name == category) {
                Some(idx) => idx,
                None => {
                    let branch = if subfolder.is_some() {
                        TreeBranch::Subfolders(Vec::new())
                    } else {
                        TreeBranch::Files(Vec::new())
                    };
                    tree.categories.push(TreeCategory {
                        name: category,
                        branch,
                    });
                    tree.categories.len() - 1
                }
            };

            // The first record fixes the category's shape; records of the other shape are skipped.
            match (&mut tree.categories[slot].branch, subfolder) {
                (TreeBranch::Subfolders(subfolders), Some(subfolder)) => {
                    match subfolders.iter_mut().find(|s| s.name == subfolder) {
                        Some(existing) => existing.records.push(record.clone()),
                        None => subfolders.push(TreeSubfolder {
                            name: subfolder,
                            records: vec![record.clone()],
                        }),
                    }
                }
                (TreeBranch::Files(files), None) => files.push(record.clone()),
                _ => continue,
            }
        }
        tree
    }
}

impl StorageService for MemoryStorageService {
    fn load_tree<'a>(&'a self) -> StorageFuture<'a, Result<FileTree, StorageError>> {
        Box::pin(async move {
            self.begin("load_tree", None)?;
            Ok(Self::build_tree(&self.inner.borrow().records))
        })
    }

    fn search<'a>(&'a self, query: &'a str) -> StorageFuture<'a, Result<Vec<Record>, StorageError>> {
        Box::pin(async move {
            self.begin("search", Some(query))?;
            let needle = query.to_lowercase();
            let mut matches: Vec<Record> = self
                .inner
                .borrow()
                .records
                .iter()
                .filter(|record| record.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            matches.reverse();
            Ok(matches)
        })
    }

    fn view_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async move {
            self.begin("view_url", Some(id.as_str()))?;
            let record = self.find_record(id)?;
            Ok(ResolvedUrl {
                url: format!("memory://view/{id}"),
                mime_type: record.mime_type,
                filename: None,
            })
        })
    }

    fn download_url<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> StorageFuture<'a, Result<ResolvedUrl, StorageError>> {
        Box::pin(async move {
            self.begin("download_url", Some(id.as_str()))?;
            let record = self.find_record(id)?;
            Ok(ResolvedUrl {
                url: format!("memory://download/{id}"),
                mime_type: None,
                filename: Some(record.name),
            })
        })
    }

    fn delete<'a>(&'a self, id: &'a RecordId) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.begin("delete", Some(id.as_str()))?;
            let mut inner = self.inner.borrow_mut();
            let before = inner.records.len();
            inner.records.retain(|record| &record.id != id);
            if inner.records.len() == before {
                return Err(Self::not_found("File"));
            }
            Ok(())
        })
    }

    fn upload_file<'a>(
        &'a self,
        file: &'a FileUpload,
    ) -> StorageFuture<'a, Result<UploadResponse, StorageError>> {
        Box::pin(async move {
            self.begin("upload_file", Some(&file.file_name))?;
            let mut inner = self.inner.borrow_mut();
            let id = RecordId::from(inner.next_id);
            inner.next_id += 1;
            let stored_as = format!("uploads/{}", file.file_name);
            inner.records.push(Record {
                id: id.clone(),
                name: file.file_name.clone(),
                mime_type: file.content_type.clone(),
                stored_path: Some(stored_as.clone()),
                size_bytes: i64::try_from(file.bytes.len()).ok(),
                created_at: None,
            });
            Ok(UploadResponse::Stored(StoredUpload { id, stored_as }))
        })
    }

    fn upload_json<'a>(&'a self, raw: &'a str) -> StorageFuture<'a, Result<Value, StorageError>> {
        Box::pin(async move {
            self.begin("upload_json", None)?;
            let data: Value = serde_json::from_str(raw).map_err(|err| StorageError::Status {
                status: 422,
                body: err.to_string(),
            })?;
            let mut inner = self.inner.borrow_mut();
            let id = inner.datasets.iter().map(|(s, _)| s.id).max().unwrap_or(0) + 1;
            let storage_type = if data.is_array() { "sql" } else { "nosql" };
            inner.datasets.push((
                DatasetSummary {
                    id,
                    storage_type: Some(storage_type.to_string()),
                    sql_table_name: None,
                    mongo_collection_name: None,
                    original_name: None,
                    created_at: None,
                },
                data,
            ));
            Ok(serde_json::json!({ "dataset_id": id, "storage_type": storage_type }))
        })
    }

    fn list_datasets<'a>(
        &'a self,
        query: Option<&'a str>,
    ) -> StorageFuture<'a, Result<Vec<DatasetSummary>, StorageError>> {
        Box::pin(async move {
            self.begin("list_datasets", query)?;
            let needle = query.map(str::to_lowercase);
            Ok(self
                .inner
                .borrow()
                .datasets
                .iter()
                .map(|(summary, _)| summary)
                .filter(|summary| match needle.as_deref() {
                    None | Some("") => true,
                    Some(needle) => {
                        summary.id.to_string() == needle
                            || summary.display_name().to_lowercase().contains(needle)
                    }
                })
                .cloned()
                .collect())
        })
    }

    fn dataset<'a>(&'a self, id: i64) -> StorageFuture<'a, Result<DatasetPayload, StorageError>> {
        Box::pin(async move {
            self.begin("dataset", Some(&id.to_string()))?;
            self.inner
                .borrow()
                .datasets
                .iter()
                .find(|(summary, _)| summary.id == id)
                .map(|(summary, data)| DatasetPayload {
                    dataset_id: summary.id,
                    storage_type: summary.storage_type.clone(),
                    data: data.clone(),
                })
                .ok_or_else(|| Self::not_found("Dataset"))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: i64, name: &str, path: &str) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            mime_type: None,
            stored_path: Some(path.to_string()),
            size_bytes: Some(10),
            created_at: None,
        }
    }

    #[test]
    fn noop_storage_service_reports_unavailable() {
        let storage = NoopStorageService;
        let storage: &dyn StorageService = &storage;

        let err = block_on(storage.load_tree()).expect_err("tree should fail");
        assert_eq!(err, StorageError::Unavailable("load_tree".to_string()));
        let err = block_on(storage.search("report")).expect_err("search should fail");
        assert!(err.to_string().contains("search"));
    }

    #[test]
    fn memory_tree_groups_by_stored_path() {
        let storage = MemoryStorageService::with_records(vec![
            record(1, "a.png", "media/images/1_a.png"),
            record(2, "b.json", "json_data/2_b.json"),
            record(3, "c.mp4", "media/videos/3_c.mp4"),
            record(4, "d.png", "media/images/4_d.png"),
        ]);

        let tree = block_on(storage.load_tree()).expect("tree");
        let names: Vec<_> = tree.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["media", "json_data"]);

        let TreeBranch::Subfolders(subfolders) = &tree.categories[0].branch else {
            panic!("media should have subfolders");
        };
        assert_eq!(subfolders[0].name, "images");
        assert_eq!(subfolders[0].records.len(), 2);
        assert_eq!(subfolders[1].name, "videos");
        assert!(matches!(&tree.categories[1].branch, TreeBranch::Files(files) if files.len() == 1));
    }

    #[test]
    fn memory_tree_skips_records_that_do_not_fit_the_category_shape() {
        let storage = MemoryStorageService::with_records(vec![
            record(1, "a.pdf", "documents/pdf/1_a.pdf"),
            record(2, "loose.txt", "documents/2_loose.txt"),
            record(3, "b.pdf", "documents/pdf/3_b.pdf"),
            record(4, "c.png", "images/4_c.png"),
            record(5, "d.png", "images/raw/5_d.png"),
        ]);

        let tree = block_on(storage.load_tree()).expect("tree");
        let TreeBranch::Subfolders(subfolders) = &tree.categories[0].branch else {
            panic!("documents should keep its subfolders");
        };
        let ids: Vec<_> = subfolders[0]
            .records
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(subfolders.len(), 1);
        assert_eq!(ids, vec!["1", "3"]);

        let TreeBranch::Files(files) = &tree.categories[1].branch else {
            panic!("images should stay flat");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, RecordId::from(4));
    }

    #[test]
    fn memory_search_is_case_insensitive_newest_first() {
        let storage = MemoryStorageService::with_records(vec![
            record(1, "Report-2024.pdf", "documents/pdf/1.pdf"),
            record(2, "notes.txt", "documents/text/2.txt"),
            record(3, "report-2025.pdf", "documents/pdf/3.pdf"),
        ]);

        let hits = block_on(storage.search("REPORT")).expect("search");
        let ids: Vec<_> = hits.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(storage.calls(), vec!["search:REPORT".to_string()]);
    }

    #[test]
    fn memory_failures_are_injected_per_operation() {
        let storage =
            MemoryStorageService::with_records(vec![record(1, "a.txt", "documents/text/a.txt")]);
        storage.fail_operation(
            "delete",
            StorageError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        );

        let err = block_on(storage.delete(&RecordId::from(1))).expect_err("delete should fail");
        assert_eq!(err.status(), Some(500));
        assert_eq!(storage.records().len(), 1);

        storage.restore_operation("delete");
        block_on(storage.delete(&RecordId::from(1))).expect("delete");
        assert!(storage.records().is_empty());
        let err = block_on(storage.delete(&RecordId::from(1))).expect_err("already deleted");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn memory_uploads_create_records_and_datasets() {
        let storage = MemoryStorageService::default();
        let upload = FileUpload {
            file_name: "cat.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0; 4],
        };
        let response = block_on(storage.upload_file(&upload)).expect("upload");
        let UploadResponse::Stored(stored) = response else {
            panic!("expected stored upload");
        };
        assert_eq!(stored.stored_as, "uploads/cat.png");
        assert_eq!(storage.records()[0].size_bytes, Some(4));

        let ack = block_on(storage.upload_json(r#"[{"a":1}]"#)).expect("json upload");
        assert_eq!(ack["storage_type"], "sql");
        let listed = block_on(storage.list_datasets(None)).expect("list");
        assert_eq!(listed.len(), 1);
        let payload = block_on(storage.dataset(listed[0].id)).expect("payload");
        assert_eq!(payload.data, serde_json::json!([{ "a": 1 }]));
    }
}
