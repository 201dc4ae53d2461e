//! Wire models shared by the storage service contracts and the explorer runtime.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Opaque, stable record identifier used for every per-record service call.
///
/// The service currently issues integers; the client never interprets the value beyond echoing it
/// back in request paths.
pub struct RecordId(String);

impl RecordId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrowed identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Self::from(id),
            RawId::Text(id) => Self(id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
/// Metadata for one stored file, as exposed by the tree and search endpoints.
pub struct Record {
    /// Stable identifier used for view/download/delete calls.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// MIME type reported by the service.
    pub mime_type: Option<String>,
    /// Object path inside the store (`category/subfolder/file`).
    pub stored_path: Option<String>,
    /// Size in bytes.
    pub size_bytes: Option<i64>,
    /// Creation timestamp (ISO-8601).
    pub created_at: Option<String>,
}

/// Tree entries carry `name`/`created_at`; search results carry `original_name`/`uploaded_at`.
#[derive(Deserialize)]
struct RecordWire {
    id: RecordId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    original_name: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    stored_path: Option<String>,
    #[serde(default)]
    size_bytes: Option<i64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    uploaded_at: Option<String>,
}

impl From<RecordWire> for Record {
    fn from(wire: RecordWire) -> Self {
        Self {
            id: wire.id,
            name: first_non_empty([wire.name, wire.original_name]).unwrap_or_default(),
            mime_type: wire.mime_type,
            stored_path: wire.stored_path,
            size_bytes: wire.size_bytes,
            created_at: first_non_empty([wire.created_at, wire.uploaded_at]),
        }
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Two-level category/subfolder grouping returned by `GET /files/tree`.
///
/// Categories and subfolders keep the order in which the service emitted them.
pub struct FileTree {
    /// Top-level categories.
    pub categories: Vec<TreeCategory>,
}

#[derive(Debug, Clone, PartialEq)]
/// One top-level category of a [`FileTree`].
pub struct TreeCategory {
    /// Category name, unique within the tree.
    pub name: String,
    /// Category content.
    pub branch: TreeBranch,
}

#[derive(Debug, Clone, PartialEq)]
/// Content of a category: either records directly or a set of named subfolders.
pub enum TreeBranch {
    /// The category holds records directly.
    Files(Vec<Record>),
    /// The category holds named subfolders.
    Subfolders(Vec<TreeSubfolder>),
}

#[derive(Debug, Clone, PartialEq)]
/// Named subfolder inside a category.
pub struct TreeSubfolder {
    /// Subfolder name, unique within its category.
    pub name: String,
    /// Records in the subfolder (may be empty in the raw payload).
    pub records: Vec<Record>,
}

impl FileTree {
    /// Returns `true` when the service reported no categories at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&TreeCategory> {
        self.categories.iter().find(|category| category.name == name)
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, key: String, value: T) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

impl<'de> Deserialize<'de> for FileTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = FileTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to records or subfolders")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, branch)) = map.next_entry::<String, TreeBranch>()? {
                    upsert(&mut entries, name, branch);
                }
                Ok(FileTree {
                    categories: entries
                        .into_iter()
                        .map(|(name, branch)| TreeCategory { name, branch })
                        .collect(),
                })
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}

impl<'de> Deserialize<'de> for TreeBranch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BranchVisitor;

        impl<'de> Visitor<'de> for BranchVisitor {
            type Value = TreeBranch;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of records or a map of subfolder name to records")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut records = Vec::new();
                while let Some(record) = seq.next_element::<Record>()? {
                    records.push(record);
                }
                Ok(TreeBranch::Files(records))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, records)) = map.next_entry::<String, Option<Vec<Record>>>()? {
                    upsert(&mut entries, name, records.unwrap_or_default());
                }
                Ok(TreeBranch::Subfolders(
                    entries
                        .into_iter()
                        .map(|(name, records)| TreeSubfolder { name, records })
                        .collect(),
                ))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(TreeBranch::Files(Vec::new()))
            }
        }

        deserializer.deserialize_any(BranchVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// URL resolved by `GET /view/{id}` or `GET /download/{id}`.
pub struct ResolvedUrl {
    /// Presigned URL to open or navigate to.
    pub url: String,
    /// MIME type hint (view responses).
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Suggested download filename (download responses).
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// File chosen in the upload widget, read fully into memory.
pub struct FileUpload {
    /// Original file name.
    pub file_name: String,
    /// Browser-reported MIME type, when known.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Location acknowledgment for a stored file upload.
pub struct StoredUpload {
    /// Identifier of the new record.
    pub id: RecordId,
    /// Object path the service stored the file under.
    pub stored_as: String,
}

impl StoredUpload {
    /// Top-level category of the stored path.
    pub fn category(&self) -> &str {
        self.stored_as
            .split('/')
            .next()
            .unwrap_or(self.stored_as.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Response to `POST /upload`.
pub enum UploadResponse {
    /// The file was stored as a record.
    Stored(StoredUpload),
    /// The service ingested the upload (JSON documents) and answered with its own payload.
    Acknowledged(Value),
}

impl UploadResponse {
    /// Classifies a raw upload response body.
    pub fn from_value(value: Value) -> Self {
        let has_location = value.get("id").is_some()
            && value.get("stored_as").and_then(Value::as_str).is_some();
        if has_location {
            if let Ok(stored) = serde_json::from_value::<StoredUpload>(value.clone()) {
                return Self::Stored(stored);
            }
        }
        Self::Acknowledged(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Summary row for a stored JSON dataset.
pub struct DatasetSummary {
    /// Dataset identifier.
    pub id: i64,
    /// Storage backend tag (`sql`, `nosql`).
    #[serde(default)]
    pub storage_type: Option<String>,
    /// Relational table name for `sql` datasets.
    #[serde(default)]
    pub sql_table_name: Option<String>,
    /// Document collection name for `nosql` datasets.
    #[serde(default)]
    pub mongo_collection_name: Option<String>,
    /// Original upload name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Creation timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DatasetSummary {
    /// Display name: table, collection, upload name, then `dataset_{id}`.
    pub fn display_name(&self) -> String {
        first_non_empty([
            self.sql_table_name.clone(),
            self.mongo_collection_name.clone(),
            self.original_name.clone(),
        ])
        .unwrap_or_else(|| format!("dataset_{}", self.id))
    }

    /// Upper-cased storage tag, or `-`.
    pub fn type_label(&self) -> String {
        match self.storage_type.as_deref() {
            Some(tag) if !tag.is_empty() => tag.to_uppercase(),
            _ => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Full dataset content returned by `GET /json/{id}`.
pub struct DatasetPayload {
    /// Identifier reported by the service for this payload.
    pub dataset_id: i64,
    /// Storage backend tag.
    #[serde(default)]
    pub storage_type: Option<String>,
    /// Dataset content.
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn record_accepts_tree_and_search_field_names() {
        let from_tree: Record = serde_json::from_value(json!({
            "id": 3,
            "name": "report.pdf",
            "stored_path": "documents/pdf/ab12_report.pdf",
            "mime_type": "application/pdf",
            "size_bytes": 2048,
            "created_at": "2025-03-01T10:00:00"
        }))
        .expect("tree record");
        assert_eq!(from_tree.id, RecordId::from(3));
        assert_eq!(from_tree.name, "report.pdf");

        let from_search: Record = serde_json::from_value(json!({
            "id": 4,
            "original_name": "invoice.xlsx",
            "stored_path": "documents/excel/cd34_invoice.xlsx",
            "mime_type": "application/vnd.ms-excel",
            "size_bytes": 10,
            "uploaded_at": "2025-03-02T11:00:00"
        }))
        .expect("search record");
        assert_eq!(from_search.name, "invoice.xlsx");
        assert_eq!(from_search.created_at.as_deref(), Some("2025-03-02T11:00:00"));

        let sparse: Record =
            serde_json::from_value(json!({ "id": "abc", "name": "", "original_name": "x.txt" }))
                .expect("sparse record");
        assert_eq!(sparse.id.as_str(), "abc");
        assert_eq!(sparse.name, "x.txt");
        assert_eq!(sparse.size_bytes, None);
        assert_eq!(sparse.created_at, None);
    }

    #[test]
    fn tree_preserves_payload_order_and_branch_shapes() {
        let tree: FileTree = serde_json::from_str(
            r#"{
                "media": { "videos": [], "images": [{ "id": 1, "name": "a.png" }] },
                "json_data": [{ "id": 2, "name": "b.json" }],
                "documents": { "pdf": null }
            }"#,
        )
        .expect("tree");

        let names: Vec<_> = tree.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["media", "json_data", "documents"]);

        match &tree.category("media").expect("media").branch {
            TreeBranch::Subfolders(subfolders) => {
                let names: Vec<_> = subfolders.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["videos", "images"]);
                assert!(subfolders[0].records.is_empty());
                assert_eq!(subfolders[1].records[0].name, "a.png");
            }
            other => panic!("expected subfolders, got {other:?}"),
        }
        assert!(matches!(
            &tree.category("json_data").expect("json_data").branch,
            TreeBranch::Files(records) if records.len() == 1
        ));
        assert!(matches!(
            &tree.category("documents").expect("documents").branch,
            TreeBranch::Subfolders(subfolders) if subfolders[0].records.is_empty()
        ));
    }

    #[test]
    fn empty_tree_payload_has_no_categories() {
        let tree: FileTree = serde_json::from_str("{}").expect("tree");
        assert!(tree.is_empty());
        assert!(serde_json::from_str::<FileTree>("[]").is_err());
    }

    #[test]
    fn upload_response_distinguishes_stored_files_from_ingestion_acks() {
        let stored = UploadResponse::from_value(json!({
            "status": "success",
            "stored_as": "media/images/1a2b_cat.png",
            "id": 9
        }));
        match stored {
            UploadResponse::Stored(upload) => {
                assert_eq!(upload.id, RecordId::from(9));
                assert_eq!(upload.category(), "media");
            }
            other => panic!("expected stored upload, got {other:?}"),
        }

        let ack = json!({ "dataset_id": 4, "storage_type": "sql" });
        assert_eq!(
            UploadResponse::from_value(ack.clone()),
            UploadResponse::Acknowledged(ack)
        );
    }

    #[test]
    fn dataset_display_name_falls_back_in_order() {
        let mut summary: DatasetSummary = serde_json::from_value(json!({
            "id": 12,
            "storage_type": "nosql",
            "sql_table_name": null,
            "mongo_collection_name": "orders_12",
            "created_at": null
        }))
        .expect("summary");
        assert_eq!(summary.display_name(), "orders_12");
        assert_eq!(summary.type_label(), "NOSQL");

        summary.mongo_collection_name = None;
        summary.original_name = Some("orders.json".to_string());
        assert_eq!(summary.display_name(), "orders.json");

        summary.original_name = None;
        summary.storage_type = None;
        assert_eq!(summary.display_name(), "dataset_12");
        assert_eq!(summary.type_label(), "-");
    }
}
