//! Record table view model.
//!
//! Every render replaces the full row set and bumps the render generation. Row controls carry
//! their own [`RecordId`], so activating a control never depends on row position or on rows
//! that have since been replaced.

use explorer_host::{Record, RecordId};

use crate::format::{classify, format_size, format_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-row control.
pub enum RecordAction {
    /// Open the record's view URL in a new browsing context.
    View,
    /// Navigate the current context to the download URL.
    Download,
    /// Confirm, then delete the record.
    Delete,
}

impl RecordAction {
    /// Controls in display order.
    pub const ALL: [Self; 3] = [Self::View, Self::Download, Self::Delete];

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Download => "Download",
            Self::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A row control bound to the record it was rendered for.
pub struct RowAction {
    /// Which control.
    pub action: RecordAction,
    /// Record the control operates on.
    pub record_id: RecordId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Stable row identity: render generation plus position within that render.
pub struct RowKey {
    /// Generation of the render that produced the row.
    pub generation: u64,
    /// Row position.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
/// Display-ready table row.
pub struct TableRow {
    pub key: RowKey,
    pub record_id: RecordId,
    pub name: String,
    pub icon: &'static str,
    pub kind: String,
    pub size: String,
    pub created: String,
    pub actions: Vec<RowAction>,
}

impl TableRow {
    fn from_record(generation: u64, index: usize, record: &Record) -> Self {
        let kind = classify(record);
        Self {
            key: RowKey { generation, index },
            record_id: record.id.clone(),
            name: record.name.clone(),
            icon: kind.icon(),
            kind: kind.label().to_string(),
            size: format_size(record.size_bytes),
            created: format_timestamp(record.created_at.as_deref()),
            actions: RecordAction::ALL
                .into_iter()
                .map(|action| RowAction {
                    action,
                    record_id: record.id.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Single-cell message shown in place of rows.
pub enum TableMessage {
    /// Nothing selected yet.
    SelectFolder,
    /// The selected folder is empty.
    EmptyFolder,
    /// A search matched nothing.
    NoSearchResults {
        /// Query echoed back.
        query: String,
    },
    /// A record was just deleted.
    Deleted,
    /// The tree failed to load.
    LoadFailed,
}

impl TableMessage {
    /// Message text.
    pub fn text(&self) -> String {
        match self {
            Self::SelectFolder => "Select a folder on the left to view files.".to_string(),
            Self::EmptyFolder => "No files in this folder.".to_string(),
            Self::NoSearchResults { query } => format!("No files found for \"{query}\""),
            Self::Deleted => "File deleted. Select a folder again.".to_string(),
            Self::LoadFailed => "Error loading files.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// What the table body shows.
pub enum TableContent {
    /// Record rows.
    Rows(Vec<TableRow>),
    /// A single message cell.
    Message(TableMessage),
}

#[derive(Debug, Clone, PartialEq)]
/// Record table state.
pub struct TableView {
    generation: u64,
    content: TableContent,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            generation: 0,
            content: TableContent::Message(TableMessage::SelectFolder),
        }
    }
}

impl TableView {
    /// Current table body.
    pub fn content(&self) -> &TableContent {
        &self.content
    }

    /// Generation of the latest render.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rows of the latest render; empty while a message is shown.
    pub fn rows(&self) -> &[TableRow] {
        match &self.content {
            TableContent::Rows(rows) => rows,
            TableContent::Message(_) => &[],
        }
    }

    /// Message of the latest render, if any.
    pub fn message(&self) -> Option<&TableMessage> {
        match &self.content {
            TableContent::Message(message) => Some(message),
            TableContent::Rows(_) => None,
        }
    }

    /// Replaces the body with one row per record, or `empty` when there are none.
    pub fn render_records(&mut self, records: &[Record], empty: TableMessage) {
        self.generation += 1;
        if records.is_empty() {
            self.content = TableContent::Message(empty);
            return;
        }
        let generation = self.generation;
        self.content = TableContent::Rows(
            records
                .iter()
                .enumerate()
                .map(|(index, record)| TableRow::from_record(generation, index, record))
                .collect(),
        );
    }

    /// Replaces the body with a single message.
    pub fn render_message(&mut self, message: TableMessage) {
        self.generation += 1;
        self.content = TableContent::Message(message);
    }
}
