//! Explorer session state and selection keys.

use std::fmt;

use crate::{table::TableView, tree::FolderTreeView};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identity of a selectable tree node.
pub enum FolderKey {
    /// A category that holds records directly.
    Category(String),
    /// A subfolder nested in a grouped category.
    Subfolder {
        /// Parent category name.
        category: String,
        /// Subfolder name.
        subfolder: String,
    },
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => f.write_str(category),
            Self::Subfolder {
                category,
                subfolder,
            } => write!(f, "{category}/{subfolder}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// What the record table currently reflects.
///
/// A single key drives both the active node styling and the table contents, so two nodes can
/// never be highlighted at once.
pub enum SelectionKey {
    #[default]
    /// Nothing selected.
    None,
    /// A folder node is selected.
    Folder(FolderKey),
    /// The table shows search results.
    Search {
        /// Trimmed query that produced the results.
        query: String,
    },
}

impl SelectionKey {
    /// Selected folder, if the selection is a folder.
    pub fn folder(&self) -> Option<&FolderKey> {
        match self {
            Self::Folder(key) => Some(key),
            _ => None,
        }
    }

    /// Whether `key` should be styled active.
    pub fn is_active(&self, key: &FolderKey) -> bool {
        self.folder() == Some(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Load status of the folder tree panel.
pub enum TreeStatus {
    #[default]
    /// A tree request is outstanding.
    Loading,
    /// The last tree request succeeded.
    Ready,
    /// The last tree request failed.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Complete explorer session state.
pub struct ExplorerState {
    /// Current selection.
    pub selection: SelectionKey,
    /// Last successfully loaded tree.
    pub tree: FolderTreeView,
    /// Tree panel status.
    pub tree_status: TreeStatus,
    /// Record table contents.
    pub table: TableView,
}
