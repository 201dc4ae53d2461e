//! Folder tree view model built from a [`FileTree`].

use explorer_host::{FileTree, Record, TreeBranch};

use crate::model::{FolderKey, SelectionKey};

/// Placeholder shown in place of the tree when the service holds no records.
pub const EMPTY_TREE_PLACEHOLDER: &str = "No files stored yet.";

#[derive(Debug, Clone, Default, PartialEq)]
/// Renderable folder tree in server order.
///
/// The view is rebuilt wholesale on every successful tree load; nothing is merged incrementally.
pub struct FolderTreeView {
    /// Top-level category nodes.
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq)]
/// One top-level category.
pub struct CategoryNode {
    /// Category name as reported by the service.
    pub name: String,
    /// Flat record list or subfolder group.
    pub kind: CategoryNodeKind,
}

#[derive(Debug, Clone, PartialEq)]
/// Shape of a category node.
pub enum CategoryNodeKind {
    /// Category whose records are selected directly.
    Leaf {
        /// Selection key for the category.
        key: FolderKey,
        /// Records shown when selected.
        records: Vec<Record>,
    },
    /// Non-selectable category label that groups subfolders.
    Group {
        /// Whether child nodes are visible.
        expanded: bool,
        /// Non-empty subfolders in server order.
        children: Vec<SubfolderNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Selectable subfolder under a grouped category.
pub struct SubfolderNode {
    /// Selection key for the subfolder.
    pub key: FolderKey,
    /// Records shown when selected.
    pub records: Vec<Record>,
}

impl SubfolderNode {
    /// Node label, `category/subfolder`.
    pub fn label(&self) -> String {
        self.key.to_string()
    }
}

impl FolderTreeView {
    /// Builds the view for `tree`, dropping subfolders that hold no records.
    pub fn build(tree: &FileTree) -> Self {
        let categories = tree
            .categories
            .iter()
            .map(|category| {
                let kind = match &category.branch {
                    TreeBranch::Files(records) => CategoryNodeKind::Leaf {
                        key: FolderKey::Category(category.name.clone()),
                        records: records.clone(),
                    },
                    TreeBranch::Subfolders(subfolders) => CategoryNodeKind::Group {
                        expanded: true,
                        children: subfolders
                            .iter()
                            .filter(|subfolder| !subfolder.records.is_empty())
                            .map(|subfolder| SubfolderNode {
                                key: FolderKey::Subfolder {
                                    category: category.name.clone(),
                                    subfolder: subfolder.name.clone(),
                                },
                                records: subfolder.records.clone(),
                            })
                            .collect(),
                    },
                };
                CategoryNode {
                    name: category.name.clone(),
                    kind,
                }
            })
            .collect();
        Self { categories }
    }

    /// True when there are no categories at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Placeholder text to show instead of nodes, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_TREE_PLACEHOLDER)
    }

    /// Records behind a selectable node.
    pub fn records_for(&self, key: &FolderKey) -> Option<&[Record]> {
        self.categories.iter().find_map(|category| match &category.kind {
            CategoryNodeKind::Leaf { key: leaf, records } if leaf == key => {
                Some(records.as_slice())
            }
            CategoryNodeKind::Group { children, .. } => children
                .iter()
                .find(|child| &child.key == key)
                .map(|child| child.records.as_slice()),
            CategoryNodeKind::Leaf { .. } => None,
        })
    }

    /// Every selectable node key in display order.
    pub fn selectable_keys(&self) -> Vec<&FolderKey> {
        self.categories
            .iter()
            .flat_map(|category| match &category.kind {
                CategoryNodeKind::Leaf { key, .. } => vec![key],
                CategoryNodeKind::Group { children, .. } => {
                    children.iter().map(|child| &child.key).collect()
                }
            })
            .collect()
    }

    /// Selectable nodes styled active under `selection`.
    pub fn active_keys(&self, selection: &SelectionKey) -> Vec<&FolderKey> {
        self.selectable_keys()
            .into_iter()
            .filter(|key| selection.is_active(key))
            .collect()
    }

    /// Flips the expanded flag of a grouped category. Returns `false` if no such group exists.
    pub fn toggle_group(&mut self, name: &str) -> bool {
        let group = self
            .categories
            .iter_mut()
            .find(|category| category.name == name);
        match group.map(|category| &mut category.kind) {
            Some(CategoryNodeKind::Group { expanded, .. }) => {
                *expanded = !*expanded;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree() -> FileTree {
        serde_json::from_value(serde_json::json!({
            "images": [{ "id": 1, "name": "a.png" }],
            "documents": {
                "pdf": [{ "id": 2, "name": "r.pdf" }],
                "excel": [],
                "text": null
            },
            "others": []
        }))
        .expect("tree")
    }

    #[test]
    fn build_keeps_server_order_and_drops_empty_subfolders() {
        let view = FolderTreeView::build(&tree());
        let names: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["images", "documents", "others"]);

        let keys: Vec<String> = view
            .selectable_keys()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, vec!["images", "documents/pdf", "others"]);
        assert_eq!(view.placeholder(), None);
    }

    #[test]
    fn records_are_looked_up_by_key() {
        let view = FolderTreeView::build(&tree());
        let pdf = FolderKey::Subfolder {
            category: "documents".to_string(),
            subfolder: "pdf".to_string(),
        };
        assert_eq!(view.records_for(&pdf).map(<[Record]>::len), Some(1));
        assert_eq!(
            view.records_for(&FolderKey::Category("others".to_string()))
                .map(<[Record]>::len),
            Some(0)
        );
        assert!(view
            .records_for(&FolderKey::Category("documents".to_string()))
            .is_none());
    }

    #[test]
    fn empty_tree_shows_placeholder() {
        let view = FolderTreeView::build(&FileTree::default());
        assert_eq!(view.placeholder(), Some(EMPTY_TREE_PLACEHOLDER));
        assert!(view.selectable_keys().is_empty());
    }

    #[test]
    fn only_groups_toggle() {
        let mut view = FolderTreeView::build(&tree());
        assert!(view.toggle_group("documents"));
        assert!(matches!(
            view.categories[1].kind,
            CategoryNodeKind::Group { expanded: false, .. }
        ));
        assert!(!view.toggle_group("images"));
        assert!(!view.toggle_group("missing"));
    }

    #[test]
    fn at_most_one_node_is_active() {
        let view = FolderTreeView::build(&tree());
        for key in view.selectable_keys() {
            let selection = SelectionKey::Folder(key.clone());
            assert_eq!(view.active_keys(&selection), vec![key]);
        }
        let search = SelectionKey::Search {
            query: "a".to_string(),
        };
        assert!(view.active_keys(&search).is_empty());
        assert!(view.active_keys(&SelectionKey::None).is_empty());
    }
}
