//! File tree model for navigation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Sort key for tree children: directories sort before files, then by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChildKey {
    Dir(String),
    File(String),
}

/// Node in the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A directory with ordered children.
    Dir {
        name: String,
        children: BTreeMap<ChildKey, TreeNode>,
    },
    /// A reviewed file.
    Leaf { name: String, path: String },
}

/// A flattened tree entry for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    /// Display name (file or directory name).
    pub name: String,
    /// File path as loaded; empty for directories.
    pub path: String,
    /// Nesting depth (0 = top level).
    pub depth: usize,
    /// Whether this is a directory.
    pub is_dir: bool,
    /// Whether this is the currently selected file.
    pub selected: bool,
}

impl TreeNode {
    fn root() -> Self {
        TreeNode::Dir {
            name: String::new(),
            children: BTreeMap::new(),
        }
    }

    /// Build a tree from `(path, slash_path)` pairs.
    ///
    /// The slash path determines the position in the tree; the original path
    /// is kept on the leaf for selection.
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut root = TreeNode::root();
        for (path, slash_path) in paths {
            let parts: Vec<&str> = slash_path.split('/').collect();
            if let Some((file_name, dirs)) = parts.split_last() {
                let dirs: Vec<&str> = dirs.iter().copied().filter(|d| !d.is_empty()).collect();
                root.insert(&dirs, file_name, path);
            }
        }
        root
    }

    fn insert(&mut self, dirs: &[&str], file_name: &str, path: &str) {
        let TreeNode::Dir { children, .. } = self else {
            return;
        };

        match dirs.split_first() {
            None => {
                children.insert(
                    ChildKey::File(file_name.to_string()),
                    TreeNode::Leaf {
                        name: file_name.to_string(),
                        path: path.to_string(),
                    },
                );
            }
            Some((dir, rest)) => {
                children
                    .entry(ChildKey::Dir(dir.to_string()))
                    .or_insert_with(|| TreeNode::Dir {
                        name: dir.to_string(),
                        children: BTreeMap::new(),
                    })
                    .insert(rest, file_name, path);
            }
        }
    }

    /// Flatten the tree depth-first, directories first then by name.
    pub fn flatten(&self, selected_path: &str) -> Vec<TreeItem> {
        let mut items = Vec::new();
        if let TreeNode::Dir { children, .. } = self {
            for child in children.values() {
                child.flatten_into(0, selected_path, &mut items);
            }
        }
        items
    }

    fn flatten_into(&self, depth: usize, selected_path: &str, items: &mut Vec<TreeItem>) {
        match self {
            TreeNode::Dir { name, children } => {
                items.push(TreeItem {
                    name: name.clone(),
                    path: String::new(),
                    depth,
                    is_dir: true,
                    selected: false,
                });
                for child in children.values() {
                    child.flatten_into(depth + 1, selected_path, items);
                }
            }
            TreeNode::Leaf { name, path } => items.push(TreeItem {
                name: name.clone(),
                path: path.clone(),
                depth,
                is_dir: false,
                selected: path == selected_path,
            }),
        }
    }
}
