use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Kind of filesystem node.
///
/// Symlinks are classified by what they point at: a symlink to a directory
/// browses as a directory, a broken symlink as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A node in the directory tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// `None` = never listed; `Some(vec![])` = listed and empty.
    pub children: Option<Vec<TreeNode>>,
    pub expanded: bool,
    /// Message from the last failed listing attempt, shown inline on the row.
    pub list_error: Option<String>,
}

impl TreeNode {
    /// Create a new node for a filesystem path.
    pub fn new(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let kind = if path.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        Self {
            name,
            path: path.to_path_buf(),
            kind,
            children: None,
            expanded: false,
            list_error: None,
        }
    }

    /// Expand a directory node, listing its children on first expansion.
    ///
    /// Cached children are reused; collapsing and re-expanding does not
    /// re-read the filesystem. On a listing failure the node stays collapsed
    /// and the error is recorded for inline display. No-op on files.
    pub fn expand(&mut self) {
        if self.kind != NodeKind::Directory || self.expanded {
            return;
        }
        if self.children.is_none() {
            match list_children(&self.path) {
                Ok(children) => self.children = Some(children),
                Err(e) => {
                    self.list_error = Some(e.to_string());
                    return;
                }
            }
        }
        self.expanded = true;
        self.list_error = None;
    }

    /// Collapse a directory node. Children are retained in memory.
    pub fn collapse(&mut self) {
        if self.kind == NodeKind::Directory {
            self.expanded = false;
        }
    }
}

/// List a directory into child nodes, sorted directories-first and then
/// case-insensitively by name.
///
/// The result reflects a single `read_dir` call; entries that vanish between
/// listing and stat are kept as files.
fn list_children(path: &Path) -> io::Result<Vec<TreeNode>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        children.push(TreeNode::new(&entry.path()));
    }

    children.sort_by(|a, b| {
        (b.kind == NodeKind::Directory)
            .cmp(&(a.kind == NodeKind::Directory))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    Ok(children)
}

/// A flattened tree row, ready for rendering.
#[derive(Debug, Clone)]
pub struct FlatItem {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub depth: usize,
    pub expanded: bool,
    pub is_last_sibling: bool,
    /// Synthetic ".." row pointing at the parent of the effective root.
    pub is_parent_link: bool,
    pub list_error: Option<String>,
}

/// State for the tree view: the effective root's subtree plus cursor and
/// scroll position.
///
/// The effective root itself is rendered in the panel title; its children
/// appear at depth 0, preceded by a synthetic ".." row whenever the root has
/// a parent directory.
pub struct TreeState {
    pub root_path: PathBuf,
    children: Vec<TreeNode>,
    pub flat_items: Vec<FlatItem>,
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl TreeState {
    /// Create a new TreeState rooted at the given directory.
    ///
    /// Unlike in-loop expansion, a failure to list the starting directory is
    /// fatal: there would be nothing to display.
    pub fn new(path: &Path) -> Result<Self> {
        let children = list_children(path)?;
        let mut state = Self {
            root_path: path.to_path_buf(),
            children,
            flat_items: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
        };
        state.flatten();
        Ok(state)
    }

    /// Rebuild the flat row list from the tree.
    ///
    /// Pre-order walk including only nodes whose full ancestor chain is
    /// expanded. Idempotent and free of filesystem access. The selected
    /// index is clamped to the new row count.
    pub fn flatten(&mut self) {
        self.flat_items.clear();

        if let Some(parent) = self.root_path.parent() {
            self.flat_items.push(FlatItem {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                kind: NodeKind::Directory,
                depth: 0,
                expanded: false,
                is_last_sibling: false,
                is_parent_link: true,
                list_error: None,
            });
        }

        let total = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            Self::flatten_node(child, 0, i == total - 1, &mut self.flat_items);
        }

        if !self.flat_items.is_empty() && self.selected_index >= self.flat_items.len() {
            self.selected_index = self.flat_items.len() - 1;
        }
    }

    fn flatten_node(node: &TreeNode, depth: usize, is_last: bool, items: &mut Vec<FlatItem>) {
        items.push(FlatItem {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            depth,
            expanded: node.expanded,
            is_last_sibling: is_last,
            is_parent_link: false,
            list_error: node.list_error.clone(),
        });

        if node.expanded {
            if let Some(children) = &node.children {
                for (i, child) in children.iter().enumerate() {
                    Self::flatten_node(child, depth + 1, i == children.len() - 1, items);
                }
            }
        }
    }

    /// The currently selected row, if any.
    pub fn selected(&self) -> Option<&FlatItem> {
        self.flat_items.get(self.selected_index)
    }

    /// Expand the selected directory, or move into it if already expanded.
    ///
    /// On an already-expanded directory the cursor moves to its first child
    /// (no-op when the directory is empty). Files and the ".." row are
    /// ignored.
    pub fn expand_selected(&mut self) {
        let Some(selected) = self.selected() else {
            return;
        };
        if selected.is_parent_link || selected.kind != NodeKind::Directory {
            return;
        }

        if selected.expanded {
            let first_child_depth = selected.depth + 1;
            if let Some(next) = self.flat_items.get(self.selected_index + 1) {
                if next.depth == first_child_depth {
                    self.selected_index += 1;
                }
            }
            return;
        }

        let path = selected.path.clone();
        if let Some(node) = Self::find_node_mut(&mut self.children, &path) {
            node.expand();
            self.flatten();
        }
    }

    /// Collapse the selected directory, or jump to the parent row.
    ///
    /// On files and collapsed directories the cursor moves to the row of the
    /// containing directory; for depth-0 rows that is the effective root,
    /// which has no row, so the move is a no-op.
    pub fn collapse_selected(&mut self) {
        let Some(selected) = self.selected() else {
            return;
        };
        if selected.is_parent_link {
            return;
        }
        let path = selected.path.clone();

        if selected.kind == NodeKind::Directory && selected.expanded {
            if let Some(node) = Self::find_node_mut(&mut self.children, &path) {
                node.collapse();
                self.flatten();
            }
            return;
        }

        if let Some(parent) = path.parent() {
            let parent = parent.to_path_buf();
            if let Some(i) = self
                .flat_items
                .iter()
                .position(|item| !item.is_parent_link && item.path == parent)
            {
                self.selected_index = i;
            }
        }
    }

    /// Descend into the selected directory or ascend through the ".." row.
    ///
    /// Re-roots the tree, discarding all expansion state. On a listing
    /// failure the current tree is kept and the error is returned for
    /// display. Files are ignored.
    pub fn enter_selected(&mut self) -> io::Result<()> {
        let Some(selected) = self.selected() else {
            return Ok(());
        };
        if selected.kind != NodeKind::Directory {
            return Ok(());
        }
        let target = selected.path.clone();
        self.set_root(&target)
    }

    /// Re-root the tree at `path`, resetting cursor and scroll.
    ///
    /// The previous tree is only discarded once the new root lists
    /// successfully.
    pub fn set_root(&mut self, path: &Path) -> io::Result<()> {
        let children = list_children(path)?;
        self.root_path = path.to_path_buf();
        self.children = children;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.flatten();
        Ok(())
    }

    /// Find a mutable reference to a node by path.
    fn find_node_mut<'a>(nodes: &'a mut [TreeNode], target: &Path) -> Option<&'a mut TreeNode> {
        for node in nodes {
            if node.path == target {
                return Some(node);
            }
            if let Some(children) = &mut node.children {
                if let Some(found) = Self::find_node_mut(children, target) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Update the scroll offset to keep the selected row visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }
}
