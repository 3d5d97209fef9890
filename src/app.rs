use std::path::Path;

use crate::error::Result;
use crate::fs::tree::TreeState;
use crate::theme::ThemeColors;

/// Main application state.
pub struct App {
    pub tree: TreeState,
    pub theme: ThemeColors,
    pub use_icons: bool,
    pub should_quit: bool,
    /// Transient message shown in the status bar (re-root failures).
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App rooted at the given directory.
    pub fn new(path: &Path, theme: ThemeColors, use_icons: bool) -> Result<Self> {
        let tree = TreeState::new(path)?;
        Ok(Self {
            tree,
            theme,
            use_icons,
            should_quit: false,
            status_message: None,
        })
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move selection down by one row. No wraparound.
    pub fn select_next(&mut self) {
        let len = self.tree.flat_items.len();
        if len > 0 && self.tree.selected_index < len - 1 {
            self.tree.selected_index += 1;
        }
    }

    /// Move selection up by one row. No wraparound.
    pub fn select_previous(&mut self) {
        if self.tree.selected_index > 0 {
            self.tree.selected_index -= 1;
        }
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.tree.selected_index = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        let len = self.tree.flat_items.len();
        if len > 0 {
            self.tree.selected_index = len - 1;
        }
    }

    /// Expand the selected directory, or step into it if already expanded.
    pub fn expand_selected(&mut self) {
        self.tree.expand_selected();
    }

    /// Collapse the selected directory, or jump to its parent row.
    pub fn collapse_selected(&mut self) {
        self.tree.collapse_selected();
    }

    /// Descend into the selected directory (or ascend via the ".." row).
    ///
    /// A failed re-root keeps the current tree and reports through the
    /// status bar.
    pub fn enter_selected(&mut self) {
        if let Err(e) = self.tree.enter_selected() {
            self.status_message = Some(format!("cannot open directory: {e}"));
        }
    }
}
