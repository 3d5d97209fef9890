use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::tree::{FlatItem, NodeKind, TreeState};
use crate::theme::ThemeColors;

/// Tree widget that renders the directory tree with box-drawing characters.
pub struct TreeWidget<'a> {
    tree: &'a TreeState,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(tree: &'a TreeState, theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            tree,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Build the indentation prefix for a row using box-drawing characters.
    ///
    /// Continuation lines (`│`) are drawn for every ancestor level that has
    /// further siblings below; the ancestor chain is recovered by walking
    /// backwards through the flat list.
    fn build_prefix(item: &FlatItem, items: &[FlatItem], item_index: usize) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for d in 0..item.depth {
            let mut ancestor_is_last = false;
            for j in (0..item_index).rev() {
                if items[j].depth == d {
                    ancestor_is_last = items[j].is_last_sibling;
                    break;
                }
                if items[j].depth < d {
                    break;
                }
            }
            if ancestor_is_last {
                parts.push("   ");
            } else {
                parts.push("│  ");
            }
        }

        if item.is_last_sibling {
            parts.push("└── ");
        } else {
            parts.push("├── ");
        }

        parts.join("")
    }

    /// Get the row indicator for a flat item.
    fn item_indicator(&self, item: &FlatItem) -> &'static str {
        if self.use_icons {
            if item.is_parent_link {
                "▴ "
            } else {
                match item.kind {
                    NodeKind::Directory if item.expanded => "▾ ",
                    NodeKind::Directory => "▸ ",
                    NodeKind::File => "· ",
                }
            }
        } else if item.is_parent_link {
            "[^] "
        } else {
            match item.kind {
                NodeKind::Directory if item.expanded => "[-] ",
                NodeKind::Directory => "[+] ",
                NodeKind::File => "[F] ",
            }
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let items = &self.tree.flat_items;
        let selected = self.tree.selected_index;
        let visible_height = inner_area.height as usize;

        if items.is_empty() || visible_height == 0 {
            return;
        }

        let scroll = self.tree.scroll_offset;
        let visible_items = items.iter().enumerate().skip(scroll).take(visible_height);

        for (i, (idx, item)) in visible_items.enumerate() {
            let y = inner_area.y + i as u16;

            let prefix = Self::build_prefix(item, items, idx);
            let indicator = self.item_indicator(item);

            let is_selected = idx == selected;
            let style = if is_selected {
                Style::default()
                    .bg(self.theme.tree_selected_bg)
                    .fg(self.theme.tree_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else if item.is_parent_link {
                Style::default().fg(self.theme.dim_fg)
            } else {
                match item.kind {
                    NodeKind::Directory => Style::default()
                        .fg(self.theme.tree_dir_fg)
                        .add_modifier(Modifier::BOLD),
                    NodeKind::File => Style::default().fg(self.theme.tree_file_fg),
                }
            };

            let prefix_style = if is_selected {
                style
            } else {
                Style::default().fg(self.theme.dim_fg)
            };

            let mut spans = vec![
                Span::styled(prefix, prefix_style),
                Span::styled(format!("{}{}", indicator, item.name), style),
            ];
            if let Some(err) = &item.list_error {
                spans.push(Span::styled(
                    format!(" [{err}]"),
                    Style::default().fg(self.theme.error_fg),
                ));
            }

            let line = Line::from(spans);
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn item(name: &str, depth: usize, is_last: bool, kind: NodeKind) -> FlatItem {
        FlatItem {
            name: name.to_string(),
            path: PathBuf::from(name),
            kind,
            depth,
            expanded: false,
            is_last_sibling: is_last,
            is_parent_link: false,
            list_error: None,
        }
    }

    #[test]
    fn prefix_top_level_rows_have_bare_connectors() {
        let items = vec![
            item("alpha", 0, false, NodeKind::Directory),
            item("omega", 0, true, NodeKind::File),
        ];
        assert_eq!(TreeWidget::build_prefix(&items[0], &items, 0), "├── ");
        assert_eq!(TreeWidget::build_prefix(&items[1], &items, 1), "└── ");
    }

    #[test]
    fn prefix_nested_row_continues_parent_line() {
        // alpha (not last) > inner; beta follows, so alpha's line continues
        let items = vec![
            item("alpha", 0, false, NodeKind::Directory),
            item("inner", 1, true, NodeKind::File),
            item("beta", 0, true, NodeKind::Directory),
        ];
        assert_eq!(TreeWidget::build_prefix(&items[1], &items, 1), "│  └── ");
    }

    #[test]
    fn prefix_nested_under_last_sibling_uses_blank() {
        let items = vec![
            item("alpha", 0, true, NodeKind::Directory),
            item("inner", 1, true, NodeKind::File),
        ];
        assert_eq!(TreeWidget::build_prefix(&items[1], &items, 1), "   └── ");
    }
}
