use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;

/// Render the application UI: bordered tree panel plus a one-line status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [tree_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    // Keep the selected row inside the window before painting.
    let visible_height = tree_area.height.saturating_sub(2) as usize;
    app.tree.update_scroll(visible_height);

    let block = Block::default()
        .title(format!(" {} ", app.tree.root_path.display()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_fg));

    let tree_widget = TreeWidget::new(&app.tree, &app.theme, app.use_icons).block(block);
    frame.render_widget(tree_widget, tree_area);

    let status = StatusBarWidget::new(
        app.tree.selected_index,
        app.tree.flat_items.len(),
        &app.theme,
    )
    .message(app.status_message.as_deref());
    frame.render_widget(status, status_area);
}
