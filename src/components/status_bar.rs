use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: cursor position on the left, key hints on the right.
/// A transient message replaces the whole bar.
pub struct StatusBarWidget<'a> {
    selected: usize,
    total: usize,
    theme: &'a ThemeColors,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(selected: usize, total: usize, theme: &'a ThemeColors) -> Self {
        Self {
            selected,
            total,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(area, Style::default().bg(self.theme.status_bg));
        let width = area.width as usize;

        if let Some(msg) = self.message {
            let display = format!("{msg:<width$}");
            let line = Line::from(Span::styled(
                display,
                Style::default()
                    .fg(self.theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let position = if self.total == 0 {
            " 0/0".to_string()
        } else {
            format!(" {}/{}", self.selected + 1, self.total)
        };
        let hints = "↑↓ move  ←→ fold  ⏎ open  q quit ";

        let gap = width
            .saturating_sub(position.chars().count())
            .saturating_sub(hints.chars().count());
        let line = Line::from(vec![
            Span::styled(
                position,
                Style::default()
                    .fg(self.theme.status_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(gap)),
            Span::styled(hints, Style::default().fg(self.theme.dim_fg)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
