//! Prompt composer UI rendering.

use super::ComposerState;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Placeholder shown while the prompt is empty.
const PLACEHOLDER: &str = "What do you want to plot today?";

/// Draw the prompt composer.
///
/// When `focused`, the terminal cursor is placed at the editing position and
/// the view scrolls to keep it visible.
pub fn draw_composer(
    f: &mut Frame<'_>,
    state: &ComposerState,
    area: Rect,
    focused: bool,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .title(" Prompt ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if state.is_empty() {
        let placeholder = Paragraph::new(PLACEHOLDER).style(
            Style::default()
                .fg(colors.border)
                .add_modifier(Modifier::ITALIC),
        );
        f.render_widget(placeholder, inner);
        if focused {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let lines: Vec<Line<'_>> = state
        .lines()
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let (row, _) = state.cursor();
    let v_scroll = row.saturating_sub(inner.height as usize - 1) as u16;
    let cursor_width = state.cursor_prefix().width() as u16;
    let h_scroll = cursor_width.saturating_sub(inner.width - 1);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(colors.text))
        .scroll((v_scroll, h_scroll));
    f.render_widget(paragraph, inner);

    if focused {
        f.set_cursor_position((
            inner.x + cursor_width - h_scroll,
            inner.y + row as u16 - v_scroll,
        ));
    }
}
