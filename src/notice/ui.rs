//! Notice overlay rendering.

use super::{Notice, NoticeLevel};
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the notice as a centered modal overlay.
pub fn draw_notice(f: &mut Frame<'_>, notice: &Notice, colors: &ThemeColors) {
    let area = centered_box(f.area(), 46, 7);
    f.render_widget(Clear, area);

    let (title, accent) = match notice.level {
        NoticeLevel::Info => (" Plot Pilot ", colors.success),
        NoticeLevel::Error => (" Plot Pilot ", colors.error),
    };

    let lines = vec![
        Line::from(""),
        Line::from(notice.message.clone()).style(
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Enter to dismiss").style(Style::default().fg(colors.border)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(colors.bg)),
        );

    f.render_widget(paragraph, area);
}

fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
