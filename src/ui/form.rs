//! Main form screen rendering.

use crate::app::App;
use crate::composer;
use crate::ui::{formatters, ThemeColors};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the upload form: title, prompt composer, data file line and hints.
pub(super) fn draw_form(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    // Fill the whole content area so the centered column sits on the theme
    // background
    f.render_widget(
        Block::default().style(Style::default().bg(colors.bg)),
        area,
    );

    let column = centered_column(area, 72);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(column);

    let title = Paragraph::new("Plot Pilot")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, chunks[1]);

    let tagline = Paragraph::new("Your AI-powered data visualization assistant")
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.label));
    f.render_widget(tagline, chunks[2]);

    let composer_focused = !app.file_browser_mode && app.notice.is_none();
    composer::ui::draw_composer(f, &app.composer, chunks[4], composer_focused, colors);

    draw_file_line(f, app, chunks[5], colors);
    draw_hints(f, app, chunks[6], colors);
}

fn draw_file_line(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let line = match &app.attachment {
        Some(attachment) => Line::from(vec![
            Span::styled(
                attachment.file_name.clone(),
                Style::default().fg(colors.value),
            ),
            Span::styled(
                format!(
                    " ({}, {})",
                    formatters::format_size(attachment.size()),
                    attachment.content_type
                ),
                Style::default().fg(colors.label),
            ),
        ]),
        None => Line::from(Span::styled(
            "No file selected — press Ctrl+O to choose",
            Style::default().fg(colors.border),
        )),
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(" Select your data ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(paragraph, area);
}

fn draw_hints(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(""),
        Line::from("Type your plotting request above, attach a data file, then Ctrl+S."),
        Line::from(""),
        Line::from(format!("Endpoint: {}", app.endpoint())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.border));

    f.render_widget(paragraph, area);
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = max_width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}
