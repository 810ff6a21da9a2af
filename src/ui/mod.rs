//! User interface rendering.

pub mod formatters;

mod form;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::file_browser;
use crate::notice;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    form::draw_form(f, app, chunks[0], &colors);

    if app.file_browser_mode {
        let overlay = overlay_rect(chunks[0]);
        file_browser::ui::draw_file_browser(f, &mut app.file_browser, overlay, &colors);
    }

    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app, &colors);

    if let Some(ref notice) = app.notice {
        notice::ui::draw_notice(f, notice, &colors);
    }
}

/// Centered overlay covering most of the content area.
fn overlay_rect(area: Rect) -> Rect {
    let width = area.width - area.width / 5;
    let height = area.height - area.height / 5;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width: width.max(1),
        height: height.max(1),
    }
}
