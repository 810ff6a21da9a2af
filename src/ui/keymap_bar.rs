//! Keymap help bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let keymap_text = if app.notice.is_some() {
        "Enter/Esc:dismiss"
    } else if app.file_browser_mode {
        "jk/↑↓:nav | Enter/l:select | h:parent | a:all files | .:hidden | Esc:back"
    } else {
        "Ctrl+S:submit | Ctrl+O:choose file | Ctrl+X:clear file | Ctrl+U:clear prompt | Ctrl+T:theme | Ctrl+Q:quit"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
