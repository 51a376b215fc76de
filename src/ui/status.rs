use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_str())
    } else {
        Cow::Borrowed("[Tab/1-4]category [j/k]move [Enter]expand [t]heme [q]uit")
    };

    f.render_widget(Paragraph::new(text).style(app.palette.status_bar), area);
}
