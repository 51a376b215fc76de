use crate::app::App;
use campusfeed::feed::CategoryFilter;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the app title with the read counter badge on the right.
pub fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;

    let title = Paragraph::new(vec![
        Line::from(Span::styled("Campus News", palette.header_title)),
        Line::from(Span::styled("News Feed Simulator", palette.header_subtitle)),
    ]);
    f.render_widget(title, area);

    let badge = Paragraph::new(Line::from(Span::styled(
        format!("● Read: {} ", app.snapshot.read_count),
        palette.read_badge,
    )))
    .alignment(Alignment::Right);
    f.render_widget(badge, area);
}

/// Render the category tabs. The selected tab is filled with its accent color.
pub fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let palette = &app.palette;
    let selected = app.snapshot.category;

    let mut spans = Vec::with_capacity(CategoryFilter::TABS.len() * 2);
    for (i, tab) in CategoryFilter::TABS.iter().enumerate() {
        let style = if *tab == selected {
            palette.tab_active(*tab)
        } else {
            palette.tab_inactive.fg(palette.filter_accent(*tab))
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
