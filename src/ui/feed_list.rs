use crate::app::App;
use campusfeed::content::DetailState;
use campusfeed::engine::DisplayItem;
use campusfeed::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the feed card list, or a waiting placeholder when it is empty.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.panel_border)
        .title(format!(" {} ", app.snapshot.category));

    if app.snapshot.items.is_empty() {
        let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
        let placeholder = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("{} Fetching latest news…", spinner),
                app.palette.empty_state,
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // Borders plus a two-column indent for card bodies.
    let inner_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .snapshot
        .items
        .iter()
        .map(|item| ListItem::new(card_lines(app, item, inner_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.palette.card_selected);

    let mut state = ListState::default().with_selected(app.selected_index());
    f.render_stateful_widget(list, area, &mut state);
}

/// Lines for a single card: meta row, title, optional detail, spacer.
fn card_lines(app: &App, item: &DisplayItem, width: usize) -> Vec<Line<'static>> {
    let palette = &app.palette;
    let accent = Style::default().fg(palette.category_accent(item.category));
    let expanded = app.snapshot.is_expanded(item.id);

    let marker = if expanded { "▾ " } else { "▸ " };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker, accent),
            Span::styled(item.category.label(), accent),
            Span::styled(format!("  #{}  {}", item.id, item.relative_time_label), palette.card_meta),
        ]),
        Line::from(Span::styled(
            format!("  {}", truncate_to_width(&item.title, width)),
            palette.card_title,
        )),
    ];

    if expanded {
        match app.snapshot.detail(item.id) {
            DetailState::Loading => {
                let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
                lines.push(Line::from(Span::styled(
                    format!("  {} Loading details...", spinner),
                    palette.card_loading,
                )));
            }
            DetailState::Loaded(text) => {
                for row in wrap_text(text, width) {
                    lines.push(Line::from(Span::styled(format!("  {}", row), palette.card_detail)));
                }
            }
            DetailState::Failed(reason) => {
                lines.push(Line::from(Span::styled(
                    format!("  Could not load details: {}", reason),
                    palette.card_error,
                )));
            }
            DetailState::NotFetched => {}
        }
    }

    lines.push(Line::raw(""));
    lines
}

/// Greedy word wrap to `width` display columns. Words wider than a line are
/// truncated rather than split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        if current_width > 0 && current_width + 1 + word_width > width {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        let word = truncate_to_width(word, width);
        current_width += display_width(&word);
        current.push_str(&word);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let text = "Article #3 covers the latest developments affecting the campus community";
        let rows = wrap_text(text, 20);
        assert!(rows.len() > 1);
        for row in &rows {
            assert!(display_width(row) <= 20, "row too wide: {:?}", row);
        }
        assert_eq!(rows.join(" "), text);
    }

    #[test]
    fn test_wrap_short_text_single_row() {
        assert_eq!(wrap_text("just now", 40), vec!["just now".to_string()]);
    }

    #[test]
    fn test_wrap_zero_width_is_empty() {
        assert!(wrap_text("anything", 0).is_empty());
    }

    #[test]
    fn test_wrap_truncates_overlong_word() {
        let rows = wrap_text("supercalifragilistic", 8);
        assert_eq!(rows, vec!["super...".to_string()]);
    }
}
