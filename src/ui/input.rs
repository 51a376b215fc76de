//! Keyboard input handling.

use crate::app::App;
use campusfeed::feed::CategoryFilter;
use crossterm::event::{KeyCode, KeyModifiers};

use super::loop_runner::Action;

/// Map a key press to an app command.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,

        (KeyCode::Tab, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
            app.set_category(app.snapshot.category.next());
        }
        (KeyCode::BackTab, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
            app.set_category(app.snapshot.category.prev());
        }
        (KeyCode::Char(c @ '1'..='4'), _) => {
            let index = c as usize - '1' as usize;
            app.set_category(CategoryFilter::TABS[index]);
        }

        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),

        (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
            if let Err(e) = app.toggle_selected() {
                app.set_status(format!("Error: {}", e));
            }
        }

        (KeyCode::Char('t'), _) => app.cycle_theme(),

        _ => {}
    }

    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusfeed::engine::{EngineSettings, FeedEngine};
    use campusfeed::theme::ThemeVariant;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(32);
        let mut engine = FeedEngine::new(EngineSettings::default(), tx);
        engine.start();
        App::new(engine, ThemeVariant::Dark)
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys() {
        let mut app = test_app();
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE),
            Action::Quit
        ));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_cycles_category() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.snapshot.category, CategoryFilter::Tech);
        handle_input(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.snapshot.category, CategoryFilter::All);
    }

    #[tokio::test(start_paused = true)]
    async fn test_number_keys_select_category() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('4'), KeyModifiers::NONE);
        assert_eq!(app.snapshot.category, CategoryFilter::Sports);
        handle_input(&mut app, KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(app.snapshot.category, CategoryFilter::All);
    }

    #[tokio::test(start_paused = true)]
    async fn test_theme_key_toggles_theme() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(app.theme, ThemeVariant::Light);
    }
}
