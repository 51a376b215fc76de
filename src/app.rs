use campusfeed::engine::{EngineError, EngineEvent, EngineSnapshot, FeedEngine, ToggleOutcome};
use campusfeed::feed::{CategoryFilter, ItemId};
use campusfeed::theme::{ColorPalette, ThemeVariant};
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Number of frames in the loading spinner animation.
pub const SPINNER_FRAMES: usize = 10;

/// Terminal renderer state wrapped around the engine.
///
/// The renderer never mutates engine state directly: commands go through
/// `engine`, and what is drawn comes from `snapshot`, refreshed after every
/// command or event.
pub struct App {
    pub engine: FeedEngine,
    pub snapshot: EngineSnapshot,
    /// Selected item, tracked by id so it stays put as new items arrive at the head.
    pub selected_id: Option<ItemId>,
    pub theme: ThemeVariant,
    pub palette: ColorPalette,
    pub spinner_frame: usize,
    pub needs_redraw: bool,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(engine: FeedEngine, theme: ThemeVariant) -> Self {
        let snapshot = engine.snapshot();
        Self {
            engine,
            snapshot,
            selected_id: None,
            theme,
            palette: theme.palette(),
            spinner_frame: 0,
            needs_redraw: true,
            status_message: None,
        }
    }

    /// Pull a fresh snapshot from the engine and repair the selection.
    pub fn refresh(&mut self) {
        self.snapshot = self.engine.snapshot();
        let still_present = self
            .selected_id
            .is_some_and(|id| self.snapshot.items.iter().any(|item| item.id == id));
        if !still_present {
            self.selected_id = self.snapshot.items.first().map(|item| item.id);
        }
        self.needs_redraw = true;
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        self.engine.handle_event(event);
        self.refresh();
    }

    /// Index of the selected item in the snapshot.
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id?;
        self.snapshot.items.iter().position(|item| item.id == id)
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.snapshot.items.len();
        if len == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.selected_id = Some(self.snapshot.items[next].id);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if category == self.snapshot.category {
            return;
        }
        self.engine.set_category(category);
        self.selected_id = None;
        self.refresh();
    }

    /// Expand or collapse the selected item.
    pub fn toggle_selected(&mut self) -> Result<(), EngineError> {
        let Some(id) = self.selected_id else {
            return Ok(());
        };
        let outcome = self.engine.toggle_expand(id)?;
        if let ToggleOutcome::Expanded {
            fetch_started: true,
        } = outcome
        {
            self.set_status(format!("Loading details for #{}...", id));
        }
        self.refresh();
        Ok(())
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.palette = self.theme.palette();
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    /// True while any displayed item is waiting on its detail.
    pub fn has_loading(&self) -> bool {
        self.snapshot
            .items
            .iter()
            .any(|item| self.snapshot.detail(item.id).is_loading())
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
        self.needs_redraw = true;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once it has expired. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusfeed::engine::EngineSettings;
    use campusfeed::feed::{Category, RawItem};
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel(32);
        let settings = EngineSettings {
            seed: Some(1),
            ..Default::default()
        };
        let mut engine = FeedEngine::new(settings, tx);
        engine.start();
        (App::new(engine, ThemeVariant::Dark), rx)
    }

    fn raw(id: ItemId, category: Category) -> RawItem {
        RawItem {
            id,
            title: Arc::from(format!("Headline {}", id)),
            category,
            created_at: Utc::now(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_follows_item_as_new_ones_arrive() {
        let (mut app, _rx) = test_app();
        app.engine.ingest(raw(1, Category::Tech));
        app.refresh();
        assert_eq!(app.selected_id, Some(1));

        app.engine.ingest(raw(2, Category::Tech));
        app.refresh();
        assert_eq!(app.selected_id, Some(1));
        assert_eq!(app.selected_index(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_clamps_at_edges() {
        let (mut app, _rx) = test_app();
        for id in 1..=3 {
            app.engine.ingest(raw(id, Category::Campus));
        }
        app.refresh();
        assert_eq!(app.selected_id, Some(3));

        app.select_prev();
        assert_eq!(app.selected_id, Some(3));
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_id, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_selected_counts_read() {
        let (mut app, _rx) = test_app();
        app.engine.ingest(raw(1, Category::Sports));
        app.refresh();

        app.toggle_selected().unwrap();
        assert_eq!(app.snapshot.read_count, 1);
        assert!(app.snapshot.is_expanded(1));
        assert!(app.has_loading());
        assert!(app.status_message.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_with_empty_feed_is_noop() {
        let (mut app, _rx) = test_app();
        assert!(app.toggle_selected().is_ok());
        assert_eq!(app.snapshot.read_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_category_clears_selection() {
        let (mut app, _rx) = test_app();
        app.engine.ingest(raw(1, Category::Tech));
        app.refresh();

        app.set_category(CategoryFilter::Campus);
        assert!(app.snapshot.items.is_empty());
        assert_eq!(app.selected_id, None);
        assert_eq!(app.snapshot.category, CategoryFilter::Campus);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires() {
        let (mut app, _rx) = test_app();
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        tokio::time::advance(STATUS_TTL).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_theme_updates_palette() {
        let (mut app, _rx) = test_app();
        app.cycle_theme();
        assert_eq!(app.theme, ThemeVariant::Light);
        assert_eq!(
            app.palette.status_bar,
            ThemeVariant::Light.palette().status_bar
        );
    }
}
