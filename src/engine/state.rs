//! Engine state and its synchronous transitions.
//!
//! Nothing in here spawns tasks or touches timers; [`super::FeedEngine`] wraps
//! these transitions with the generator subscription and detail fetch tasks.

use super::events::EngineError;
use crate::content::DetailState;
use crate::feed::{Category, CategoryFilter, ItemId, RawItem};
use crate::util::format_relative_time;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Detail state for ids the engine has never seen.
static NOT_FETCHED: DetailState = DetailState::NotFetched;

// ============================================================================
// Projections
// ============================================================================

/// Read-only projection of a [`RawItem`] for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: ItemId,
    pub title: Arc<str>,
    pub category: Category,
    pub relative_time_label: String,
}

impl DisplayItem {
    pub fn from_raw(item: &RawItem, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id,
            title: Arc::clone(&item.title),
            category: item.category,
            relative_time_label: format_relative_time(item.created_at, now),
        }
    }
}

/// Running counters for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Items handed to `ingest`, kept or not.
    pub received: u64,
    /// Items dropped because they did not match the selected category.
    pub filtered_out: u64,
    /// Items discarded because they came from a cancelled subscription.
    pub stale_discarded: u64,
    /// Detail fetches started.
    pub detail_fetches: u64,
    /// Items evicted by the retention cap.
    pub evicted: u64,
}

/// Everything a renderer needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub category: CategoryFilter,
    pub read_count: u64,
    /// Newest first.
    pub items: Vec<DisplayItem>,
    pub expanded: HashSet<ItemId>,
    pub details: HashMap<ItemId, DetailState>,
    pub stats: EngineStats,
}

impl EngineSnapshot {
    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn detail(&self, id: ItemId) -> &DetailState {
        self.details.get(&id).unwrap_or(&NOT_FETCHED)
    }
}

/// What `toggle_expand` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Collapsed,
    /// The item was expanded; `fetch_started` is true if it moved to `Loading`.
    Expanded { fetch_started: bool },
}

// ============================================================================
// Engine State
// ============================================================================

/// Filter, ordered item list, detail cache, expanded set and read counter.
#[derive(Debug, Default)]
pub struct EngineState {
    selected_category: CategoryFilter,
    read_count: u64,
    /// Newest first.
    items: VecDeque<RawItem>,
    detail_states: HashMap<ItemId, DetailState>,
    expanded: HashSet<ItemId>,
    /// 0 = unlimited.
    max_items: usize,
    stats: EngineStats,
}

impl EngineState {
    pub fn new(category: CategoryFilter, max_items: usize) -> Self {
        Self {
            selected_category: category,
            max_items,
            ..Default::default()
        }
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category
    }

    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn detail_state(&self, id: ItemId) -> &DetailState {
        self.detail_states.get(&id).unwrap_or(&NOT_FETCHED)
    }

    /// Select a new filter: empties the list and the expanded set.
    ///
    /// Detail states survive so a fetch still in flight lands in the cache.
    pub fn reset_for(&mut self, category: CategoryFilter) {
        self.selected_category = category;
        self.items.clear();
        self.expanded.clear();
    }

    /// Insert `item` at the head if it passes the filter. Returns true if kept.
    pub fn ingest(&mut self, item: RawItem) -> bool {
        self.stats.received += 1;

        if !self.selected_category.matches(item.category) {
            self.stats.filtered_out += 1;
            return false;
        }

        self.items.push_front(item);
        self.enforce_retention();
        true
    }

    pub(super) fn record_stale(&mut self) {
        self.stats.stale_discarded += 1;
    }

    /// Collapse an expanded item, or expand it and count a read.
    ///
    /// Expanding an item whose detail still needs fetching moves it to
    /// `Loading`; the caller is responsible for starting the fetch when
    /// `fetch_started` is true.
    pub fn toggle_expand(&mut self, id: ItemId) -> Result<ToggleOutcome, EngineError> {
        if !self.contains(id) {
            return Err(EngineError::UnknownItem(id));
        }

        if self.expanded.remove(&id) {
            return Ok(ToggleOutcome::Collapsed);
        }

        self.expanded.insert(id);
        self.read_count += 1;

        let fetch_started = self.detail_state(id).needs_fetch();
        if fetch_started {
            self.detail_states.insert(id, DetailState::Loading);
            self.stats.detail_fetches += 1;
        }

        Ok(ToggleOutcome::Expanded { fetch_started })
    }

    /// Record the outcome of a detail fetch.
    ///
    /// Only a `Loading` entry is updated, so a late or duplicate completion can
    /// never overwrite a loaded body. Results for items no longer displayed are
    /// still cached.
    pub fn complete_fetch(&mut self, id: ItemId, result: Result<String, String>) {
        match self.detail_states.get_mut(&id) {
            Some(state @ DetailState::Loading) => {
                *state = match result {
                    Ok(text) => DetailState::Loaded(text),
                    Err(reason) => DetailState::Failed(reason),
                };
            }
            Some(other) => {
                tracing::debug!(id, state = ?other, "Ignoring detail result for non-loading item");
            }
            None => {
                tracing::debug!(id, "Ignoring detail result for evicted item");
            }
        }
    }

    /// Capture the renderer-facing view with relative labels computed at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> EngineSnapshot {
        EngineSnapshot {
            category: self.selected_category,
            read_count: self.read_count,
            items: self
                .items
                .iter()
                .map(|item| DisplayItem::from_raw(item, now))
                .collect(),
            expanded: self.expanded.clone(),
            details: self.detail_states.clone(),
            stats: self.stats,
        }
    }

    fn enforce_retention(&mut self) {
        if self.max_items == 0 {
            return;
        }

        while self.items.len() > self.max_items {
            let Some(oldest) = self.items.pop_back() else {
                break;
            };
            self.expanded.remove(&oldest.id);
            // A loading entry is left so its completion still has a home.
            if !self.detail_state(oldest.id).is_loading() {
                self.detail_states.remove(&oldest.id);
            }
            self.stats.evicted += 1;
            tracing::debug!(id = oldest.id, "Evicted item over retention cap");
        }
    }
}
