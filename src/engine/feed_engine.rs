use super::events::{EngineError, EngineEvent};
use super::state::{DisplayItem, EngineSnapshot, EngineState, EngineStats, ToggleOutcome};
use super::tasks::{spawn_detail_fetch, spawn_generator};
use crate::content::{DetailState, DEFAULT_DETAIL_DELAY};
use crate::feed::{CategoryFilter, FeedGenerator, GeneratorHandle, IdSequence, ItemId, RawItem};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Tunables for a [`FeedEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Generator emission period.
    pub tick_interval: Duration,
    /// Simulated detail fetch latency.
    pub detail_delay: Duration,
    /// Retention cap for the displayed list (0 = unlimited).
    pub max_items: usize,
    /// Filter selected by [`FeedEngine::start`].
    pub initial_category: CategoryFilter,
    /// Keep one id counter across category switches. When false every
    /// subscription numbers its items from 1 again.
    pub continuous_ids: bool,
    /// Seed for category selection. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval: FeedGenerator::DEFAULT_PERIOD,
            detail_delay: DEFAULT_DETAIL_DELAY,
            max_items: 0,
            initial_category: CategoryFilter::All,
            continuous_ids: true,
            seed: None,
        }
    }
}

/// The stateful core of the feed: filter, ordered list, detail cache and
/// read counter.
///
/// All mutation goes through `&mut self`. Background work (generator ticks and
/// detail fetches) reports back as [`EngineEvent`]s on the channel passed to
/// [`FeedEngine::new`]; the owner drains the receiver and calls
/// [`FeedEngine::handle_event`]. Renderers either poll [`FeedEngine::snapshot`]
/// or watch [`FeedEngine::subscribe`].
pub struct FeedEngine {
    settings: EngineSettings,
    state: EngineState,
    event_tx: mpsc::Sender<EngineEvent>,
    generator: Option<GeneratorHandle>,
    /// Bumped on every subscription; ticks tagged with an older value are stale.
    generation: u64,
    sequence: IdSequence,
    rng: StdRng,
    snapshot_tx: watch::Sender<EngineSnapshot>,
}

impl FeedEngine {
    /// Create an idle engine. Call [`FeedEngine::start`] to begin generating.
    pub fn new(settings: EngineSettings, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        let state = EngineState::new(settings.initial_category, settings.max_items);
        let (snapshot_tx, _) = watch::channel(state.snapshot(Utc::now()));
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            settings,
            state,
            event_tx,
            generator: None,
            generation: 0,
            sequence: IdSequence::new(),
            rng,
            snapshot_tx,
        }
    }

    /// Subscribe to the configured initial category.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.set_category(self.settings.initial_category);
    }

    /// Switch the filter.
    ///
    /// Cancels the running generator, empties the list and the expanded set,
    /// then starts a fresh generator. The list stays empty until its first tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if let Some(handle) = self.generator.take() {
            handle.cancel();
            tracing::debug!(generation = self.generation, "Cancelled previous generator");
        }

        self.state.reset_for(category);
        self.generation = self.generation.wrapping_add(1);

        let sequence = if self.settings.continuous_ids {
            self.sequence.clone()
        } else {
            IdSequence::new()
        };
        let generator = FeedGenerator::with_sequence(self.settings.tick_interval, sequence)
            .with_rng(StdRng::seed_from_u64(self.rng.gen()));

        self.generator = Some(spawn_generator(
            generator,
            self.generation,
            self.event_tx.clone(),
        ));

        tracing::info!(%category, generation = self.generation, "Subscribed to feed");
        self.publish();
    }

    /// Add an item to the head of the list if it passes the current filter.
    pub fn ingest(&mut self, item: RawItem) -> bool {
        let id = item.id;
        let category = item.category;
        let kept = self.state.ingest(item);
        tracing::debug!(id, %category, kept, "Ingested item");
        self.publish();
        kept
    }

    /// Expand or collapse an item.
    ///
    /// Every expand transition counts as a read; collapsing never does.
    /// Expanding an item with no cached detail starts one background fetch.
    /// Ids not in the displayed list are rejected without touching state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle_expand(&mut self, id: ItemId) -> Result<ToggleOutcome, EngineError> {
        let outcome = self.state.toggle_expand(id)?;

        if let ToggleOutcome::Expanded {
            fetch_started: true,
        } = outcome
        {
            spawn_detail_fetch(id, self.settings.detail_delay, self.event_tx.clone());
        }

        tracing::debug!(id, ?outcome, read_count = self.state.read_count(), "Toggled item");
        self.publish();
        Ok(outcome)
    }

    /// Apply an event produced by a background task.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::ItemGenerated { generation, item } => {
                if generation != self.generation {
                    tracing::debug!(
                        id = item.id,
                        generation,
                        current = self.generation,
                        "Discarding item from cancelled subscription"
                    );
                    self.state.record_stale();
                    return;
                }
                self.ingest(item);
            }
            EngineEvent::DetailLoaded { id, result } => {
                if let Err(ref error) = result {
                    tracing::warn!(id, error = %error, "Detail fetch failed");
                }
                self.state.complete_fetch(id, result);
                self.publish();
            }
        }
    }

    pub fn category(&self) -> CategoryFilter {
        self.state.selected_category()
    }

    pub fn read_count(&self) -> u64 {
        self.state.read_count()
    }

    pub fn stats(&self) -> EngineStats {
        self.state.stats()
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.state.is_expanded(id)
    }

    pub fn detail_state(&self, id: ItemId) -> &DetailState {
        self.state.detail_state(id)
    }

    /// Displayed items, newest first, with labels relative to now.
    pub fn items(&self) -> Vec<DisplayItem> {
        self.snapshot().items
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.state.snapshot(Utc::now())
    }

    /// Watch the engine. A new snapshot is published after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        // Publishing is skipped while unobserved, so refresh before handing out.
        self.snapshot_tx.send_replace(self.snapshot());
        self.snapshot_tx.subscribe()
    }

    /// Stop the generator. In-flight detail fetches still complete.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.generator.take() {
            handle.cancel();
            tracing::info!("Feed generator stopped");
        }
    }

    fn publish(&self) {
        // Skip the snapshot clone when nobody is watching.
        if self.snapshot_tx.receiver_count() > 0 {
            self.snapshot_tx.send_replace(self.snapshot());
        }
    }
}

impl Drop for FeedEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
