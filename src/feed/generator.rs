use super::titles::title_for;
use super::types::{Category, ItemId, RawItem};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Smallest period the generator accepts. `tokio::time::interval` panics on zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

// ============================================================================
// Id Sequence
// ============================================================================

/// Monotonic id counter, cheap to clone and shared across generators.
///
/// A fresh sequence issues 1, 2, 3, ... Generators built over the same
/// sequence never reuse an id, even when one is cancelled and another started.
#[derive(Debug, Clone, Default)]
pub struct IdSequence(Arc<AtomicU64>);

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next id.
    pub fn next_id(&self) -> ItemId {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The most recently issued id, or 0 if none has been issued.
    pub fn last_issued(&self) -> ItemId {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Time-driven producer of synthetic news items.
///
/// Each tick takes the next id from its [`IdSequence`], picks the title for
/// that id from the title bank and a uniformly random category.
pub struct FeedGenerator {
    period: Duration,
    sequence: IdSequence,
    rng: StdRng,
}

impl FeedGenerator {
    /// Default emission period.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

    /// Create a generator with its own id sequence starting at 1.
    pub fn new(period: Duration) -> Self {
        Self::with_sequence(period, IdSequence::new())
    }

    /// Create a generator that draws ids from a shared sequence.
    pub fn with_sequence(period: Duration, sequence: IdSequence) -> Self {
        Self {
            period,
            sequence,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the category RNG (seeded RNGs make category choice reproducible).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Produce the next item immediately, without waiting for a tick.
    pub fn next_item(&mut self) -> RawItem {
        let id = self.sequence.next_id();
        RawItem {
            id,
            title: Arc::from(title_for(id)),
            category: Category::random(&mut self.rng),
            created_at: Utc::now(),
        }
    }

    /// Start emitting items on a repeating timer.
    ///
    /// The first item is emitted immediately, then one per period. Each item is
    /// fully built before `on_item` sees it. Returning `ControlFlow::Break` from
    /// `on_item` stops the timer; so does cancelling or dropping the handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(mut self, mut on_item: F) -> GeneratorHandle
    where
        F: FnMut(RawItem) -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let period = self.period.max(MIN_PERIOD);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // A stalled consumer should delay the feed, not cause a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let item = self.next_item();
                tracing::debug!(id = item.id, category = %item.category, "Generated item");

                if on_item(item).await.is_break() {
                    tracing::debug!("Generator consumer closed, stopping");
                    break;
                }
            }
        });

        GeneratorHandle { task }
    }
}

/// Cancellation handle for a running generator. Dropping it also cancels.
#[derive(Debug)]
pub struct GeneratorHandle {
    task: JoinHandle<()>,
}

impl GeneratorHandle {
    /// Stop further emissions.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// True once the timer task has ended (cancelled or consumer closed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::titles::TITLE_BANK;
    use futures::future::BoxFuture;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    const PERIOD: Duration = Duration::from_millis(2000);

    fn forward_to(
        tx: mpsc::Sender<RawItem>,
    ) -> impl FnMut(RawItem) -> BoxFuture<'static, ControlFlow<()>> + Send + 'static {
        move |item| {
            let tx = tx.clone();
            Box::pin(async move {
                match tx.send(item).await {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(_) => ControlFlow::Break(()),
                }
            })
        }
    }

    #[test]
    fn test_id_sequence_starts_at_one() {
        let seq = IdSequence::new();
        assert_eq!(seq.last_issued(), 0);
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
        assert_eq!(seq.last_issued(), 2);
    }

    #[test]
    fn test_id_sequence_clones_share_counter() {
        let seq = IdSequence::new();
        let other = seq.clone();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(other.next_id(), 2);
        assert_eq!(seq.last_issued(), 2);
    }

    #[test]
    fn test_next_item_cycles_titles() {
        let mut generator = FeedGenerator::new(PERIOD).with_rng(StdRng::seed_from_u64(1));
        for n in 1..=10u64 {
            let item = generator.next_item();
            assert_eq!(item.id, n);
            assert_eq!(&*item.title, TITLE_BANK[((n - 1) % 8) as usize]);
        }
    }

    #[test]
    fn test_seeded_generators_pick_same_categories() {
        let mut a = FeedGenerator::new(PERIOD).with_rng(StdRng::seed_from_u64(42));
        let mut b = FeedGenerator::new(PERIOD).with_rng(StdRng::seed_from_u64(42));
        for _ in 0..20 {
            assert_eq!(a.next_item().category, b.next_item().category);
        }
    }

    #[test]
    fn test_independent_generators_number_from_one() {
        let mut a = FeedGenerator::new(PERIOD);
        let mut b = FeedGenerator::new(PERIOD);
        assert_eq!(a.next_item().id, 1);
        assert_eq!(a.next_item().id, 2);
        assert_eq!(b.next_item().id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_emits_consecutive_ids() {
        let (tx, mut rx) = mpsc::channel(8);
        let _handle = FeedGenerator::new(PERIOD).start(forward_to(tx));

        let started = tokio::time::Instant::now();
        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(rx.recv().await.unwrap().id);
        }

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        // First item is immediate; four more periods for the rest.
        assert!(started.elapsed() >= PERIOD * 4);
        assert!(started.elapsed() < PERIOD * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_emission() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = FeedGenerator::new(PERIOD).start(forward_to(tx));

        assert_eq!(rx.recv().await.unwrap().id, 1);
        assert_eq!(rx.recv().await.unwrap().id, 2);
        handle.cancel();

        // The aborted task drops its sender, so the channel closes without
        // delivering a third item.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = FeedGenerator::new(PERIOD).start(forward_to(tx));
        assert_eq!(rx.recv().await.unwrap().id, 1);
        drop(handle);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_consumer_stops_task() {
        let (tx, rx) = mpsc::channel(8);
        let handle = FeedGenerator::new(PERIOD).start(forward_to(tx));
        drop(rx);

        tokio::time::sleep(PERIOD * 2).await;
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_sequence_continues_across_restarts() {
        let seq = IdSequence::new();
        let (tx, mut rx) = mpsc::channel(8);

        let first =
            FeedGenerator::with_sequence(PERIOD, seq.clone()).start(forward_to(tx.clone()));
        assert_eq!(rx.recv().await.unwrap().id, 1);
        assert_eq!(rx.recv().await.unwrap().id, 2);
        first.cancel();

        let _second = FeedGenerator::with_sequence(PERIOD, seq.clone()).start(forward_to(tx));
        assert_eq!(rx.recv().await.unwrap().id, 3);
        assert_eq!(seq.last_issued(), 3);
    }
}
