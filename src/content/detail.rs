use crate::feed::ItemId;
use std::time::Duration;

/// Default simulated network latency for a detail fetch.
pub const DEFAULT_DETAIL_DELAY: Duration = Duration::from_millis(1500);

/// Lazily fetched, cached description status of an item.
///
/// `NotFetched → Loading → Loaded` never regresses. `Failed` is reserved for
/// fetches that did not produce a body (today only a panicking fetch task);
/// a failed item may be retried, which moves it back to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    NotFetched,
    Loading,
    Loaded(String),
    Failed(String),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True if expanding the item should start a fetch.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Self::NotFetched | Self::Failed(_))
    }

    /// The loaded body, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Loaded(text) => Some(text),
            _ => None,
        }
    }
}

/// Canned description for an item. Always mentions `#id`.
pub fn detail_text(id: ItemId) -> String {
    format!(
        "Article #{} covers the latest developments affecting the campus community \
         and the wider technology ecosystem. Data is gathered from trusted sources \
         and delivered in real time through an asynchronous streaming pipeline.",
        id
    )
}

/// Simulated detail lookup: waits `delay`, then returns [`detail_text`].
///
/// Cannot fail. Uses tokio's timer, so it is cancel-safe and honours paused
/// time in tests.
pub async fn fetch_detail(id: ItemId, delay: Duration) -> String {
    tracing::debug!(id, delay_ms = delay.as_millis() as u64, "Fetching detail");
    tokio::time::sleep(delay).await;
    detail_text(id)
}
