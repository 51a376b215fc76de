use crate::feed::{ItemId, RawItem};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The id is not in the currently displayed list.
    #[error("Unknown item: #{0}")]
    UnknownItem(ItemId),
}

// ============================================================================
// Events
// ============================================================================

/// Events sent from background tasks to the engine's owner.
///
/// Background tasks never touch engine state directly; the owner drains the
/// channel and hands each event to `FeedEngine::handle_event`.
#[derive(Debug)]
pub enum EngineEvent {
    /// A generator tick produced an item.
    ///
    /// Fields:
    /// - `generation`: Subscription counter when the generator was started
    ///   (ticks from a cancelled subscription are discarded)
    /// - `item`: The generated item
    ItemGenerated { generation: u64, item: RawItem },
    /// A detail fetch finished.
    ///
    /// Fields:
    /// - `id`: The item the detail belongs to
    /// - `result`: The detail body, or the panic message if the fetch task panicked
    DetailLoaded {
        id: ItemId,
        result: Result<String, String>,
    },
}
