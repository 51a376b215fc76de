//! Background tasks spawned by the engine.

use super::events::EngineEvent;
use crate::content::fetch_detail;
use crate::feed::{FeedGenerator, GeneratorHandle, ItemId};
use futures::FutureExt;
use std::ops::ControlFlow;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(crate) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Start `generator`, forwarding every item to the engine tagged with `generation`.
///
/// The generator stops on its own once the engine's receiver is gone.
pub(super) fn spawn_generator(
    generator: FeedGenerator,
    generation: u64,
    tx: mpsc::Sender<EngineEvent>,
) -> GeneratorHandle {
    generator.start(move |item| {
        let tx = tx.clone();
        async move {
            match tx.send(EngineEvent::ItemGenerated { generation, item }).await {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    tracing::warn!(error = %e, event = "ItemGenerated", "Channel send failed (receiver dropped)");
                    ControlFlow::Break(())
                }
            }
        }
    })
}

/// Spawn a detail fetch for `id` that reports back via `EngineEvent::DetailLoaded`.
///
/// Fetches are independent of each other and of the generator; they are not
/// cancelled when the category changes.
pub(super) fn spawn_detail_fetch(id: ItemId, delay: Duration, tx: mpsc::Sender<EngineEvent>) {
    tokio::spawn(async move {
        let result = catch_task_panic(fetch_detail(id, delay)).await;

        if let Err(ref panic_msg) = result {
            tracing::error!(task = "detail_fetch", id, error = %panic_msg, "Background task panicked");
        }

        if let Err(e) = tx.send(EngineEvent::DetailLoaded { id, result }).await {
            tracing::warn!(error = %e, event = "DetailLoaded", "Channel send failed (receiver dropped)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_passes_through_value() {
        let result = catch_task_panic(async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_message() {
        let result: Result<(), String> = catch_task_panic(async {
            panic!("detail exploded");
        })
        .await;
        assert_eq!(result, Err("detail exploded".to_string()));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_formatted_message() {
        let id = 3;
        let result: Result<(), String> = catch_task_panic(async move {
            panic!("item {} failed", id);
        })
        .await;
        assert_eq!(result, Err("item 3 failed".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_detail_fetch_reports_result() {
        let (tx, mut rx) = mpsc::channel(4);
        spawn_detail_fetch(9, Duration::from_millis(1500), tx);

        match rx.recv().await {
            Some(EngineEvent::DetailLoaded { id, result }) => {
                assert_eq!(id, 9);
                assert!(result.unwrap().contains("#9"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
