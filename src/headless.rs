//! Line-oriented output for running the feed without a terminal UI.

use crate::engine::{DisplayItem, EngineEvent, FeedEngine};
use crate::feed::ItemId;
use std::io::{self, Write};
use tokio::sync::mpsc;

/// One output line for an item: `#id [category] title  (age)`.
pub fn format_line(item: &DisplayItem) -> String {
    format!(
        "#{:<4} [{:<6}] {}  ({})",
        item.id, item.category, item.title, item.relative_time_label
    )
}

/// Drive `engine` until `count` items have been written to `out`, oldest first.
///
/// Items are read from the engine's snapshot subscription the way an external
/// renderer would see them. Returns the number of lines written, which is less
/// than `count` only if the event channel closes first.
pub async fn run<W: Write>(
    engine: &mut FeedEngine,
    event_rx: &mut mpsc::Receiver<EngineEvent>,
    count: usize,
    out: &mut W,
) -> io::Result<usize> {
    let mut updates = engine.subscribe();
    let mut written = 0;
    let mut last_id: ItemId = 0;

    while written < count {
        let Some(event) = event_rx.recv().await else {
            break;
        };
        engine.handle_event(event);

        if !updates.has_changed().unwrap_or(false) {
            continue;
        }
        let snapshot = updates.borrow_and_update().clone();

        // Items are newest-first; write the unseen ones oldest-first.
        for item in snapshot.items.iter().rev() {
            if written == count {
                break;
            }
            if item.id <= last_id {
                continue;
            }
            writeln!(out, "{}", format_line(item))?;
            last_id = item.id;
            written += 1;
        }
        out.flush()?;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Category;
    use std::sync::Arc;

    #[test]
    fn test_format_line_pads_columns() {
        let item = DisplayItem {
            id: 7,
            title: Arc::from("Library extends hours"),
            category: Category::Tech,
            relative_time_label: "just now".to_string(),
        };
        assert_eq!(
            format_line(&item),
            "#7    [Tech  ] Library extends hours  (just now)"
        );
    }
}
