//! Terminal event reader running in a background tokio task.
//!
//! Forwards key presses and resizes, plus tick (animation) and render
//! events at fixed intervals, over an unbounded channel.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// What the app loop wakes up for.
#[derive(Debug)]
pub enum Event {
    /// Key press. Releases and repeats are filtered out.
    Key(KeyEvent),
    /// New terminal size as (cols, rows).
    Resize(u16, u16),
    /// Advances the loading throbbers.
    Tick,
    /// Time to redraw the frame.
    Render,
}

/// Owns the background reader task and the receiving end of its channel.
/// Dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Start reading. `tick_rate` paces [`Event::Tick`], `render_rate`
    /// paces [`Event::Render`]. Missed intervals are skipped, not replayed.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            let mut terminal_events = EventStream::new();
            let mut ticks = tokio::time::interval(tick_rate);
            let mut frames = tokio::time::interval(render_rate);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = task_cancel.cancelled() => break,
                    _ = ticks.tick() => Event::Tick,
                    _ = frames.tick() => Event::Render,
                    Some(Ok(raw)) = terminal_events.next() => match raw {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                        CrosstermEvent::Resize(cols, rows) => Event::Resize(cols, rows),
                        // Mouse, focus and paste events are not used
                        _ => continue,
                    },
                };

                // App loop gone
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Wait for the next event. `None` once the reader task has ended.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Stop the reader task. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_ends_the_stream() {
        let mut reader = EventReader::new(Duration::from_millis(5), Duration::from_millis(5));
        assert!(matches!(
            reader.next().await,
            Some(Event::Tick | Event::Render)
        ));

        reader.stop();
        let drained = tokio::time::timeout(Duration::from_secs(5), async {
            while reader.next().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }
}
