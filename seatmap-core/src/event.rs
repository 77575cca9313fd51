//! Input events understood by the seat map

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// The input payload after filtering out what the seat map never reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Key press (releases and repeats are filtered out)
    Key(KeyEvent),
    /// Primary pointer button pressed at a terminal cell
    Click { column: u16, row: u16 },
    /// Terminal resize
    Resize(u16, u16),
}

/// Convert a raw terminal event. Returns `None` for events the seat map ignores.
pub fn process_raw_event(raw: CrosstermEvent) -> Option<EventKind> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(EventKind::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        CrosstermEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
        _ => None,
    }
}

/// Spawn a task that polls the terminal and forwards the events the seat map
/// reacts to.
///
/// Stops when `cancel_token` fires or the receiver is dropped. On cancel,
/// anything still buffered by crossterm is drained so it does not leak into
/// the shell.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(raw) = event::read() else { continue };
                        if let Some(kind) = process_raw_event(raw) {
                            if tx.send(kind).is_err() {
                                debug!("Event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_process_key_press() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let kind = process_raw_event(CrosstermEvent::Key(key));
        assert_eq!(kind, Some(EventKind::Key(key)));
    }

    #[test]
    fn test_key_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(process_raw_event(CrosstermEvent::Key(key)), None);
    }

    #[test]
    fn test_process_click() {
        let kind = process_raw_event(mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(kind, Some(EventKind::Click { column: 10, row: 20 }));
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        assert_eq!(
            process_raw_event(mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(process_raw_event(mouse(MouseEventKind::Moved)), None);
        assert_eq!(process_raw_event(mouse(MouseEventKind::ScrollUp)), None);
        assert_eq!(process_raw_event(mouse(MouseEventKind::ScrollDown)), None);
    }

    #[test]
    fn test_process_resize() {
        let kind = process_raw_event(CrosstermEvent::Resize(80, 24));
        assert_eq!(kind, Some(EventKind::Resize(80, 24)));
    }
}
