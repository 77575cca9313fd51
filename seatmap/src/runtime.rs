//! Event/action/render loop for a seat map session
//!
//! Terminal events are mapped to actions, actions go through the
//! [`SessionStore`], and the effects each dispatch returns are handed to an
//! effect handler that may spawn async work and emit more actions.

use std::io;
use std::time::Duration;

use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use seatmap_core::{
    spawn_event_poller, Effect, EventKind, Middleware, SessionAction, SessionState, SessionStore,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Result of mapping one terminal event
#[derive(Debug, Default, PartialEq)]
pub struct EventOutcome {
    pub actions: Vec<SessionAction>,
    /// Redraw even if no action changes state
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn action(action: SessionAction) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(actions: impl IntoIterator<Item = SessionAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

/// Context passed to effect handlers
pub struct EffectContext<'a> {
    action_tx: &'a mpsc::UnboundedSender<SessionAction>,
}

impl<'a> EffectContext<'a> {
    /// Send an action directly
    pub fn emit(&self, action: SessionAction) {
        let _ = self.action_tx.send(action);
    }

    /// Sender for tasks that finish later
    pub fn action_tx(&self) -> mpsc::UnboundedSender<SessionAction> {
        self.action_tx.clone()
    }
}

/// How long one terminal poll waits for input
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Pause between poll batches, roughly one frame
const LOOP_SLEEP: Duration = Duration::from_millis(16);

pub struct SessionRuntime<M: Middleware> {
    store: SessionStore<M>,
    action_tx: mpsc::UnboundedSender<SessionAction>,
    action_rx: mpsc::UnboundedReceiver<SessionAction>,
    should_render: bool,
}

impl<M: Middleware> SessionRuntime<M> {
    pub fn new(store: SessionStore<M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            action_tx,
            action_rx,
            should_render: true,
        }
    }

    /// Queue an action to run once the loop starts
    pub fn enqueue(&self, action: SessionAction) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    /// Dispatch one action and hand its effects to `handle_effect`
    pub fn process_action<FEffect>(&mut self, action: SessionAction, handle_effect: &mut FEffect)
    where
        FEffect: FnMut(Effect, &EffectContext),
    {
        let result = self.store.dispatch(action);
        if result.changed {
            self.should_render = true;
        }
        let ctx = EffectContext {
            action_tx: &self.action_tx,
        };
        for effect in result.effects {
            handle_effect(effect, &ctx);
        }
    }

    /// Drain queued actions without a terminal. Returns how many ran.
    pub fn process_pending<FEffect>(&mut self, handle_effect: &mut FEffect) -> usize
    where
        FEffect: FnMut(Effect, &EffectContext),
    {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.process_action(action, handle_effect);
            processed += 1;
        }
        processed
    }

    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &SessionState),
        FEvent: FnMut(&EventKind, &SessionState) -> EventOutcome,
        FQuit: FnMut(&SessionAction) -> bool,
        FEffect: FnMut(Effect, &EffectContext),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            LOOP_SLEEP,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let outcome = map_event(&event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }
                    self.process_action(action, &mut handle_effect);
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        Ok(())
    }
}
