//! Session store: owns the session state and routes every action through
//! the reducer
//!
//! The store is an explicitly owned value handed to whatever drives the
//! session, never ambient global state. Middleware observes each dispatch
//! for logging and similar cross-cutting concerns.
//!
//! # Example
//! ```ignore
//! let state = SessionState::new(viewer, source, persistence.load());
//! let mut store = SessionStore::new(state);
//!
//! let result = store.dispatch(SessionAction::VenueFetch);
//! for effect in result.effects {
//!     // carry out the effect
//! }
//! ```

use tracing::debug;

use crate::action::SessionAction;
use crate::effect::DispatchResult;
use crate::session::{reduce, SessionState};

/// Hooks called around every dispatch
pub trait Middleware {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &SessionAction);

    /// Called after the reducer ran
    fn after(&mut self, action: &SessionAction, result: &DispatchResult);
}

/// A middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &SessionAction) {}
    fn after(&mut self, _action: &SessionAction, _result: &DispatchResult) {}
}

/// Logs each dispatch through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }
}

impl Middleware for LoggingMiddleware {
    fn before(&mut self, action: &SessionAction) {
        if self.log_before {
            debug!(action = %action.summary(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &SessionAction, result: &DispatchResult) {
        if self.log_after {
            debug!(
                action = %action.name(),
                category = action.category().unwrap_or("global"),
                state_changed = result.changed,
                effects = result.effects.len(),
                "Action processed"
            );
        }
    }
}

/// Owns [`SessionState`] and applies actions to it
pub struct SessionStore<M: Middleware = LoggingMiddleware> {
    state: SessionState,
    middleware: M,
}

impl SessionStore<LoggingMiddleware> {
    /// Store that logs every dispatch
    pub fn new(state: SessionState) -> Self {
        Self::with_middleware(state, LoggingMiddleware::new())
    }
}

impl<M: Middleware> SessionStore<M> {
    pub fn with_middleware(state: SessionState, middleware: M) -> Self {
        Self { state, middleware }
    }

    /// Dispatch an action through middleware and reducer.
    ///
    /// The returned result says whether a re-render is needed and which
    /// effects the caller must carry out.
    pub fn dispatch(&mut self, action: SessionAction) -> DispatchResult {
        self.middleware.before(&action);
        // the reducer consumes the action, middleware still needs it afterwards
        let result = reduce(&mut self.state, action.clone());
        self.middleware.after(&action, &result);
        result
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
