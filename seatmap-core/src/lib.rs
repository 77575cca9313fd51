//! Core types for the seat map
//!
//! This crate holds everything about a seat-selection session that does not
//! depend on how it is drawn: the venue model, pricing, the bounded
//! selection, focus, persistence and a Redux/Elm-style session store.
//!
//! # Core Concepts
//!
//! - **Venue**: Sections, rows and seats as loaded from JSON
//! - **SeatLayout**: The venue flattened once, in traversal order
//! - **SelectionStore**: Up to [`MAX_SELECTIONS`] available seats
//! - **SessionStore**: Owns [`SessionState`] and routes actions through [`reduce`]
//! - **Effect**: Side effects the reducer asks the caller to perform
//!
//! # Basic Example
//!
//! ```ignore
//! use seatmap_core::prelude::*;
//!
//! let persistence = SelectionPersistence::new(FileStorage::new(dir));
//! let state = SessionState::new(Viewer::new("Ada"), source, persistence.load());
//! let mut store = SessionStore::new(state);
//!
//! let result = store.dispatch(SessionAction::VenueFetch);
//! ```
//!
//! # Async Pattern
//!
//! Loading follows a two-phase action pattern:
//!
//! 1. **Intent actions** trigger async work (`VenueFetch` returns [`Effect::LoadVenue`])
//! 2. **Result actions** carry the outcome back (`VenueDidLoad`, `VenueDidError`)
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(action) = action_rx.recv() => {
//!             let result = store.dispatch(action);
//!             for effect in result.effects {
//!                 handle_effect(effect, &action_tx, &mut persistence);
//!             }
//!         }
//!         // ... event handling
//!     }
//! }
//! ```

pub mod action;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod focus;
pub mod keybindings;
pub mod loader;
pub mod persistence;
pub mod price;
pub mod seat_map;
pub mod selection;
pub mod session;
pub mod store;
pub mod summary;
pub mod testing;
pub mod venue;

// Model exports
pub use venue::{FlatSeats, MapSize, Row, Seat, SeatId, SeatRef, SeatStatus, Section, Transform, Venue};
pub use price::{price_for_tier, Money, PRICE_TIERS};
pub use selection::{RefusalReason, SelectionStore, ToggleOutcome, MAX_SELECTIONS};
pub use focus::{FocusTracker, SeatDetails};
pub use summary::{SelectionSummary, SummaryLine};

// Seat map exports
pub use seat_map::{
    Affordance, Capabilities, FillRole, MapExtent, SeatLayout, SeatMapRouter, SeatView,
    SeatVisual,
};

// Store exports
pub use action::SessionAction;
pub use effect::{DispatchResult, Effect};
pub use session::{reduce, SessionPhase, SessionState, Viewer};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, SessionStore};

// I/O exports
pub use loader::{load_venue, VenueSource};
pub use persistence::{
    FileStorage, KeyValueStorage, MemoryStorage, SelectionPersistence, SELECTION_KEY,
};

// Event and configuration exports
pub use config::{CliOverrides, ConfigFile, SessionConfig};
pub use error::{ConfigError, PersistenceError, VenueLoadError};
pub use event::{process_raw_event, spawn_event_poller, EventKind};
pub use keybindings::{format_key_for_display, parse_key_string, Command, Keybindings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::SessionAction;
    pub use crate::effect::{DispatchResult, Effect};
    pub use crate::event::{process_raw_event, spawn_event_poller, EventKind};
    pub use crate::keybindings::{Command, Keybindings};
    pub use crate::loader::{load_venue, VenueSource};
    pub use crate::persistence::{FileStorage, KeyValueStorage, SelectionPersistence};
    pub use crate::seat_map::{SeatLayout, SeatMapRouter, SeatView};
    pub use crate::session::{SessionPhase, SessionState, Viewer};
    pub use crate::store::{LoggingMiddleware, Middleware, SessionStore};
    pub use crate::venue::{SeatId, SeatStatus, Venue};
}
