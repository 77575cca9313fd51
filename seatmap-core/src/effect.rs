//! Effects declared by the session reducer
//!
//! The reducer never performs I/O. It describes the work as [`Effect`]s in a
//! [`DispatchResult`] and the front-end's effect handler carries them out:
//!
//! ```ignore
//! let result = store.dispatch(SessionAction::SeatActivate(id));
//! for effect in result.effects {
//!     match effect {
//!         Effect::PersistSelection(ids) => log_write(persistence.save(&ids)),
//!         Effect::ClearPersistedSelection => log_write(persistence.clear()),
//!         Effect::LoadVenue(source) => spawn_load(source),
//!     }
//! }
//! ```

use crate::loader::VenueSource;
use crate::venue::SeatId;

/// Side effects the session asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch and parse the venue document
    LoadVenue(VenueSource),
    /// Overwrite the stored selection with these identifiers
    PersistSelection(Vec<SeatId>),
    /// Remove the stored selection entry
    ClearPersistedSelection,
}

/// Result of dispatching an action: whether state changed, plus effects
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Whether the state was modified (re-render needed)
    pub changed: bool,
    /// Effects to process after dispatch
    pub effects: Vec<Effect>,
}

impl Default for DispatchResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl DispatchResult {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result
    #[inline]
    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add an effect only if one is given
    #[inline]
    pub fn with_opt(self, effect: Option<Effect>) -> Self {
        match effect {
            Some(effect) => self.with(effect),
            None => self,
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}
