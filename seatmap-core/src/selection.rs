//! Selection store: the capacity-bounded, status-gated set of selected seats

use tracing::debug;

use crate::venue::{Seat, SeatId, SeatStatus};

/// Maximum number of seats selectable at once
pub const MAX_SELECTIONS: usize = 8;

/// Why a toggle left the selection unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The seat is not available (reserved, sold or held)
    NotAvailable(SeatStatus),
    /// Adding would exceed the capacity
    AtCapacity,
}

/// Result of [`SelectionStore::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    Refused(RefusalReason),
}

impl ToggleOutcome {
    /// Whether the selection set changed
    pub fn changed(self) -> bool {
        !matches!(self, ToggleOutcome::Refused(_))
    }
}

/// Owns the selected seat identifiers.
///
/// Identifiers keep insertion order; the summary re-sorts into venue order
/// for display. The store never owns `Seat`s, only their identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStore {
    ids: Vec<SeatId>,
    capacity: usize,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    /// Empty store bounded by [`MAX_SELECTIONS`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_SELECTIONS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Toggle membership of `seat_id`.
    ///
    /// `seat` must be the seat currently identified by `seat_id` in the venue;
    /// resolving it is the caller's job. Its status is re-checked here on every
    /// call. Non-available seats and additions beyond capacity are refused;
    /// removing a selected available seat always succeeds.
    pub fn toggle(&mut self, seat_id: &SeatId, seat: &Seat) -> ToggleOutcome {
        debug_assert_eq!(seat_id, &seat.id, "seat resolved for a different id");

        if !seat.status.is_available() {
            debug!(seat = %seat_id, status = %seat.status, "Selection refused: seat not available");
            return ToggleOutcome::Refused(RefusalReason::NotAvailable(seat.status));
        }

        if let Some(pos) = self.position(seat_id.as_str()) {
            self.ids.remove(pos);
            return ToggleOutcome::Removed;
        }

        if self.is_full() {
            debug!(seat = %seat_id, capacity = self.capacity, "Selection refused: at capacity");
            return ToggleOutcome::Refused(RefusalReason::AtCapacity);
        }

        self.ids.push(seat_id.clone());
        ToggleOutcome::Added
    }

    /// Replace the selection with previously persisted identifiers.
    ///
    /// `status_of` resolves an identifier against the current venue. Duplicates,
    /// unknown identifiers, seats that are no longer available, and anything
    /// past capacity are dropped. Returns how many stored ids were dropped.
    pub fn restore<I, F>(&mut self, stored: I, status_of: F) -> usize
    where
        I: IntoIterator<Item = SeatId>,
        F: Fn(&SeatId) -> Option<SeatStatus>,
    {
        self.ids.clear();
        let mut dropped = 0;
        for id in stored {
            let eligible = !self.contains(id.as_str())
                && !self.is_full()
                && status_of(&id).is_some_and(SeatStatus::is_available);
            if eligible {
                self.ids.push(id);
            } else {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.position(seat_id).is_some()
    }

    /// Selected identifiers in insertion order
    pub fn ids(&self) -> &[SeatId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    fn position(&self, seat_id: &str) -> Option<usize> {
        self.ids.iter().position(|id| id.as_str() == seat_id)
    }
}
