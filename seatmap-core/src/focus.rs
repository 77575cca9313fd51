//! Focus tracker: the single seat under inspection

use serde::Serialize;

use crate::price::{price_for_tier, Money};
use crate::venue::{Seat, SeatId, SeatRef, SeatStatus};

/// Snapshot of a seat and its context at the moment it was inspected.
///
/// Does not follow later status changes of the underlying seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatDetails {
    pub id: SeatId,
    pub section: String,
    pub row: i32,
    pub col: i32,
    pub price_tier: i32,
    pub status: SeatStatus,
}

impl SeatDetails {
    pub fn new(seat: &Seat, section_label: &str, row_index: i32) -> Self {
        Self {
            id: seat.id.clone(),
            section: section_label.to_string(),
            row: row_index,
            col: seat.col,
            price_tier: seat.price_tier,
            status: seat.status,
        }
    }

    pub fn price(&self) -> Money {
        price_for_tier(self.price_tier)
    }
}

impl From<SeatRef<'_>> for SeatDetails {
    fn from(entry: SeatRef<'_>) -> Self {
        Self::new(entry.seat, entry.section_label, entry.row_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusTracker {
    current: Option<SeatDetails>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the focus with a fresh snapshot. The caller supplies consistent
    /// section/row context; nothing beyond that is checked.
    pub fn set_focus(&mut self, seat: &Seat, section_label: &str, row_index: i32) {
        self.current = Some(SeatDetails::new(seat, section_label, row_index));
    }

    /// Returns whether anything was focused
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&SeatDetails> {
        self.current.as_ref()
    }

    pub fn is_focused(&self, seat_id: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|details| details.id.as_str() == seat_id)
    }
}
