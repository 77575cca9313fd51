//! Summary projection: priced itemization of the selection

use crate::price::{price_for_tier, Money};
use crate::seat_map::SeatLayout;
use crate::selection::SelectionStore;
use crate::venue::SeatId;

/// One selected seat with its price
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub seat_id: SeatId,
    pub section_label: String,
    pub row_index: i32,
    pub price_tier: i32,
    pub price: Money,
}

/// Derived from the venue and the selection; holds no state of its own
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    /// Selected seats in venue traversal order, regardless of click order
    pub lines: Vec<SummaryLine>,
    pub subtotal: Money,
    pub count: usize,
    pub capacity: usize,
}

impl SelectionSummary {
    pub fn compute(layout: &SeatLayout, selection: &SelectionStore) -> Self {
        let mut positioned: Vec<(usize, SummaryLine)> = selection
            .ids()
            .iter()
            .filter_map(|id| {
                let pos = layout.position(id.as_str())?;
                let entry = layout.at(pos)?;
                Some((
                    pos,
                    SummaryLine {
                        seat_id: id.clone(),
                        section_label: entry.section_label.to_string(),
                        row_index: entry.row_index,
                        price_tier: entry.seat.price_tier,
                        price: price_for_tier(entry.seat.price_tier),
                    },
                ))
            })
            .collect();
        positioned.sort_by_key(|(pos, _)| *pos);

        let lines: Vec<SummaryLine> = positioned.into_iter().map(|(_, line)| line).collect();
        Self {
            subtotal: lines.iter().map(|line| line.price).sum(),
            count: selection.len(),
            capacity: selection.capacity(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
