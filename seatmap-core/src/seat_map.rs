//! Seat map: flattened layout, per-seat render views, and interaction routing
//!
//! The layout is built once per venue load. Render passes and interactions
//! read from it instead of walking the section/row tree again, which keeps
//! large venues (tens of thousands of seats) responsive.
//!
//! Drawing is left to the front-end: each seat is exposed as a [`SeatView`]
//! with the fields needed to draw it, an abstract [`SeatVisual`], and the
//! [`Capabilities`] that decide whether activation handlers apply.

use std::collections::HashMap;
use std::sync::Arc;

use bitflags::bitflags;
use crossterm::event::KeyEvent;
use tracing::debug;

use crate::action::SessionAction;
use crate::keybindings::{Command, Keybindings};
use crate::price::price_for_tier;
use crate::selection::SelectionStore;
use crate::venue::{MapSize, SeatId, SeatRef, SeatStatus, Venue};

/// Position of a seat inside the venue tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    section: u32,
    row: u32,
    seat: u32,
}

/// Region of venue coordinates a drawing has to cover: the declared map
/// grown to include every seat with finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapExtent {
    /// Extent of the declared map alone
    pub fn of_map(map: MapSize) -> Self {
        let size = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: size(map.width),
            max_y: size(map.height),
        }
    }

    /// Grow to include a point. Non-finite points are ignored.
    pub fn include(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Flattened, indexed view of a venue in traversal order
#[derive(Debug)]
pub struct SeatLayout {
    venue: Arc<Venue>,
    slots: Vec<Slot>,
    index: HashMap<SeatId, usize>,
    extent: MapExtent,
}

impl SeatLayout {
    /// Flatten `venue`. O(seats), done once per load.
    pub fn build(venue: Arc<Venue>) -> Self {
        let mut slots = Vec::with_capacity(venue.seat_count());
        let mut index = HashMap::with_capacity(slots.capacity());
        let mut extent = MapExtent::of_map(venue.map);

        for (s, section) in venue.sections.iter().enumerate() {
            for (r, row) in section.rows.iter().enumerate() {
                for (c, seat) in row.seats.iter().enumerate() {
                    index.insert(seat.id.clone(), slots.len());
                    extent.include(seat.x, seat.y);
                    slots.push(Slot {
                        section: s as u32,
                        row: r as u32,
                        seat: c as u32,
                    });
                }
            }
        }

        debug!(venue = %venue.venue_id, seats = slots.len(), "Seat layout built");
        Self {
            venue,
            slots,
            index,
            extent,
        }
    }

    /// Reuse `cached` when it was built for this very venue, otherwise build
    pub fn for_venue(venue: &Arc<Venue>, cached: Option<&Arc<SeatLayout>>) -> Arc<SeatLayout> {
        match cached {
            Some(layout) if layout.is_for(venue) => Arc::clone(layout),
            _ => Arc::new(Self::build(Arc::clone(venue))),
        }
    }

    /// Whether this layout was built from `venue` (identity, not equality)
    pub fn is_for(&self, venue: &Arc<Venue>) -> bool {
        Arc::ptr_eq(&self.venue, venue)
    }

    pub fn venue(&self) -> &Arc<Venue> {
        &self.venue
    }

    /// Coordinates covered by the map and every seat. Seats drawn outside
    /// the declared map still get a place on screen.
    pub fn extent(&self) -> MapExtent {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Traversal position of a seat
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Resolve an identifier to the seat and its context
    pub fn get(&self, id: &str) -> Option<SeatRef<'_>> {
        self.position(id).and_then(|pos| self.at(pos))
    }

    pub fn at(&self, pos: usize) -> Option<SeatRef<'_>> {
        let slot = self.slots.get(pos)?;
        let section = &self.venue.sections[slot.section as usize];
        let row = &section.rows[slot.row as usize];
        Some(SeatRef {
            seat: &row.seats[slot.seat as usize],
            section_label: &section.label,
            row_index: row.index,
        })
    }

    pub fn status_of(&self, id: &str) -> Option<SeatStatus> {
        self.get(id).map(|entry| entry.seat.status)
    }

    /// All seats in traversal order
    pub fn iter(&self) -> impl Iterator<Item = SeatRef<'_>> + '_ {
        (0..self.slots.len()).filter_map(move |pos| self.at(pos))
    }

    /// Render views for every seat, in traversal order
    pub fn views<'a>(
        &'a self,
        selection: &'a SelectionStore,
    ) -> impl Iterator<Item = SeatView<'a>> + 'a {
        self.iter()
            .map(move |entry| SeatView::new(entry, selection.contains(entry.seat.id.as_str())))
    }

    /// Next activatable seat strictly after `from` (or the first when `None`),
    /// wrapping around. `None` if nothing is activatable.
    pub fn next_activatable(&self, from: Option<usize>) -> Option<usize> {
        let len = self.slots.len();
        let start = from.map_or(0, |pos| pos + 1);
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&pos| self.is_activatable_at(pos))
    }

    /// Previous activatable seat strictly before `from` (or the last when
    /// `None`), wrapping around
    pub fn prev_activatable(&self, from: Option<usize>) -> Option<usize> {
        let len = self.slots.len();
        let start = from.unwrap_or(0) + len;
        (1..=len)
            .map(|offset| (start - offset) % len)
            .find(|&pos| self.is_activatable_at(pos))
    }

    fn is_activatable_at(&self, pos: usize) -> bool {
        self.at(pos).is_some_and(|entry| entry.seat.status.is_available())
    }
}

bitflags! {
    /// Interaction capabilities of a rendered seat
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Reacts to click / tap
        const POINTER = 1 << 0;
        /// Reachable with keyboard traversal, reacts to Enter / Space
        const KEYBOARD = 1 << 1;
    }
}

impl Capabilities {
    /// Only available seats can be activated
    pub fn for_status(status: SeatStatus) -> Self {
        if status.is_available() {
            Capabilities::POINTER | Capabilities::KEYBOARD
        } else {
            Capabilities::empty()
        }
    }
}

/// Colour role of a seat's fill. Selection overrides status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRole {
    Selected,
    Available,
    Reserved,
    Sold,
    Held,
}

/// What the pointer should suggest over the seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Pointer,
    NotAllowed,
}

/// Drawing-technology-agnostic look of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatVisual {
    pub fill: FillRole,
    /// Heavier outline for selected seats
    pub emphasized: bool,
    pub affordance: Affordance,
    /// Non-activatable seats render dimmed
    pub dimmed: bool,
}

impl SeatVisual {
    /// Pure function of status and selection
    pub fn of(status: SeatStatus, is_selected: bool) -> Self {
        let fill = if is_selected {
            FillRole::Selected
        } else {
            match status {
                SeatStatus::Available => FillRole::Available,
                SeatStatus::Reserved => FillRole::Reserved,
                SeatStatus::Sold => FillRole::Sold,
                SeatStatus::Held => FillRole::Held,
            }
        };
        let activatable = status.is_available();
        Self {
            fill,
            emphasized: is_selected,
            affordance: if activatable {
                Affordance::Pointer
            } else {
                Affordance::NotAllowed
            },
            dimmed: !activatable,
        }
    }
}

/// Everything needed to draw one seat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatView<'a> {
    pub id: &'a SeatId,
    pub x: f64,
    pub y: f64,
    pub status: SeatStatus,
    pub price_tier: i32,
    pub is_selected: bool,
    pub capabilities: Capabilities,
    pub section_label: &'a str,
    pub row_index: i32,
    pub col: i32,
}

impl<'a> SeatView<'a> {
    pub fn new(entry: SeatRef<'a>, is_selected: bool) -> Self {
        let seat = entry.seat;
        Self {
            id: &seat.id,
            x: seat.x,
            y: seat.y,
            status: seat.status,
            price_tier: seat.price_tier,
            is_selected,
            capabilities: Capabilities::for_status(seat.status),
            section_label: entry.section_label,
            row_index: entry.row_index,
            col: seat.col,
        }
    }

    pub fn visual(&self) -> SeatVisual {
        SeatVisual::of(self.status, self.is_selected)
    }

    pub fn is_activatable(&self) -> bool {
        !self.capabilities.is_empty()
    }

    /// Accessible description of the seat
    pub fn label(&self) -> String {
        format!(
            "Seat {}, Section {}, Row {}, Column {}, {}, Price tier {}, {}",
            self.id,
            self.section_label,
            self.row_index,
            self.col,
            self.status,
            self.price_tier,
            price_for_tier(self.price_tier)
        )
    }
}

/// Routes pointer and keyboard input on the seat map to session actions.
///
/// Tracks which seat has keyboard focus (the traversal cursor). Seats without
/// the matching capability never produce an action.
#[derive(Debug, Clone, Default)]
pub struct SeatMapRouter {
    cursor: Option<usize>,
}

impl SeatMapRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Traversal position of the keyboard-focused seat
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn cursor_seat<'a>(&self, layout: &'a SeatLayout) -> Option<SeatRef<'a>> {
        self.cursor.and_then(|pos| layout.at(pos))
    }

    /// Click on a seat
    pub fn pointer(&mut self, layout: &SeatLayout, id: &str) -> Option<SessionAction> {
        let pos = layout.position(id)?;
        let entry = layout.at(pos)?;
        if !Capabilities::for_status(entry.seat.status).contains(Capabilities::POINTER) {
            return None;
        }
        self.cursor = Some(pos);
        Some(SessionAction::SeatActivate(entry.seat.id.clone()))
    }

    /// Key press while the seat map has input focus
    pub fn key(
        &mut self,
        layout: &SeatLayout,
        key: &KeyEvent,
        bindings: &Keybindings,
    ) -> Option<SessionAction> {
        match bindings.command_for(key)? {
            Command::Activate => {
                let entry = self.cursor_seat(layout)?;
                Capabilities::for_status(entry.seat.status)
                    .contains(Capabilities::KEYBOARD)
                    .then(|| SessionAction::SeatActivate(entry.seat.id.clone()))
            }
            Command::Next => self.move_to(layout, layout.next_activatable(self.cursor)),
            Command::Prev => self.move_to(layout, layout.prev_activatable(self.cursor)),
            Command::FocusClear => Some(SessionAction::FocusClear),
            Command::Quit => Some(SessionAction::Quit),
            // only meaningful before a venue is on screen
            Command::Retry => None,
        }
    }

    /// Drop a cursor that no longer points into `layout`
    pub fn reset_if_stale(&mut self, layout: &SeatLayout) {
        if self.cursor.is_some_and(|pos| pos >= layout.len()) {
            self.cursor = None;
        }
    }

    fn move_to(&mut self, layout: &SeatLayout, pos: Option<usize>) -> Option<SessionAction> {
        let pos = pos?;
        self.cursor = Some(pos);
        layout
            .at(pos)
            .map(|entry| SessionAction::SeatFocus(entry.seat.id.clone()))
    }
}
