//! Test utilities for seat map sessions
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("shift+tab")`)
//! - [`generate_venue`]: Deterministic venues of any size
//! - [`ready_session`]: A session whose venue has already loaded
//! - [`ActionAssertions`] and assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use seatmap_core::testing::{key, ready_session, small_venue};
//!
//! let mut state = ready_session(small_venue());
//! let result = reduce(&mut state, SessionAction::SeatActivate("A-1-01".into()));
//! assert!(result.changed);
//! ```

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use crate::action::SessionAction;
use crate::keybindings::parse_key_string;
use crate::loader::VenueSource;
use crate::session::{reduce, SessionState, Viewer};
use crate::venue::{MapSize, Row, Seat, SeatStatus, Section, Transform, Venue};

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use seatmap_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+c");
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
///
/// let k = key("shift+tab");
/// assert_eq!(k.code, KeyCode::BackTab);
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

const SECTION_IDS: [&str; 4] = ["A", "B", "C", "D"];
const SECTION_SPACING: f64 = 250.0;
const SEAT_SPACING: f64 = 15.0;
const ROW_SPACING: f64 = 30.0;
const MARGIN: f64 = 50.0;

/// Build a venue of `total` seats spread over four sections.
///
/// Seat ids look like `B-3-07`. Every section gets the same number of rows,
/// price tiers go 1..=4 by section, and statuses cycle through available,
/// reserved, sold and held across the whole venue so every fourth seat is
/// available.
pub fn generate_venue(total: usize, seats_per_row: usize) -> Venue {
    let seats_per_row = seats_per_row.max(1);
    let sections_count = SECTION_IDS.len();
    let rows_per_section = total.div_ceil(seats_per_row * sections_count);
    let cycle = [
        SeatStatus::Available,
        SeatStatus::Reserved,
        SeatStatus::Sold,
        SeatStatus::Held,
    ];

    let mut counter = 0usize;
    let mut sections = Vec::with_capacity(sections_count);
    for (section_index, section_id) in SECTION_IDS.iter().enumerate() {
        let mut rows = Vec::with_capacity(rows_per_section);
        for row_index in 1..=rows_per_section {
            let mut seats = Vec::with_capacity(seats_per_row);
            for col in 1..=seats_per_row {
                if counter >= total {
                    break;
                }
                seats.push(Seat {
                    id: format!("{section_id}-{row_index}-{col:02}").into(),
                    col: col as i32,
                    x: section_index as f64 * SECTION_SPACING + MARGIN + col as f64 * SEAT_SPACING,
                    y: MARGIN + row_index as f64 * ROW_SPACING,
                    price_tier: (section_index % 4) as i32 + 1,
                    status: cycle[counter % cycle.len()],
                });
                counter += 1;
            }
            if !seats.is_empty() {
                rows.push(Row {
                    index: row_index as i32,
                    seats,
                });
            }
        }
        sections.push(Section {
            id: (*section_id).to_string(),
            label: format!("Section {section_id}"),
            transform: Transform::default(),
            rows,
        });
    }

    Venue {
        venue_id: format!("generated-{total}"),
        name: "Generated Arena".to_string(),
        map: MapSize {
            width: sections_count as f64 * SECTION_SPACING + 2.0 * MARGIN,
            height: (rows_per_section as f64 + 1.0) * ROW_SPACING + 2.0 * MARGIN,
        },
        sections,
    }
}

/// 48 seats, 12 of them available
pub fn small_venue() -> Venue {
    generate_venue(48, 4)
}

/// The 15,000 seat arena
pub fn large_venue() -> Venue {
    generate_venue(15_000, 50)
}

/// One section, one row: S1 available, S2 sold, S3 available
pub fn scenario_a_venue() -> Venue {
    let seat = |id: &str, col: i32, status: SeatStatus| Seat {
        id: id.into(),
        col,
        x: 100.0 + col as f64 * 20.0,
        y: 100.0,
        price_tier: 1,
        status,
    };
    Venue {
        venue_id: "scenario-a".to_string(),
        name: "Small Hall".to_string(),
        map: MapSize {
            width: 200.0,
            height: 200.0,
        },
        sections: vec![Section {
            id: "A".to_string(),
            label: "Section A".to_string(),
            transform: Transform::default(),
            rows: vec![Row {
                index: 1,
                seats: vec![
                    seat("S1", 1, SeatStatus::Available),
                    seat("S2", 2, SeatStatus::Sold),
                    seat("S3", 3, SeatStatus::Available),
                ],
            }],
        }],
    }
}

/// Single-row venue where the first `available` seats are available and
/// `blocked` more are sold
pub fn venue_with_available(available: usize, blocked: usize) -> Venue {
    let seats = (0..available + blocked)
        .map(|i| Seat {
            id: format!("R-{:02}", i + 1).into(),
            col: i as i32 + 1,
            x: 20.0 + i as f64 * 10.0,
            y: 40.0,
            price_tier: (i % 5) as i32 + 1,
            status: if i < available {
                SeatStatus::Available
            } else {
                SeatStatus::Sold
            },
        })
        .collect();
    Venue {
        venue_id: "row-venue".to_string(),
        name: "Row Venue".to_string(),
        map: MapSize {
            width: 40.0 + (available + blocked) as f64 * 10.0,
            height: 80.0,
        },
        sections: vec![Section {
            id: "R".to_string(),
            label: "Section R".to_string(),
            transform: Transform::default(),
            rows: vec![Row { index: 1, seats }],
        }],
    }
}

/// Session that has already received `venue`
pub fn ready_session(venue: Venue) -> SessionState {
    let mut state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), Vec::new());
    reduce(&mut state, SessionAction::VenueDidLoad(Arc::new(venue)));
    state
}

// ============================================================================
// Action Assertions
// ============================================================================

/// Assertions on the actions a component or router returned.
///
/// ```ignore
/// let actions = component.handle_event(&EventKind::Key(key("enter")), props);
/// actions.assert_count(1);
/// actions.assert_first(SessionAction::SeatActivate("S1".into()));
/// ```
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, expected: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for [A] {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, expected: usize) {
        assert_eq!(
            self.len(),
            expected,
            "Expected {} action(s), got: {:?}",
            expected,
            self
        );
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "Unexpected first action"),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} in {:?}",
            expected,
            self
        );
    }
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        self.as_slice().assert_empty();
    }

    fn assert_count(&self, expected: usize) {
        self.as_slice().assert_count(expected);
    }

    fn assert_first(&self, expected: A) {
        self.as_slice().assert_first(expected);
    }

    fn assert_contains(&self, expected: A) {
        self.as_slice().assert_contains(expected);
    }
}

// ============================================================================
// Assertion Macros
// ============================================================================

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// use seatmap_core::assert_emitted;
///
/// let actions: Vec<SessionAction> = component.handle_event(&event, props);
/// assert_emitted!(actions, SessionAction::SeatActivate(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions
            .iter()
            .filter(|a| matches!(a, $pattern $(if $guard)?))
            .count()
    };
}
