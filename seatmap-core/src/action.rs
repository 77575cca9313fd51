//! Session actions
//!
//! Naming follows the intent/result convention: `VenueFetch` asks for work,
//! `VenueDidLoad` / `VenueDidError` carry the outcome back. The prefix before
//! the verb is the action's category.

use std::sync::Arc;

use crate::error::VenueLoadError;
use crate::venue::{SeatId, Venue};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    // ===== Venue =====
    /// Intent: (re)load the venue document
    VenueFetch,
    /// Result: venue parsed successfully
    VenueDidLoad(Arc<Venue>),
    /// Result: venue could not be loaded
    VenueDidError(VenueLoadError),

    // ===== Seat =====
    /// Primary activation of a seat: toggle its selection, then focus it
    SeatActivate(SeatId),
    /// Keyboard traversal landed on a seat: focus it without toggling
    SeatFocus(SeatId),

    // ===== Focus =====
    FocusClear,

    // ===== UI =====
    UiTerminalResize(u16, u16),

    // ===== Global =====
    Quit,
}

impl SessionAction {
    /// Action name for logging and filtering
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::VenueFetch => "VenueFetch",
            SessionAction::VenueDidLoad(_) => "VenueDidLoad",
            SessionAction::VenueDidError(_) => "VenueDidError",
            SessionAction::SeatActivate(_) => "SeatActivate",
            SessionAction::SeatFocus(_) => "SeatFocus",
            SessionAction::FocusClear => "FocusClear",
            SessionAction::UiTerminalResize(_, _) => "UiTerminalResize",
            SessionAction::Quit => "Quit",
        }
    }

    pub fn category(&self) -> Option<&'static str> {
        match self {
            SessionAction::VenueFetch
            | SessionAction::VenueDidLoad(_)
            | SessionAction::VenueDidError(_) => Some("venue"),
            SessionAction::SeatActivate(_) | SessionAction::SeatFocus(_) => Some("seat"),
            SessionAction::FocusClear => Some("focus"),
            SessionAction::UiTerminalResize(_, _) => Some("ui"),
            SessionAction::Quit => None,
        }
    }

    /// Whether this is the result half of an async pair
    pub fn is_async_result(&self) -> bool {
        self.name().contains("Did")
    }

    /// Concise description for the action log. The venue itself is far too
    /// large for `Debug` output.
    pub fn summary(&self) -> String {
        match self {
            SessionAction::VenueDidLoad(venue) => format!(
                "VenueDidLoad {{ id: {}, sections: {}, seats: {} }}",
                venue.venue_id,
                venue.sections.len(),
                venue.seat_count()
            ),
            SessionAction::VenueDidError(err) => format!("VenueDidError({err})"),
            SessionAction::SeatActivate(id) => format!("SeatActivate({id})"),
            SessionAction::SeatFocus(id) => format!("SeatFocus({id})"),
            _ => format!("{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::MapSize;

    #[test]
    fn test_categories() {
        assert_eq!(SessionAction::VenueFetch.category(), Some("venue"));
        assert_eq!(
            SessionAction::SeatActivate("A-1-01".into()).category(),
            Some("seat")
        );
        assert_eq!(SessionAction::UiTerminalResize(80, 24).category(), Some("ui"));
        assert_eq!(SessionAction::Quit.category(), None);
    }

    #[test]
    fn test_async_results() {
        let err = VenueLoadError::Parse("eof".into());
        assert!(SessionAction::VenueDidError(err).is_async_result());
        assert!(!SessionAction::VenueFetch.is_async_result());
    }

    #[test]
    fn test_summary_hides_venue_body() {
        let venue = Venue {
            venue_id: "arena".into(),
            name: "Arena".into(),
            map: MapSize {
                width: 100.0,
                height: 100.0,
            },
            sections: vec![],
        };
        let summary = SessionAction::VenueDidLoad(Arc::new(venue)).summary();
        assert_eq!(summary, "VenueDidLoad { id: arena, sections: 0, seats: 0 }");
        assert_eq!(
            SessionAction::SeatActivate("B-2-05".into()).summary(),
            "SeatActivate(B-2-05)"
        );
    }
}
