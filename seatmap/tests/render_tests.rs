//! Render tests using RenderHarness
//!
//! Each test builds session state the way the reducer would, renders the
//! whole screen or one panel into a test buffer, and checks the text.

use seatmap::components::{
    Component, SeatDetailsPanel, SeatDetailsProps, SelectionSummaryPanel, SelectionSummaryProps,
    EMPTY_DETAILS, LOADING_TEXT,
};
use seatmap::testing::RenderHarness;
use seatmap::SeatmapUi;
use seatmap_core::testing::{key, large_venue, ready_session, scenario_a_venue, small_venue};
use seatmap_core::{
    reduce, EventKind, Keybindings, SessionAction, SessionState, VenueLoadError, VenueSource,
    Viewer,
};

fn render_screen(state: &SessionState) -> String {
    let mut ui = SeatmapUi::new(Keybindings::default());
    let mut render = RenderHarness::new(100, 30);
    render.render_to_string_plain(|frame| ui.render(frame, frame.area(), state))
}

fn activate(state: &mut SessionState, id: &str) {
    reduce(state, SessionAction::SeatActivate(id.into()));
}

#[test]
fn test_render_loading_state() {
    let state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), Vec::new());
    let output = render_screen(&state);
    assert!(output.contains(LOADING_TEXT), "Should show loading text");
}

#[test]
fn test_render_error_state() {
    let mut state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), Vec::new());
    reduce(
        &mut state,
        SessionAction::VenueDidError(VenueLoadError::Status {
            url: "https://example.com/venue.json".into(),
            status: 404,
        }),
    );

    let output = render_screen(&state);
    assert!(output.contains("Error:"), "Should show error label");
    assert!(output.contains("404"), "Should show the status code");
    assert!(output.contains("retry"), "Should show retry hint");
}

#[test]
fn test_render_header() {
    let state = ready_session(small_venue());
    let output = render_screen(&state);

    assert!(output.contains("Generated Arena"), "Should show venue name");
    assert!(output.contains("Venue ID: generated-48"), "Should show venue id");
    assert!(output.contains("Welcome, Ada!"), "Should greet the viewer");
}

#[test]
fn test_render_empty_sidebar() {
    let state = ready_session(scenario_a_venue());
    let output = render_screen(&state);

    assert!(output.contains(EMPTY_DETAILS));
    assert!(output.contains("No seats selected"));
    assert!(output.contains("Select up to 8 seats (0/8)"));
}

#[test]
fn test_render_focused_seat_details() {
    let mut state = ready_session(scenario_a_venue());
    activate(&mut state, "S3");

    let mut render = RenderHarness::new(40, 10);
    let output = render.render_to_string_plain(|frame| {
        let props = SeatDetailsProps {
            details: state.focus.current(),
        };
        SeatDetailsPanel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Seat ID: S3"));
    assert!(output.contains("Section: Section A"));
    assert!(output.contains("Row: 1"));
    assert!(output.contains("Column: 3"));
    assert!(output.contains("Price Tier: 1"));
    assert!(output.contains("Price: $50.00"));
    assert!(output.contains("AVAILABLE"), "Status badge is upper-cased");
}

#[test]
fn test_render_summary_in_venue_order() {
    let mut state = ready_session(small_venue());
    activate(&mut state, "C-1-01");
    activate(&mut state, "A-1-01");

    let summary = state.summary().unwrap();
    let mut render = RenderHarness::new(40, 8);
    let output = render.render_to_string_plain(|frame| {
        SelectionSummaryPanel.render(
            frame,
            frame.area(),
            SelectionSummaryProps { summary: &summary },
        );
    });

    assert!(output.contains("2 of 8 seats selected"));
    let a = output.find("A-1-01 (Section A, Row 1)").unwrap();
    let c = output.find("C-1-01 (Section C, Row 1)").unwrap();
    assert!(a < c, "Section A comes before Section C:\n{output}");
    assert!(output.contains("$100.00"));
    assert!(output.contains("Subtotal:"));
    assert!(output.contains("$150.00"));
}

#[test]
fn test_keyboard_flow_through_ui() {
    let mut state = ready_session(scenario_a_venue());
    let mut ui = SeatmapUi::new(Keybindings::default());

    for key_name in ["tab", "tab", "enter"] {
        let outcome = ui.map_event(&EventKind::Key(key(key_name)), &state);
        for action in outcome.actions {
            reduce(&mut state, action);
        }
    }

    let ids: Vec<&str> = state.selection.ids().iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["S3"]);
    assert!(state.focus.is_focused("S3"));
}

#[test]
fn test_click_flow_through_ui() {
    let mut state = ready_session(scenario_a_venue());
    let mut ui = SeatmapUi::new(Keybindings::default());
    let mut render = RenderHarness::new(100, 30);

    // find where S1 was drawn
    let buffer = render.render(|frame| ui.render(frame, frame.area(), &state));
    let (column, row) = (0..buffer.area.height)
        .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
        .find(|&(x, y)| buffer.cell((x, y)).is_some_and(|c| c.symbol() == "○"))
        .expect("an available seat is drawn");

    let outcome = ui.map_event(&EventKind::Click { column, row }, &state);
    assert_eq!(outcome.actions, vec![SessionAction::SeatActivate("S1".into())]);
    for action in outcome.actions {
        reduce(&mut state, action);
    }
    assert!(state.selection.contains("S1"));
}

#[test]
fn test_retry_only_after_failure() {
    let mut ui = SeatmapUi::new(Keybindings::default());
    let mut state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), Vec::new());

    let outcome = ui.map_event(&EventKind::Key(key("r")), &state);
    assert!(outcome.actions.is_empty(), "No retry while loading");

    reduce(
        &mut state,
        SessionAction::VenueDidError(VenueLoadError::Parse("bad".into())),
    );
    let outcome = ui.map_event(&EventKind::Key(key("r")), &state);
    assert_eq!(outcome.actions, vec![SessionAction::VenueFetch]);

    let outcome = ui.map_event(&EventKind::Key(key("q")), &state);
    assert_eq!(outcome.actions, vec![SessionAction::Quit]);
}

#[test]
fn test_large_venue_renders() {
    let state = ready_session(large_venue());
    let output = render_screen(&state);
    assert!(output.contains("Generated Arena"));
    assert!(output.contains('○'), "Some available seats are visible");
}
