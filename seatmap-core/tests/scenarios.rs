//! End-to-end session flows: dispatch actions, carry out effects, reload

use std::sync::Arc;
use std::time::Instant;

use seatmap_core::testing::{large_venue, scenario_a_venue, venue_with_available};
use seatmap_core::{
    price_for_tier, Effect, KeyValueStorage, MemoryStorage, Money, SeatLayout, SelectionPersistence,
    SessionAction, SessionState, SessionStore, Venue, VenueSource, Viewer, MAX_SELECTIONS,
    SELECTION_KEY,
};

/// A store wired to in-memory persistence, the way the app wires it to files
struct Session {
    store: SessionStore,
    persistence: SelectionPersistence<MemoryStorage>,
}

impl Session {
    fn start(storage: MemoryStorage, venue: Venue) -> Self {
        let persistence = SelectionPersistence::new(storage);
        let state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), persistence.load());
        let mut session = Self {
            store: SessionStore::new(state),
            persistence,
        };
        session.dispatch(SessionAction::VenueDidLoad(Arc::new(venue)));
        session
    }

    fn dispatch(&mut self, action: SessionAction) {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            match effect {
                Effect::PersistSelection(ids) => self.persistence.save(&ids).unwrap(),
                Effect::ClearPersistedSelection => self.persistence.clear().unwrap(),
                Effect::LoadVenue(_) => {}
            }
        }
    }

    fn activate(&mut self, id: &str) {
        self.dispatch(SessionAction::SeatActivate(id.into()));
    }

    fn selected(&self) -> Vec<&str> {
        self.store
            .state()
            .selection
            .ids()
            .iter()
            .map(|id| id.as_str())
            .collect()
    }
}

#[test]
fn test_scenario_single_row_with_sold_seat() {
    let mut session = Session::start(MemoryStorage::new(), scenario_a_venue());

    session.activate("S1");
    assert_eq!(session.selected(), vec!["S1"]);

    session.activate("S2");
    assert_eq!(session.selected(), vec!["S1"]);

    session.activate("S3");
    assert_eq!(session.selected(), vec!["S1", "S3"]);

    let summary = session.store.state().summary().unwrap();
    assert_eq!(summary.subtotal, price_for_tier(1) + price_for_tier(1));
    assert_eq!(summary.subtotal, Money::from_whole(100));
}

#[test]
fn test_scenario_ninth_seat_refused() {
    let mut session = Session::start(MemoryStorage::new(), venue_with_available(9, 0));

    for i in 1..=9 {
        session.activate(&format!("R-{i:02}"));
    }

    let expected: Vec<String> = (1..=8).map(|i| format!("R-{i:02}")).collect();
    assert_eq!(session.selected(), expected);
    assert_eq!(session.selected().len(), MAX_SELECTIONS);
    // the refused seat still received focus
    assert!(session.store.state().focus.is_focused("R-09"));
}

#[test]
fn test_scenario_reload_restores_selection() {
    let storage = MemoryStorage::new();
    let mut session = Session::start(storage.clone(), scenario_a_venue());
    session.activate("S3");
    session.activate("S1");
    drop(session);

    // a fresh store over the same storage
    let reloaded = Session::start(storage, scenario_a_venue());
    assert_eq!(reloaded.selected(), vec!["S3", "S1"]);
}

#[test]
fn test_scenario_deselect_last_removes_entry() {
    let storage = MemoryStorage::new();
    let mut session = Session::start(storage.clone(), scenario_a_venue());

    session.activate("S1");
    assert!(storage.contains_key(SELECTION_KEY));

    session.activate("S1");
    assert!(session.selected().is_empty());
    assert!(!storage.contains_key(SELECTION_KEY));
}

#[test]
fn test_corrupt_storage_starts_empty() {
    let mut storage = MemoryStorage::new();
    storage.set(SELECTION_KEY, "{not json").unwrap();

    let session = Session::start(storage, scenario_a_venue());
    assert!(session.selected().is_empty());
}

#[test]
fn test_stale_storage_is_rewritten() {
    let mut storage = MemoryStorage::new();
    storage.set(SELECTION_KEY, r#"["S2","S3","S3","ghost"]"#).unwrap();

    let session = Session::start(storage.clone(), scenario_a_venue());
    assert_eq!(session.selected(), vec!["S3"]);
    assert_eq!(
        storage.get(SELECTION_KEY).unwrap().as_deref(),
        Some(r#"["S3"]"#)
    );
}

#[test]
fn test_large_venue_layout_built_once() {
    let venue = Arc::new(large_venue());
    let start = Instant::now();
    let layout = SeatLayout::for_venue(&venue, None);
    let built_in = start.elapsed();
    assert_eq!(layout.len(), 15_000);

    // cache hits are pointer comparisons, no rebuild
    for _ in 0..1_000 {
        let again = SeatLayout::for_venue(&venue, Some(&layout));
        assert!(Arc::ptr_eq(&layout, &again));
    }
    assert!(layout.position("D-75-50").is_some());
    assert!(built_in.as_secs() < 5, "layout took {built_in:?}");
}

#[test]
fn test_large_venue_session() {
    let mut session = Session::start(MemoryStorage::new(), large_venue());

    // every fourth seat is available, starting with the first of each cycle
    session.activate("A-1-01");
    session.activate("A-1-02");
    assert_eq!(session.selected(), vec!["A-1-01"]);

    let summary = session.store.state().summary().unwrap();
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.lines[0].section_label, "Section A");
}
