//! Session state and reducer
//!
//! All state transitions happen synchronously in [`reduce`]. I/O is requested
//! through [`Effect`]s and performed by the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::action::SessionAction;
use crate::effect::{DispatchResult, Effect};
use crate::error::VenueLoadError;
use crate::focus::FocusTracker;
use crate::loader::VenueSource;
use crate::seat_map::SeatLayout;
use crate::selection::{SelectionStore, ToggleOutcome};
use crate::summary::SelectionSummary;
use crate::venue::{SeatId, Venue};

/// The person browsing the seat map. Supplied by the surrounding application;
/// no session is constructed without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub display_name: String,
}

impl Viewer {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Loading,
    Ready,
    /// Venue load failed; terminal until the fetch is retried
    Failed(VenueLoadError),
}

/// Everything the front-end needs to render
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub viewer: Viewer,
    pub source: VenueSource,
    /// Flattened venue, present once loaded
    pub layout: Option<Arc<SeatLayout>>,
    pub selection: SelectionStore,
    pub focus: FocusTracker,
    /// Persisted ids waiting for the venue to arrive
    pub pending_restore: Vec<SeatId>,
    pub terminal_size: (u16, u16),
}

impl SessionState {
    /// Fresh session in the loading phase. `persisted` is what the persistence
    /// adapter returned at startup; it is applied once the venue loads.
    pub fn new(viewer: Viewer, source: VenueSource, persisted: Vec<SeatId>) -> Self {
        Self {
            phase: SessionPhase::Loading,
            viewer,
            source,
            layout: None,
            selection: SelectionStore::new(),
            focus: FocusTracker::new(),
            pending_restore: persisted,
            terminal_size: (80, 24),
        }
    }

    pub fn venue(&self) -> Option<&Arc<Venue>> {
        self.layout.as_ref().map(|layout| layout.venue())
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    /// Priced itemization of the current selection
    pub fn summary(&self) -> Option<SelectionSummary> {
        self.layout
            .as_ref()
            .map(|layout| SelectionSummary::compute(layout, &self.selection))
    }

    /// Persistence effect mirroring the current selection
    fn persist_effect(&self) -> Effect {
        if self.selection.is_empty() {
            Effect::ClearPersistedSelection
        } else {
            Effect::PersistSelection(self.selection.ids().to_vec())
        }
    }
}

/// Apply an action to the session
pub fn reduce(state: &mut SessionState, action: SessionAction) -> DispatchResult {
    match action {
        // ===== Venue =====
        SessionAction::VenueFetch => {
            state.phase = SessionPhase::Loading;
            DispatchResult::changed_with(Effect::LoadVenue(state.source.clone()))
        }

        SessionAction::VenueDidLoad(venue) => {
            let layout = SeatLayout::for_venue(&venue, state.layout.as_ref());
            state.layout = Some(Arc::clone(&layout));
            state.phase = SessionPhase::Ready;

            // a refetch re-validates the live selection instead
            let pending = std::mem::take(&mut state.pending_restore);
            let from_storage = !pending.is_empty();
            let candidates = if from_storage {
                pending
            } else {
                state.selection.ids().to_vec()
            };
            let dropped = state
                .selection
                .restore(candidates, |id| layout.status_of(id.as_str()));
            if from_storage {
                info!(
                    restored = state.selection.len(),
                    dropped, "Selection restored"
                );
            }

            let resync = (dropped > 0).then(|| state.persist_effect());
            DispatchResult::changed().with_opt(resync)
        }

        SessionAction::VenueDidError(err) => {
            warn!(error = %err, "Venue load failed");
            state.phase = SessionPhase::Failed(err);
            DispatchResult::changed()
        }

        // ===== Seat =====
        SessionAction::SeatActivate(id) => {
            if !state.is_ready() {
                return DispatchResult::unchanged();
            }
            let Some(layout) = state.layout.clone() else {
                return DispatchResult::unchanged();
            };
            let Some(entry) = layout.get(id.as_str()) else {
                debug!(seat = %id, "Activation of unknown seat ignored");
                return DispatchResult::unchanged();
            };
            if !entry.seat.status.is_available() {
                return DispatchResult::unchanged();
            }

            let outcome = state.selection.toggle(&id, entry.seat);
            state
                .focus
                .set_focus(entry.seat, entry.section_label, entry.row_index);

            match outcome {
                ToggleOutcome::Added | ToggleOutcome::Removed => {
                    DispatchResult::changed_with(state.persist_effect())
                }
                // focus still moved
                ToggleOutcome::Refused(_) => DispatchResult::changed(),
            }
        }

        SessionAction::SeatFocus(id) => {
            let Some(layout) = state.layout.clone().filter(|_| state.is_ready()) else {
                return DispatchResult::unchanged();
            };
            match layout.get(id.as_str()) {
                Some(entry) => {
                    state
                        .focus
                        .set_focus(entry.seat, entry.section_label, entry.row_index);
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        // ===== Focus =====
        SessionAction::FocusClear => {
            if state.is_ready() && state.focus.clear() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI =====
        SessionAction::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // handled by the main loop
        SessionAction::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::MAX_SELECTIONS;
    use crate::testing::{ready_session, scenario_a_venue, small_venue};
    use crate::venue::SeatStatus;

    fn loading_session() -> SessionState {
        SessionState::new(Viewer::new("Ada"), VenueSource::default(), vec![])
    }

    fn activate(state: &mut SessionState, id: &str) -> DispatchResult {
        reduce(state, SessionAction::SeatActivate(id.into()))
    }

    #[test]
    fn test_fetch_requests_load() {
        let mut state = loading_session();
        let result = reduce(&mut state, SessionAction::VenueFetch);
        assert_eq!(result.effects, vec![Effect::LoadVenue(VenueSource::default())]);
        assert_eq!(state.phase, SessionPhase::Loading);
    }

    #[test]
    fn test_did_load_makes_ready() {
        let mut state = loading_session();
        let venue = Arc::new(small_venue());
        let result = reduce(&mut state, SessionAction::VenueDidLoad(Arc::clone(&venue)));

        assert!(result.changed);
        assert!(!result.has_effects());
        assert!(state.is_ready());
        assert!(state.layout.as_ref().unwrap().is_for(&venue));
    }

    #[test]
    fn test_did_error_fails_session() {
        let mut state = loading_session();
        let err = VenueLoadError::Parse("bad".into());
        reduce(&mut state, SessionAction::VenueDidError(err.clone()));
        assert_eq!(state.phase, SessionPhase::Failed(err));

        // interactions are ignored while failed
        assert!(!activate(&mut state, "A-1-01").changed);
    }

    #[test]
    fn test_activate_toggles_then_focuses() {
        let mut state = ready_session(scenario_a_venue());

        let result = activate(&mut state, "S1");
        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::PersistSelection(vec!["S1".into()])]
        );
        assert!(state.selection.contains("S1"));
        assert!(state.focus.is_focused("S1"));
    }

    #[test]
    fn test_activate_unavailable_is_noop() {
        let mut state = ready_session(scenario_a_venue());
        let result = activate(&mut state, "S2");
        assert_eq!(result, DispatchResult::unchanged());
        assert!(state.selection.is_empty());
        assert!(state.focus.current().is_none());
    }

    #[test]
    fn test_activate_unknown_is_noop() {
        let mut state = ready_session(scenario_a_venue());
        assert_eq!(activate(&mut state, "S99"), DispatchResult::unchanged());
    }

    #[test]
    fn test_deselect_last_clears_storage() {
        let mut state = ready_session(scenario_a_venue());
        activate(&mut state, "S1");
        let result = activate(&mut state, "S1");
        assert_eq!(result.effects, vec![Effect::ClearPersistedSelection]);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_capacity_refusal_still_focuses() {
        let mut state = ready_session(small_venue());
        let available: Vec<SeatId> = state
            .layout
            .as_ref()
            .unwrap()
            .iter()
            .filter(|e| e.seat.status == SeatStatus::Available)
            .map(|e| e.seat.id.clone())
            .take(MAX_SELECTIONS + 1)
            .collect();
        assert_eq!(available.len(), MAX_SELECTIONS + 1);

        for id in &available[..MAX_SELECTIONS] {
            reduce(&mut state, SessionAction::SeatActivate(id.clone()));
        }
        let extra = &available[MAX_SELECTIONS];
        let result = reduce(&mut state, SessionAction::SeatActivate(extra.clone()));

        assert!(!result.has_effects());
        assert_eq!(state.selection.len(), MAX_SELECTIONS);
        assert!(!state.selection.contains(extra.as_str()));
        assert!(state.focus.is_focused(extra.as_str()));
    }

    #[test]
    fn test_seat_focus_does_not_toggle() {
        let mut state = ready_session(scenario_a_venue());
        let result = reduce(&mut state, SessionAction::SeatFocus("S3".into()));
        assert!(result.changed);
        assert!(state.focus.is_focused("S3"));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_focus_clear() {
        let mut state = ready_session(scenario_a_venue());
        reduce(&mut state, SessionAction::SeatFocus("S3".into()));
        assert!(reduce(&mut state, SessionAction::FocusClear).changed);
        assert!(!reduce(&mut state, SessionAction::FocusClear).changed);
    }

    #[test]
    fn test_restore_applies_on_load() {
        let persisted = vec!["S3".into(), "S1".into()];
        let mut state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), persisted);
        let result = reduce(
            &mut state,
            SessionAction::VenueDidLoad(Arc::new(scenario_a_venue())),
        );

        assert!(!result.has_effects());
        let ids: Vec<&str> = state.selection.ids().iter().map(SeatId::as_str).collect();
        assert_eq!(ids, vec!["S3", "S1"]);
        assert!(state.pending_restore.is_empty());
    }

    #[test]
    fn test_restore_drops_stale_ids_and_resyncs() {
        let persisted = vec!["S2".into(), "gone".into()];
        let mut state = SessionState::new(Viewer::new("Ada"), VenueSource::default(), persisted);
        let result = reduce(
            &mut state,
            SessionAction::VenueDidLoad(Arc::new(scenario_a_venue())),
        );

        assert!(state.selection.is_empty());
        assert_eq!(result.effects, vec![Effect::ClearPersistedSelection]);
    }

    #[test]
    fn test_reload_same_venue_reuses_layout() {
        let mut state = loading_session();
        let venue = Arc::new(small_venue());
        reduce(&mut state, SessionAction::VenueDidLoad(Arc::clone(&venue)));
        let first = Arc::clone(state.layout.as_ref().unwrap());

        reduce(&mut state, SessionAction::VenueDidLoad(Arc::clone(&venue)));
        assert!(Arc::ptr_eq(&first, state.layout.as_ref().unwrap()));
    }

    #[test]
    fn test_refetch_keeps_selection() {
        let mut state = ready_session(scenario_a_venue());
        activate(&mut state, "S1");

        reduce(&mut state, SessionAction::VenueFetch);
        let result = reduce(
            &mut state,
            SessionAction::VenueDidLoad(Arc::new(scenario_a_venue())),
        );

        assert!(!result.has_effects());
        assert!(state.selection.contains("S1"));
    }

    #[test]
    fn test_resize() {
        let mut state = loading_session();
        assert!(reduce(&mut state, SessionAction::UiTerminalResize(120, 40)).changed);
        assert!(!reduce(&mut state, SessionAction::UiTerminalResize(120, 40)).changed);
    }
}
