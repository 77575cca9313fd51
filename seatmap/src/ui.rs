//! Screen layout: header, seat map, sidebar and help bar

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use seatmap_core::{Command, EventKind, Keybindings, SessionAction, SessionPhase, SessionState};

use crate::components::{
    Component, Header, HeaderProps, HelpBar, HelpBarProps, SeatDetailsPanel, SeatDetailsProps,
    SeatMapProps, SeatMapView, SelectionSummaryPanel, SelectionSummaryProps, StatusScreen,
    StatusScreenProps,
};
use crate::runtime::EventOutcome;

pub const SIDEBAR_WIDTH: u16 = 40;

pub struct SeatmapUi {
    seat_map: SeatMapView,
    keybindings: Keybindings,
}

impl SeatmapUi {
    pub fn new(keybindings: Keybindings) -> Self {
        Self {
            seat_map: SeatMapView::new(),
            keybindings,
        }
    }

    pub fn keybindings(&self) -> &Keybindings {
        &self.keybindings
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &SessionState) {
        let layout = match (&state.phase, state.layout.as_ref()) {
            (SessionPhase::Ready, Some(layout)) => layout,
            (SessionPhase::Failed(err), _) => {
                StatusScreen.render(frame, area, StatusScreenProps::Failed(err));
                return;
            }
            _ => {
                StatusScreen.render(frame, area, StatusScreenProps::Loading);
                return;
            }
        };

        let [header, body, help] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [map_area, sidebar] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(SIDEBAR_WIDTH)])
                .areas(body);
        let [details_area, summary_area] = Layout::vertical([
            Constraint::Length(SeatDetailsPanel::HEIGHT),
            Constraint::Min(4),
        ])
        .areas(sidebar);

        Header.render(
            frame,
            header,
            HeaderProps {
                venue: layout.venue(),
                viewer: &state.viewer,
            },
        );

        self.seat_map.render(
            frame,
            map_area,
            SeatMapProps {
                layout,
                selection: &state.selection,
                keybindings: &self.keybindings,
                is_focused: true,
            },
        );

        SeatDetailsPanel.render(
            frame,
            details_area,
            SeatDetailsProps {
                details: state.focus.current(),
            },
        );

        if let Some(summary) = state.summary() {
            SelectionSummaryPanel.render(
                frame,
                summary_area,
                SelectionSummaryProps { summary: &summary },
            );
        }

        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                keybindings: &self.keybindings,
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &SessionState) -> EventOutcome {
        if let EventKind::Resize(width, height) = event {
            return EventOutcome::action(SessionAction::UiTerminalResize(*width, *height))
                .with_render();
        }

        match (&state.phase, state.layout.as_ref()) {
            (SessionPhase::Ready, Some(layout)) => {
                let props = SeatMapProps {
                    layout,
                    selection: &state.selection,
                    keybindings: &self.keybindings,
                    is_focused: true,
                };
                EventOutcome::from_actions(self.seat_map.handle_event(event, props))
            }
            (phase, _) => {
                let EventKind::Key(key) = event else {
                    return EventOutcome::ignored();
                };
                match self.keybindings.command_for(key) {
                    Some(Command::Quit) => EventOutcome::action(SessionAction::Quit),
                    Some(Command::Retry) if matches!(phase, SessionPhase::Failed(_)) => {
                        EventOutcome::action(SessionAction::VenueFetch).with_render()
                    }
                    _ => EventOutcome::ignored(),
                }
            }
        }
    }
}
