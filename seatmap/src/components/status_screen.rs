//! Full-screen placeholders shown before the seat map can be drawn

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use seatmap_core::VenueLoadError;

use super::Component;
use crate::theme;

pub const LOADING_TEXT: &str = "Loading venue data...";

pub enum StatusScreenProps<'a> {
    Loading,
    Failed(&'a VenueLoadError),
}

pub struct StatusScreen;

impl Component for StatusScreen {
    type Props<'a> = StatusScreenProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = match props {
            StatusScreenProps::Loading => {
                vec![Line::from(LOADING_TEXT).style(Style::default().fg(theme::ACCENT))]
            }
            StatusScreenProps::Failed(err) => vec![
                Line::from(format!("Error: {err}")).style(Style::default().fg(theme::SOLD).bold()),
                Line::from(""),
                Line::from("r retry  q quit").style(Style::default().fg(theme::MUTED)),
            ],
        };

        let height = lines.len() as u16;
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            middle,
        );
    }
}
