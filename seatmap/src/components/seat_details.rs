use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use seatmap_core::SeatDetails;

use super::Component;
use crate::theme;

pub const EMPTY_DETAILS: &str = "Click on a seat to view details";

/// Panel describing the focused seat
pub struct SeatDetailsPanel;

pub struct SeatDetailsProps<'a> {
    pub details: Option<&'a SeatDetails>,
}

impl SeatDetailsPanel {
    pub const HEIGHT: u16 = 9;
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{name}: "), Style::default().bold()),
        Span::raw(value),
    ])
}

impl Component for SeatDetailsPanel {
    type Props<'a> = SeatDetailsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(" Seat Details ");

        let lines = match props.details {
            None => vec![Line::from(Span::styled(
                EMPTY_DETAILS,
                Style::default().fg(theme::MUTED),
            ))],
            Some(details) => vec![
                field("Seat ID", details.id.to_string()),
                field("Section", details.section.clone()),
                field("Row", details.row.to_string()),
                field("Column", details.col.to_string()),
                field("Price Tier", details.price_tier.to_string()),
                field("Price", details.price().to_string()),
                Line::from(vec![
                    Span::styled("Status: ", Style::default().bold()),
                    Span::styled(
                        format!(" {} ", details.status.as_str().to_uppercase()),
                        Style::default()
                            .fg(Color::Black)
                            .bg(theme::status_color(details.status)),
                    ),
                ]),
            ],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
