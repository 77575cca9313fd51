use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use seatmap_core::{Venue, Viewer};

use super::Component;
use crate::theme;

/// Venue name and id on the left, the signed-in viewer on the right
pub struct Header;

pub struct HeaderProps<'a> {
    pub venue: &'a Venue,
    pub viewer: &'a Viewer,
}

impl Header {
    pub const HEIGHT: u16 = 2;
}

impl Component for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let welcome = Line::from(Span::styled(
            format!("Welcome, {}!", props.viewer.display_name),
            Style::default().fg(theme::ACCENT),
        ))
        .right_aligned();
        let welcome_width = u16::try_from(welcome.width()).unwrap_or(u16::MAX);
        let [title_area, welcome_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(welcome_width)])
                .areas(rows[0]);

        let title = Line::from(Span::styled(
            props.venue.name.as_str(),
            Style::default().fg(Color::White).bold(),
        ));
        frame.render_widget(Paragraph::new(title), title_area);
        frame.render_widget(Paragraph::new(welcome), welcome_area);

        let venue_id = Line::from(Span::styled(
            format!("Venue ID: {}", props.venue.venue_id),
            Style::default().fg(theme::MUTED),
        ));
        frame.render_widget(Paragraph::new(venue_id), rows[1]);
    }
}
