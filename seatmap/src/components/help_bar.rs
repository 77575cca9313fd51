use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use seatmap_core::{Command, Keybindings};

use super::Component;
use crate::theme;

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
}

const ENTRIES: [(Command, &str); 5] = [
    (Command::Next, "next"),
    (Command::Prev, "prev"),
    (Command::Activate, "select"),
    (Command::FocusClear, "unfocus"),
    (Command::Quit, "quit"),
];

impl Component for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = vec![Span::styled(
            " click",
            Style::default().fg(theme::ACCENT).bold(),
        )];
        spans.push(Span::styled(" select  ", Style::default().fg(theme::MUTED)));

        for (command, label) in ENTRIES {
            let Some(key) = props.keybindings.display_key(command) else {
                continue;
            };
            spans.push(Span::styled(key, Style::default().fg(theme::ACCENT).bold()));
            spans.push(Span::styled(
                format!(" {label}  "),
                Style::default().fg(theme::MUTED),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
