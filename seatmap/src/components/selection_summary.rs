//! Selection summary panel: itemized seats in venue order and the subtotal

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use seatmap_core::SelectionSummary;

use super::Component;
use crate::theme;

pub struct SelectionSummaryPanel;

pub struct SelectionSummaryProps<'a> {
    pub summary: &'a SelectionSummary,
}

/// "3 of 8 seats selected", or the empty-state hint
pub fn count_line(summary: &SelectionSummary) -> String {
    if summary.is_empty() {
        format!(
            "Select up to {} seats (0/{})",
            summary.capacity, summary.capacity
        )
    } else {
        format!("{} of {} seats selected", summary.count, summary.capacity)
    }
}

impl Component for SelectionSummaryPanel {
    type Props<'a> = SelectionSummaryProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let summary = props.summary;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(" Selection Summary ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if summary.is_empty() {
            let lines = vec![
                Line::from(Span::styled(
                    "No seats selected",
                    Style::default().fg(theme::MUTED),
                )),
                Line::from(Span::styled(
                    count_line(summary),
                    Style::default().fg(theme::MUTED),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // count
            Constraint::Min(1),    // seat lines
            Constraint::Length(1), // subtotal
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(count_line(summary)).style(Style::default().fg(theme::MUTED)),
            chunks[0],
        );

        let width = usize::from(chunks[1].width);
        let lines: Vec<Line> = summary
            .lines
            .iter()
            .map(|line| {
                let left = format!(
                    "{} ({}, Row {})",
                    line.seat_id, line.section_label, line.row_index
                );
                let right = line.price.to_string();
                let pad = width.saturating_sub(left.chars().count() + right.len());
                Line::from(format!("{left}{}{right}", " ".repeat(pad)))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        let subtotal = summary.subtotal.to_string();
        let label = "Subtotal:";
        let pad = usize::from(chunks[2].width).saturating_sub(label.len() + subtotal.len());
        frame.render_widget(
            Paragraph::new(format!("{label}{}{subtotal}", " ".repeat(pad))).bold(),
            chunks[2],
        );
    }
}
