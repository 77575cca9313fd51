//! Seat map component: draws every seat at its venue coordinates and turns
//! clicks and keys into session actions
//!
//! Venue coordinates are scaled onto the drawing area from the layout's
//! extent, the declared map grown to cover every seat. Several seats can land
//! in the same terminal cell on a large venue; the cell then belongs to the
//! seat whose projected position is nearest the cell centre, and that seat
//! is both drawn and hit by a click there.

use std::{collections::HashMap, sync::Arc};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders},
    Frame,
};
use seatmap_core::{
    EventKind, Keybindings, MapExtent, SeatLayout, SeatMapRouter, SeatView, SeatVisual,
    SelectionStore, SessionAction,
};

use super::Component;
use crate::theme;

pub struct SeatMapProps<'a> {
    pub layout: &'a Arc<SeatLayout>,
    pub selection: &'a SelectionStore,
    pub keybindings: &'a Keybindings,
    pub is_focused: bool,
}

/// Scale a venue coordinate into `area`, as fractional cells from its origin.
/// `None` when the area is empty or the point lies outside `extent`.
pub fn project(extent: MapExtent, area: Rect, x: f64, y: f64) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 || !extent.contains(x, y) {
        return None;
    }
    // a flat axis puts every seat in the first cell
    let scale = |offset: f64, span: f64, cells: u16| {
        if span > 0.0 {
            offset / span * f64::from(cells)
        } else {
            0.0
        }
    };
    Some((
        scale(x - extent.min_x, extent.width(), area.width),
        scale(y - extent.min_y, extent.height(), area.height),
    ))
}

/// Terminal cell for a projected position, clamped into `area`
fn cell_of(area: Rect, (fx, fy): (f64, f64)) -> (u16, u16) {
    let col = (fx.floor() as u16).min(area.width.saturating_sub(1));
    let row = (fy.floor() as u16).min(area.height.saturating_sub(1));
    (area.x + col, area.y + row)
}

#[derive(Debug, Clone, Copy)]
struct Claim {
    pos: usize,
    distance: f64,
}

/// Which seat owns each cell for one layout drawn into one area
#[derive(Debug, Default)]
pub struct HitGrid {
    cells: HashMap<(u16, u16), Claim>,
    by_seat: HashMap<usize, (u16, u16)>,
}

impl HitGrid {
    pub fn build(layout: &SeatLayout, area: Rect) -> Self {
        let mut grid = Self::default();
        let extent = layout.extent();
        for (pos, entry) in layout.iter().enumerate() {
            let Some(projected) = project(extent, area, entry.seat.x, entry.seat.y) else {
                continue;
            };
            let cell = cell_of(area, projected);
            let centre = (
                f64::from(cell.0 - area.x) + 0.5,
                f64::from(cell.1 - area.y) + 0.5,
            );
            let distance = (projected.0 - centre.0).hypot(projected.1 - centre.1);

            grid.by_seat.insert(pos, cell);
            let claim = Claim { pos, distance };
            grid.cells
                .entry(cell)
                .and_modify(|current| {
                    if distance < current.distance {
                        *current = claim;
                    }
                })
                .or_insert(claim);
        }
        grid
    }

    /// Layout position of the seat drawn at a cell
    pub fn seat_at(&self, column: u16, row: u16) -> Option<usize> {
        self.cells.get(&(column, row)).map(|claim| claim.pos)
    }

    /// Cell a seat projects into, whether or not it won the cell
    pub fn cell_of_seat(&self, pos: usize) -> Option<(u16, u16)> {
        self.by_seat.get(&pos).copied()
    }

    fn owners(&self) -> impl Iterator<Item = ((u16, u16), usize)> + '_ {
        self.cells.iter().map(|(cell, claim)| (*cell, claim.pos))
    }
}

#[derive(Default)]
pub struct SeatMapView {
    router: SeatMapRouter,
    grid: Arc<HitGrid>,
    /// Layout and area the grid was built for
    grid_key: Option<(Arc<SeatLayout>, Rect)>,
}

impl SeatMapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn router(&self) -> &SeatMapRouter {
        &self.router
    }

    pub fn grid(&self) -> &Arc<HitGrid> {
        &self.grid
    }

    fn refresh_grid(&mut self, layout: &Arc<SeatLayout>, inner: Rect) {
        let fresh = matches!(
            &self.grid_key,
            Some((built_for, area)) if Arc::ptr_eq(built_for, layout) && *area == inner
        );
        if !fresh {
            self.grid = Arc::new(HitGrid::build(layout, inner));
            self.grid_key = Some((Arc::clone(layout), inner));
        }
    }
}

impl Component for SeatMapView {
    type Props<'a> = SeatMapProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = SessionAction> {
        match event {
            EventKind::Key(key) if props.is_focused => {
                self.router.key(props.layout, key, props.keybindings)
            }
            EventKind::Click { column, row } => {
                let id = self
                    .grid
                    .seat_at(*column, *row)
                    .and_then(|pos| props.layout.at(pos))
                    .map(|entry| entry.seat.id.clone());
                id.and_then(|id| self.router.pointer(props.layout, id.as_str()))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.router.reset_if_stale(props.layout);
        let cursor = self
            .router
            .cursor_seat(props.layout)
            .filter(|_| props.is_focused);

        let venue = props.layout.venue();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if props.is_focused {
                theme::ACCENT
            } else {
                theme::BORDER
            }))
            .title(format!(" {} ", venue.name))
            .title_style(Style::default().fg(theme::ACCENT).bold())
            .title_alignment(Alignment::Center);
        if let Some(entry) = cursor {
            let view = SeatView::new(entry, props.selection.contains(entry.seat.id.as_str()));
            block = block.title_bottom(Line::from(format!(" {} ", view.label())).left_aligned());
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.refresh_grid(props.layout, inner);

        let buffer = frame.buffer_mut();
        for ((x, y), pos) in self.grid.owners() {
            let Some(entry) = props.layout.at(pos) else {
                continue;
            };
            let visual = SeatVisual::of(
                entry.seat.status,
                props.selection.contains(entry.seat.id.as_str()),
            );
            buffer.set_string(
                x,
                y,
                theme::seat_glyph(visual),
                theme::seat_style(visual, false),
            );
        }

        // the cursor seat is always visible, even when it lost its cell
        let cursor_cell = self
            .router
            .cursor()
            .filter(|_| cursor.is_some())
            .and_then(|pos| self.grid.cell_of_seat(pos));
        if let (Some(entry), Some((x, y))) = (cursor, cursor_cell) {
            let visual = SeatVisual::of(
                entry.seat.status,
                props.selection.contains(entry.seat.id.as_str()),
            );
            buffer.set_string(
                x,
                y,
                theme::seat_glyph(visual),
                theme::seat_style(visual, true),
            );
        }
    }
}
