//! Venue model: a read-only tree of sections, rows, and seats
//!
//! Loaded once per session and never mutated afterwards. Everything else in
//! the crate refers to seats by [`SeatId`] and re-resolves against the
//! current venue, so nothing holds on to a `Seat` across a venue swap.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VenueLoadError;

/// Globally unique seat identifier, stable for the venue's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SeatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SeatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Sale status of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
    Sold,
    Held,
}

impl SeatStatus {
    pub fn is_available(self) -> bool {
        self == SeatStatus::Available
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Sold => "sold",
            SeatStatus::Held => "held",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions of the drawing surface the seat coordinates live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: f64,
    pub height: f64,
}

/// Section placement hint. Seat coordinates are already absolute, so the
/// renderer never applies this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub col: i32,
    pub x: f64,
    pub y: f64,
    pub price_tier: i32,
    pub status: SeatStatus,
}

/// A row of seats. `index` is the row number shown to people, not a position;
/// it is only unique within its section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: i32,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub transform: Transform,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub venue_id: String,
    pub name: String,
    pub map: MapSize,
    pub sections: Vec<Section>,
}

impl Venue {
    /// Parse a venue document
    pub fn from_json(json: &str) -> Result<Self, VenueLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lazy section-then-row-then-column traversal of every seat
    ///
    /// Each call starts a fresh pass; the iterator allocates nothing.
    pub fn seats(&self) -> FlatSeats<'_> {
        FlatSeats {
            venue: self,
            section: 0,
            row: 0,
            seat: 0,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.rows)
            .map(|row| row.seats.len())
            .sum()
    }

    /// Linear lookup. Prefer [`SeatLayout::get`](crate::SeatLayout::get) on hot paths.
    pub fn find_seat(&self, id: &str) -> Option<SeatRef<'_>> {
        self.seats().find(|entry| entry.seat.id.as_str() == id)
    }
}

/// A seat together with the section/row context it was found in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatRef<'a> {
    pub seat: &'a Seat,
    pub section_label: &'a str,
    pub row_index: i32,
}

/// Iterator returned by [`Venue::seats`]
#[derive(Debug, Clone)]
pub struct FlatSeats<'a> {
    venue: &'a Venue,
    section: usize,
    row: usize,
    seat: usize,
}

impl<'a> Iterator for FlatSeats<'a> {
    type Item = SeatRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let section = self.venue.sections.get(self.section)?;
            let Some(row) = section.rows.get(self.row) else {
                self.section += 1;
                self.row = 0;
                self.seat = 0;
                continue;
            };
            let Some(seat) = row.seats.get(self.seat) else {
                self.row += 1;
                self.seat = 0;
                continue;
            };
            self.seat += 1;
            return Some(SeatRef {
                seat,
                section_label: &section.label,
                row_index: row.index,
            });
        }
    }
}

impl std::iter::FusedIterator for FlatSeats<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const VENUE_JSON: &str = r#"{
        "venueId": "arena-01",
        "name": "Metropolis Arena",
        "map": { "width": 1024, "height": 768 },
        "sections": [
            {
                "id": "A",
                "label": "Lower Bowl A",
                "transform": { "x": 0, "y": 0, "scale": 1 },
                "rows": [
                    {
                        "index": 1,
                        "seats": [
                            { "id": "A-1-01", "col": 1, "x": 50, "y": 40, "priceTier": 1, "status": "available" },
                            { "id": "A-1-02", "col": 2, "x": 70, "y": 40, "priceTier": 1, "status": "reserved" }
                        ]
                    },
                    { "index": 2, "seats": [] },
                    {
                        "index": 3,
                        "seats": [
                            { "id": "A-3-01", "col": 1, "x": 50, "y": 80, "priceTier": 2, "status": "held" }
                        ]
                    }
                ]
            },
            { "id": "B", "label": "Balcony", "transform": { "x": 0, "y": 0, "scale": 1 }, "rows": [] },
            {
                "id": "C",
                "label": "Upper C",
                "transform": { "x": 0, "y": 0, "scale": 1 },
                "rows": [
                    {
                        "index": 7,
                        "seats": [
                            { "id": "C-7-01", "col": 1, "x": 400, "y": 300, "priceTier": 4, "status": "sold" }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_venue() {
        let venue = Venue::from_json(VENUE_JSON).unwrap();
        assert_eq!(venue.venue_id, "arena-01");
        assert_eq!(venue.map.width, 1024.0);
        assert_eq!(venue.sections.len(), 3);
        assert_eq!(venue.sections[0].rows[0].seats[1].status, SeatStatus::Reserved);
        assert_eq!(venue.sections[0].rows[0].seats[0].price_tier, 1);
    }

    #[test]
    fn test_flat_seats_traversal_order() {
        let venue = Venue::from_json(VENUE_JSON).unwrap();
        let ids: Vec<&str> = venue.seats().map(|s| s.seat.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1-01", "A-1-02", "A-3-01", "C-7-01"]);
        assert_eq!(venue.seat_count(), 4);
    }

    #[test]
    fn test_flat_seats_context() {
        let venue = Venue::from_json(VENUE_JSON).unwrap();
        let last = venue.seats().last().unwrap();
        assert_eq!(last.section_label, "Upper C");
        assert_eq!(last.row_index, 7);
    }

    #[test]
    fn test_flat_seats_restartable() {
        let venue = Venue::from_json(VENUE_JSON).unwrap();
        let first: Vec<_> = venue.seats().collect();
        let second: Vec<_> = venue.seats().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_seat() {
        let venue = Venue::from_json(VENUE_JSON).unwrap();
        let found = venue.find_seat("A-3-01").unwrap();
        assert_eq!(found.section_label, "Lower Bowl A");
        assert_eq!(found.row_index, 3);
        assert!(venue.find_seat("Z-9-99").is_none());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = VENUE_JSON.replace("\"sold\"", "\"gone\"");
        assert!(matches!(
            Venue::from_json(&json),
            Err(VenueLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        assert!(Venue::from_json(r#"{ "venueId": "x", "name": "y" }"#).is_err());
    }
}
