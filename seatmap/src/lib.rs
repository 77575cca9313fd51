//! Terminal front-end for the seat map
//!
//! Draws a venue chart with ratatui and routes clicks and keys into a
//! [`seatmap_core::SessionStore`]. The binary in `main.rs` wires this to a
//! real terminal; tests render into [`testing::RenderHarness`].

pub mod component;
pub mod components;
pub mod runtime;
pub mod testing;
pub mod theme;
pub mod ui;

pub use component::Component;
pub use runtime::{EffectContext, EventOutcome, SessionRuntime};
pub use ui::SeatmapUi;
