pub mod header;
pub mod help_bar;
pub mod seat_details;
pub mod seat_map;
pub mod selection_summary;
pub mod status_screen;

pub use crate::component::Component;

pub use header::{Header, HeaderProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use seat_details::{SeatDetailsPanel, SeatDetailsProps, EMPTY_DETAILS};
pub use seat_map::{project, HitGrid, SeatMapProps, SeatMapView};
pub use selection_summary::{count_line, SelectionSummaryPanel, SelectionSummaryProps};
pub use status_screen::{StatusScreen, StatusScreenProps, LOADING_TEXT};
