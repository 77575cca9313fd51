//! Venue loading from a file or an HTTP endpoint

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::error::VenueLoadError;
use crate::venue::Venue;

/// Where the venue document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSource {
    File(PathBuf),
    Url(String),
}

impl VenueSource {
    /// `http://` and `https://` locations are URLs, anything else is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            VenueSource::Url(location.to_string())
        } else {
            VenueSource::File(PathBuf::from(location))
        }
    }
}

impl Default for VenueSource {
    fn default() -> Self {
        VenueSource::File(PathBuf::from("venue.json"))
    }
}

impl fmt::Display for VenueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueSource::File(path) => write!(f, "{}", path.display()),
            VenueSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and parse the venue once
pub async fn load_venue(source: &VenueSource) -> Result<Venue, VenueLoadError> {
    let body = match source {
        VenueSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| VenueLoadError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })?
        }
        VenueSource::Url(url) => fetch(url).await?,
    };

    let venue = Venue::from_json(&body)?;
    info!(
        source = %source,
        venue = %venue.venue_id,
        sections = venue.sections.len(),
        seats = venue.seat_count(),
        "Venue loaded"
    );
    Ok(venue)
}

async fn fetch(url: &str) -> Result<String, VenueLoadError> {
    let http_error = |e: reqwest::Error| VenueLoadError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = reqwest::get(url).await.map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(VenueLoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(http_error)
}
