use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A track as served by `/mood-tracks` and `/all-liked-tracks`.
///
/// The server takes `artist` from the first Spotify artist, which can be
/// null (local files). The mood endpoint also sends the Spotify `uri` and the
/// mood `similarity` score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Track {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

pub const UNKNOWN_NAME: &str = "Unknown track";
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

impl Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} – {}",
            self.name.as_deref().unwrap_or(UNKNOWN_NAME),
            self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
        )
    }
}
