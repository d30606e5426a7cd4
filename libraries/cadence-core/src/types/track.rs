/// Track reference domain type
use crate::text::same_text;
use serde::{Deserialize, Serialize};

/// A reference to a track held by a playlist or by the global pool
///
/// Identity is the `path` (a file path or a stream URL). Everything else is
/// display metadata that the playlist engine carries along but never relies on,
/// except `duration`, which feeds the playlist's aggregate time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackRef {
    /// File path or URL; the track's identity
    pub path: String,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Genre
    #[serde(default)]
    pub genre: String,

    /// Release year
    #[serde(default)]
    pub year: Option<u32>,

    /// Track length in seconds
    #[serde(default)]
    pub duration: f64,

    /// Where the track was last placed from, e.g. `Playlist:Road Trip`
    #[serde(default)]
    pub source: Option<String>,
}

impl TrackRef {
    /// Create a track reference with only an identity
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the genre
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Set the release year
    #[must_use]
    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the length in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Whether two references point at the same track
    pub fn same_identity(&self, other: &TrackRef) -> bool {
        same_text(&self.path, &other.path)
    }
}
