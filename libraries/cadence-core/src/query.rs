//! Filter queries used by dynamic playlists and search boxes
//!
//! A query is a list of space-separated needles. A track matches when every
//! needle appears, case-insensitively, in at least one of its artist, album,
//! title, genre, year or path.

use crate::types::TrackRef;

/// Check whether a track satisfies a filter query
///
/// An empty query matches everything. Consecutive spaces produce empty
/// needles, which match any field, so a leading space is harmless.
pub fn track_matches_query(track: &TrackRef, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let year = track.year.map(|y| y.to_string()).unwrap_or_default();
    let haystacks = [
        track.artist.to_lowercase(),
        track.album.to_lowercase(),
        track.title.to_lowercase(),
        track.genre.to_lowercase(),
        year,
        track.path.to_lowercase(),
    ];

    query
        .to_lowercase()
        .split(' ')
        .all(|needle| haystacks.iter().any(|field| field.contains(needle)))
}
