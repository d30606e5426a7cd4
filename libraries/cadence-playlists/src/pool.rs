//! Global track pool
//!
//! The pool is the universe dynamic playlists draw their members from.

use cadence_core::{ListViewConfig, TrackRef};
use serde::{Deserialize, Serialize};

/// All known tracks, unique by path, plus the pool's own list view state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPool {
    #[serde(default)]
    tracks: Vec<TrackRef>,
    #[serde(default)]
    list_config: ListViewConfig,
}

impl TrackPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool from tracks, dropping later duplicates
    pub fn from_tracks(tracks: Vec<TrackRef>) -> Self {
        let mut pool = Self::new();
        pool.extend(tracks);
        pool
    }

    /// Tracks in insertion order
    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the pool is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look a track up by path
    pub fn find(&self, path: &str) -> Option<&TrackRef> {
        self.tracks.iter().find(|t| t.path == path)
    }

    /// List view state of the pool
    pub fn list_config(&self) -> &ListViewConfig {
        &self.list_config
    }

    /// Mutable list view state of the pool
    pub fn list_config_mut(&mut self) -> &mut ListViewConfig {
        &mut self.list_config
    }

    /// Append tracks that are not yet known, returning the ones added
    pub(crate) fn extend(&mut self, tracks: Vec<TrackRef>) -> Vec<TrackRef> {
        let mut added = Vec::new();
        for track in tracks {
            if self.tracks.iter().any(|t| t.same_identity(&track)) {
                continue;
            }
            self.tracks.push(track.clone());
            added.push(track);
        }
        added
    }

    /// Drop tracks by identity, returning the ones removed
    pub(crate) fn remove(&mut self, tracks: &[TrackRef]) -> Vec<TrackRef> {
        let mut removed = Vec::new();
        for track in tracks {
            if let Some(index) = self.tracks.iter().position(|t| t.same_identity(track)) {
                removed.push(self.tracks.remove(index));
            }
        }
        removed
    }

    /// Swap the whole collection, keeping the view state
    pub(crate) fn replace(&mut self, tracks: Vec<TrackRef>) {
        self.tracks.clear();
        self.extend(tracks);
    }
}
