//! Playlist entity
//!
//! A `Playlist` is an ordered, duplicate-free list of track references plus
//! identity, ownership and view metadata. Every membership operation returns
//! a [`TrackChange`] describing what happened and keeps `time` in step with
//! the members.
//!
//! Playlists held by a [`PlaylistRegistry`](crate::PlaylistRegistry) are
//! mutated through the registry so that changes are announced; a standalone
//! playlist (for example one returned by a format adapter) can be edited
//! directly.

use crate::parser::ParserSet;
use crate::pool::TrackPool;
use crate::types::{PlaylistType, TrackChange, NAVIGATION_PREFIX};
use cadence_core::{is_blank, track_matches_query, ListViewConfig, Result, TrackRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A named, ordered collection of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    name: String,
    #[serde(default)]
    id: u32,
    #[serde(default)]
    owner_id: u32,
    #[serde(default)]
    owner_name: String,
    #[serde(default)]
    owner_cache_time: Option<DateTime<Utc>>,
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    tracks: Vec<TrackRef>,
    #[serde(default)]
    time: f64,
    #[serde(default)]
    list_config: ListViewConfig,

    /// User the foreign-ownership check is made against
    #[serde(skip)]
    current_user_id: Option<u32>,
}

impl Playlist {
    /// Create an empty, local playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: 0,
            owner_id: 0,
            owner_name: String::new(),
            owner_cache_time: None,
            filter: None,
            tracks: Vec::new(),
            time: 0.0,
            list_config: ListViewConfig::default(),
            current_user_id: None,
        }
    }

    /// Create a playlist from an ordered list of tracks
    ///
    /// Later duplicates of the same path are dropped. Tracks are taken as
    /// they are; their `source` is left untouched.
    pub fn with_tracks(name: impl Into<String>, tracks: Vec<TrackRef>) -> Self {
        let mut playlist = Self::new(name);
        for track in tracks {
            if playlist.position_of(&track).is_none() {
                playlist.tracks.push(track);
            }
        }
        playlist.recompute_time();
        playlist
    }

    // ===== Identity and metadata =====

    /// Display name, unique within a registry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cloud identifier, zero for local playlists
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Owning user, zero when unowned
    pub fn owner_id(&self) -> u32 {
        self.owner_id
    }

    /// Display name of the owning user
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// When the owner information was last refreshed
    pub fn owner_cache_time(&self) -> Option<DateTime<Utc>> {
        self.owner_cache_time
    }

    /// Dynamic filter, if any
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Members in order
    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the playlist has no members
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Total length of all members in seconds, never negative
    pub fn time(&self) -> f64 {
        self.time
    }

    /// List view state
    pub fn list_config(&self) -> &ListViewConfig {
        &self.list_config
    }

    /// Mutable list view state
    pub fn list_config_mut(&mut self) -> &mut ListViewConfig {
        &mut self.list_config
    }

    /// Identifier used by navigation, `Playlist:{name}:{id}`
    pub fn navigation_id(&self) -> String {
        format!("{NAVIGATION_PREFIX}{}:{}", self.name, self.id)
    }

    /// `Dynamic` when the filter holds something other than whitespace
    pub fn playlist_type(&self) -> PlaylistType {
        match self.filter.as_deref() {
            Some(filter) if !is_blank(filter) => PlaylistType::Dynamic,
            _ => PlaylistType::Standard,
        }
    }

    /// True when the playlist belongs to a user other than the current one
    pub fn is_foreign(&self) -> bool {
        self.owner_id > 0 && self.current_user_id != Some(self.owner_id)
    }

    /// Tag stamped onto tracks placed in this playlist
    pub fn source_tag(&self) -> String {
        format!("{NAVIGATION_PREFIX}{}", self.name)
    }

    /// Change the dynamic filter
    ///
    /// Returns `false` when the value is unchanged. Membership is not touched;
    /// call [`refresh`](Self::refresh) afterwards.
    pub fn set_filter(&mut self, filter: Option<String>) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    /// Set the cloud identifier
    pub fn set_id(&mut self, id: u32) -> bool {
        if self.id == id {
            return false;
        }
        self.id = id;
        true
    }

    /// Set owner information and stamp the cache time
    pub fn set_owner(&mut self, owner_id: u32, owner_name: impl Into<String>) {
        self.owner_id = owner_id;
        self.owner_name = owner_name.into();
        self.owner_cache_time = Some(Utc::now());
    }

    pub(crate) fn set_name(&mut self, name: String) -> String {
        std::mem::replace(&mut self.name, name)
    }

    pub(crate) fn set_current_user(&mut self, user_id: Option<u32>) {
        self.current_user_id = user_id;
    }

    // ===== Membership =====

    /// Index of the member with the same identity as `track`
    pub fn position_of(&self, track: &TrackRef) -> Option<usize> {
        self.tracks.iter().position(|t| t.same_identity(track))
    }

    /// Whether `track` is a member
    pub fn contains(&self, track: &TrackRef) -> bool {
        self.position_of(track).is_some()
    }

    /// Whether at least one of `tracks` is a member
    pub fn contains_any(&self, tracks: &[TrackRef]) -> bool {
        tracks.iter().any(|t| self.contains(t))
    }

    /// Whether every one of `tracks` is a member
    ///
    /// An empty playlist never contains all of anything, not even an empty
    /// selection.
    pub fn contains_all(&self, tracks: &[TrackRef]) -> bool {
        !self.tracks.is_empty() && tracks.iter().all(|t| self.contains(t))
    }

    /// Insert or reposition tracks
    ///
    /// Items go to `pos` in order (the end when `None` or past the end).
    /// New members are copies stamped with this playlist's source tag;
    /// existing members keep their data and are moved. Ignored for foreign
    /// playlists.
    pub fn add(&mut self, items: &[TrackRef], pos: Option<usize>) -> TrackChange {
        let mut change = TrackChange::default();
        if self.is_foreign() {
            debug!(playlist = %self.name, "Ignoring add to a playlist owned by another user");
            return change;
        }

        let source = self.source_tag();
        let mut pos = pos.unwrap_or(self.tracks.len());

        for item in items {
            let len = self.tracks.len();
            match self.position_of(item) {
                None => {
                    let mut track = item.clone();
                    track.source = Some(source.clone());
                    if pos >= len {
                        self.tracks.push(track);
                    } else {
                        self.tracks.insert(pos, track);
                    }
                    change.added.push(item.path.clone());
                }
                Some(index) if index != pos => {
                    let track = self.tracks.remove(index);
                    if pos >= len {
                        self.tracks.push(track);
                    } else {
                        self.tracks.insert(pos, track);
                    }
                    change.moved.push(item.path.clone());
                }
                Some(_) => {}
            }
            pos += 1;
        }

        if !change.is_empty() {
            self.recompute_time();
            trace!(
                playlist = %self.name,
                added = change.added.len(),
                moved = change.moved.len(),
                "Tracks added"
            );
        }
        change
    }

    /// Remove the member sharing each item's identity
    ///
    /// Items that are not members are skipped. Ignored for foreign playlists.
    pub fn remove(&mut self, items: &[TrackRef]) -> TrackChange {
        let mut change = TrackChange::default();
        if self.is_foreign() {
            debug!(playlist = %self.name, "Ignoring remove from a playlist owned by another user");
            return change;
        }

        for item in items {
            if let Some(index) = self.position_of(item) {
                let removed = self.tracks.remove(index);
                change.removed.push(removed.path);
            }
        }

        if !change.is_empty() {
            self.recompute_time();
        }
        change
    }

    /// Bring a dynamic playlist in line with its filter
    ///
    /// Members that no longer match are removed first, then every matching
    /// candidate is added at the end, so members end up in candidate order.
    /// Does nothing for standard playlists.
    pub fn refresh(&mut self, candidates: &[TrackRef]) -> TrackChange {
        let filter = match self.filter.as_deref() {
            Some(filter) if !is_blank(filter) => filter.to_string(),
            _ => return TrackChange::default(),
        };

        let stale: Vec<TrackRef> = self
            .tracks
            .iter()
            .filter(|t| !track_matches_query(t, &filter))
            .cloned()
            .collect();
        let mut change = self.remove(&stale);

        let fresh: Vec<TrackRef> = candidates
            .iter()
            .filter(|t| track_matches_query(t, &filter))
            .cloned()
            .collect();
        change.merge(self.add(&fresh, None));

        debug!(
            playlist = %self.name,
            filter = %filter,
            added = change.added.len(),
            removed = change.removed.len(),
            "Refreshed dynamic playlist"
        );
        change
    }

    /// Write the playlist to `path` using the first adapter that succeeds
    pub fn save(&self, parsers: &ParserSet, path: &str) -> Result<()> {
        parsers.save(self, path)
    }

    /// Swap members for the pool's copy of the same track where one exists
    pub(crate) fn resolve_with(&mut self, pool: &TrackPool) -> usize {
        let mut resolved = 0;
        for track in &mut self.tracks {
            if let Some(known) = pool.find(&track.path) {
                let source = track.source.take();
                *track = known.clone();
                track.source = source;
                resolved += 1;
            }
        }
        if resolved > 0 {
            self.recompute_time();
        }
        resolved
    }

    fn recompute_time(&mut self) {
        let total: f64 = self
            .tracks
            .iter()
            .map(|t| t.duration)
            .filter(|d| d.is_finite())
            .sum();
        self.time = total.max(0.0);
    }
}
