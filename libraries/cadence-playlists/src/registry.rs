//! Playlist registry
//!
//! Owns every playlist, the global track pool and the format adapters.
//! All mutations of registered playlists go through the registry so that
//! names stay unique, dynamic playlists follow the pool, and every change is
//! queued as a [`PlaylistEvent`] for observers to drain.

use crate::config::{RegistrySettings, SearchPolicy};
use crate::events::{EventQueue, PlaylistEvent, PlaylistProperty};
use crate::parser::ParserSet;
use crate::playlist::Playlist;
use crate::pool::TrackPool;
use crate::types::{CreatePlaylist, PlaylistKey, PlaylistType, TrackChange, NAVIGATION_PREFIX};
use cadence_core::{clean_xml_text, is_blank, CadenceError, ListViewConfig, Result, TrackRef};
use tracing::{debug, info, warn};

/// Registry of all playlists
///
/// Playlists are handed out by shared reference only. Operations that
/// address a playlist that does not exist are no-ops that return an empty
/// result, matching how a stale UI selection should behave.
#[derive(Debug)]
pub struct PlaylistRegistry {
    settings: RegistrySettings,
    parsers: ParserSet,
    pool: TrackPool,
    playlists: Vec<Playlist>,

    /// Name of the playlist behind the active navigation entry
    current_playlist: Option<String>,

    /// Events pending for observers
    events: EventQueue,
}

impl PlaylistRegistry {
    /// Create an empty registry
    pub fn new(settings: RegistrySettings, parsers: ParserSet) -> Self {
        Self {
            settings,
            parsers,
            pool: TrackPool::new(),
            playlists: Vec::new(),
            current_playlist: None,
            events: EventQueue::default(),
        }
    }

    /// Replace the pool wholesale without refreshing anything
    #[must_use]
    pub fn with_pool(mut self, pool: TrackPool) -> Self {
        self.pool = pool;
        self
    }

    // ===== Accessors =====

    /// Current settings
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Registered format adapters
    pub fn parsers(&self) -> &ParserSet {
        &self.parsers
    }

    /// The global track pool
    pub fn pool(&self) -> &TrackPool {
        &self.pool
    }

    /// Mutable list view state of the pool
    pub fn pool_list_config_mut(&mut self) -> &mut ListViewConfig {
        self.pool.list_config_mut()
    }

    /// All playlists in registration order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// True when no playlist is registered
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Playlist behind the active navigation entry, set by `initialize`
    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.current_playlist.as_deref().and_then(|name| self.get(name))
    }

    /// Hand the playlists back, dropping pending events
    pub fn into_playlists(self) -> Vec<Playlist> {
        self.playlists
    }

    // ===== Events =====

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlaylistEvent> {
        self.events.drain()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ===== Lookup =====

    /// Playlist with exactly this name
    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name() == name)
    }

    /// Playlist with this cloud identifier; zero never matches
    pub fn get_by_id(&self, id: u32) -> Option<&Playlist> {
        if id == 0 {
            return None;
        }
        self.playlists.iter().find(|p| p.id() == id)
    }

    /// Playlist whose navigation identifier equals `navigation_id`
    pub fn get_from_navigation_id(&self, navigation_id: &str) -> Option<&Playlist> {
        self.playlists
            .iter()
            .find(|p| p.navigation_id() == navigation_id)
    }

    /// Playlist behind the active navigation entry in the settings
    pub fn get_active(&self) -> Option<&Playlist> {
        self.get_from_navigation_id(&self.settings.active_navigation)
    }

    /// Playlist behind the selected navigation entry in the settings
    pub fn get_selected(&self) -> Option<&Playlist> {
        self.get_from_navigation_id(&self.settings.selected_navigation)
    }

    /// Position of the named playlist in registration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.name() == name)
    }

    /// Playlist addressed by name or id
    pub fn find(&self, key: impl Into<PlaylistKey>) -> Option<&Playlist> {
        self.index_for(&key.into()).map(|i| &self.playlists[i])
    }

    /// Every playlist containing `track`
    pub fn has(&self, track: &TrackRef) -> Vec<&Playlist> {
        self.playlists.iter().filter(|p| p.contains(track)).collect()
    }

    /// Whether the addressed playlist contains `track`
    pub fn contains(&self, key: impl Into<PlaylistKey>, track: &TrackRef) -> bool {
        self.find(key).is_some_and(|p| p.contains(track))
    }

    /// Whether the addressed playlist contains at least one of `tracks`
    pub fn contains_any(&self, key: impl Into<PlaylistKey>, tracks: &[TrackRef]) -> bool {
        self.find(key).is_some_and(|p| p.contains_any(tracks))
    }

    /// Whether the addressed playlist contains every one of `tracks`
    pub fn contains_all(&self, key: impl Into<PlaylistKey>, tracks: &[TrackRef]) -> bool {
        self.find(key).is_some_and(|p| p.contains_all(tracks))
    }

    fn index_for(&self, key: &PlaylistKey) -> Option<usize> {
        match key {
            PlaylistKey::Name(name) => self.index_of(name),
            PlaylistKey::Id(0) => None,
            PlaylistKey::Id(id) => self.playlists.iter().position(|p| p.id() == *id),
        }
    }

    fn resolve(&self, key: impl Into<PlaylistKey>, operation: &str) -> Option<usize> {
        let key = key.into();
        let index = self.index_for(&key);
        if index.is_none() {
            debug!(playlist = %key, operation, "Playlist not found, ignoring");
        }
        index
    }

    // ===== Names =====

    /// Turn a requested name into one that is clean and not yet taken
    ///
    /// Blank names become the default playlist name. Taken names get the
    /// lowest free numeric suffix: `Mix`, `Mix 1`, `Mix 2`, ...
    pub fn generate_name(&self, name: &str) -> String {
        let cleaned = clean_xml_text(name);
        let base = if is_blank(&cleaned) {
            clean_xml_text(&self.settings.default_playlist_name)
        } else {
            cleaned
        };

        if self.get(&base).is_none() {
            return base;
        }

        let mut suffix: u32 = 1;
        loop {
            let candidate = format!("{base} {suffix}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Rename a playlist
    ///
    /// Returns `false` and changes nothing when the playlist is missing, the
    /// name is unchanged, the new name is blank or it resolves to the
    /// create-new label. A taken name gets a numeric suffix.
    pub fn rename(&mut self, key: impl Into<PlaylistKey>, new_name: &str) -> bool {
        let Some(index) = self.resolve(key, "rename") else {
            return false;
        };
        let cleaned = clean_xml_text(new_name);
        if self.playlists[index].name() == cleaned {
            return false;
        }
        if is_blank(&cleaned) || self.settings.is_reserved_name(&cleaned) {
            debug!(requested = new_name, "Rejecting playlist name");
            return false;
        }
        let resolved = self.generate_name(&cleaned);
        if self.settings.is_reserved_name(&resolved) {
            debug!(requested = new_name, "Rejecting playlist name");
            return false;
        }

        let old_name = self.playlists[index].set_name(resolved.clone());
        if self.current_playlist.as_deref() == Some(old_name.as_str()) {
            self.current_playlist = Some(resolved.clone());
        }
        info!(from = %old_name, to = %resolved, "Renamed playlist");
        self.events.push(PlaylistEvent::Renamed {
            old_name,
            new_name: resolved,
        });
        true
    }

    // ===== Lifecycle =====

    /// Register an existing playlist
    ///
    /// The name is made unique, the list view search filter is seeded by the
    /// search policy and the playlist joins the registry. No event is
    /// queued.
    pub fn init(&mut self, playlist: Playlist) -> &Playlist {
        let index = self.register(playlist);
        &self.playlists[index]
    }

    fn register(&mut self, mut playlist: Playlist) -> usize {
        let name = self.generate_name(playlist.name());
        playlist.set_name(name);

        let seeded = match self.settings.search_policy {
            SearchPolicy::Global => Some(self.pool.list_config().search_filter.clone()),
            SearchPolicy::Partial => self
                .playlists
                .first()
                .map(|p| p.list_config().search_filter.clone()),
            SearchPolicy::Individual => None,
        };
        if let Some(filter) = seeded {
            playlist.list_config_mut().search_filter = filter;
        }

        playlist.set_current_user(self.settings.current_user_id);
        self.playlists.push(playlist);
        self.playlists.len() - 1
    }

    /// Create a playlist
    ///
    /// ```rust
    /// use cadence_playlists::{CreatePlaylist, ParserSet, PlaylistRegistry, RegistrySettings};
    ///
    /// let mut registry = PlaylistRegistry::new(RegistrySettings::default(), ParserSet::new());
    /// registry.create("Mix");
    /// let second = registry.create(CreatePlaylist::new("Mix").id(5));
    /// assert_eq!(second.name(), "Mix 1");
    /// assert_eq!(second.id(), 5);
    /// ```
    pub fn create(&mut self, request: impl Into<CreatePlaylist>) -> &Playlist {
        let request = request.into();
        let mut playlist = Playlist::new(request.name);
        playlist.set_id(request.id);
        if request.owner_id > 0 {
            playlist.set_owner(request.owner_id, "");
        }

        let index = self.register(playlist);
        let name = self.playlists[index].name().to_string();
        info!(playlist = %name, id = request.id, "Created playlist");
        if request.announce {
            self.events.push(PlaylistEvent::Created {
                name,
                interactive: request.interactive,
            });
        }
        &self.playlists[index]
    }

    /// Create a playlist owned by the current user
    pub fn create_owned(&mut self, name: &str, interactive: bool) -> &Playlist {
        let mut request = CreatePlaylist::new(name).owner(self.settings.current_user_id.unwrap_or(0));
        request.interactive = interactive;
        self.create(request)
    }

    /// Create a dynamic playlist and fill it from the pool
    ///
    /// `Created` is queued (as interactive) after the initial membership
    /// change.
    pub fn create_dynamic(&mut self, name: &str, filter: &str) -> &Playlist {
        let index = self.register(Playlist::new(name));
        self.playlists[index].set_filter(Some(filter.to_string()));
        let change = self.playlists[index].refresh(self.pool.tracks());
        self.emit_tracks_changed(index, change);

        let name = self.playlists[index].name().to_string();
        info!(playlist = %name, filter, "Created dynamic playlist");
        self.events.push(PlaylistEvent::Created {
            name,
            interactive: true,
        });
        &self.playlists[index]
    }

    /// Remove a playlist and hand it back
    ///
    /// `Removed` is queued before the playlist is unlinked.
    pub fn remove(&mut self, key: impl Into<PlaylistKey>) -> Option<Playlist> {
        let index = self.resolve(key, "remove")?;
        let name = self.playlists[index].name().to_string();

        self.events.push(PlaylistEvent::Removed { name: name.clone() });
        let removed = self.playlists.remove(index);
        if self.current_playlist.as_deref() == Some(name.as_str()) {
            self.current_playlist = None;
        }
        info!(playlist = %name, "Removed playlist");
        Some(removed)
    }

    /// Adopt a persisted set of playlists
    ///
    /// Replaces whatever is registered, queues `Created` for each playlist
    /// and resolves the current playlist from the active navigation entry.
    /// Navigation entries pointing at playlists that no longer exist fall
    /// back to the default navigation.
    pub fn initialize(&mut self, playlists: Vec<Playlist>) {
        self.playlists.clear();
        self.current_playlist = None;

        for mut playlist in playlists {
            playlist.set_current_user(self.settings.current_user_id);
            self.events.push(PlaylistEvent::Created {
                name: playlist.name().to_string(),
                interactive: false,
            });
            self.playlists.push(playlist);
        }

        if self.settings.active_navigation.starts_with(NAVIGATION_PREFIX) {
            match self.get_active().map(|p| p.name().to_string()) {
                Some(name) => self.current_playlist = Some(name),
                None => {
                    warn!(
                        navigation = %self.settings.active_navigation,
                        "Active playlist is gone, falling back"
                    );
                    self.settings.active_navigation = self.settings.default_navigation.clone();
                }
            }
        }

        if self.settings.selected_navigation.starts_with(NAVIGATION_PREFIX)
            && self.get_selected().is_none()
        {
            warn!(
                navigation = %self.settings.selected_navigation,
                "Selected playlist is gone, falling back"
            );
            self.settings.selected_navigation = self.settings.default_navigation.clone();
        }

        info!(count = self.playlists.len(), "Initialized playlists");
    }

    // ===== Membership =====

    /// Add tracks to a playlist at `pos` (the end when `None`)
    pub fn add_to_playlist(
        &mut self,
        tracks: &[TrackRef],
        key: impl Into<PlaylistKey>,
        pos: Option<usize>,
    ) -> TrackChange {
        let Some(index) = self.resolve(key, "add") else {
            return TrackChange::default();
        };
        let change = self.playlists[index].add(tracks, pos);
        self.emit_tracks_changed(index, change)
    }

    /// Remove tracks from a playlist
    pub fn remove_from_playlist(
        &mut self,
        tracks: &[TrackRef],
        key: impl Into<PlaylistKey>,
    ) -> TrackChange {
        let Some(index) = self.resolve(key, "remove tracks") else {
            return TrackChange::default();
        };
        let change = self.playlists[index].remove(tracks);
        self.emit_tracks_changed(index, change)
    }

    /// Refresh a dynamic playlist against `candidates`, or the whole pool
    pub fn refresh(
        &mut self,
        key: impl Into<PlaylistKey>,
        candidates: Option<&[TrackRef]>,
    ) -> TrackChange {
        let Some(index) = self.resolve(key, "refresh") else {
            return TrackChange::default();
        };
        let change = match candidates {
            Some(candidates) => self.playlists[index].refresh(candidates),
            None => self.playlists[index].refresh(self.pool.tracks()),
        };
        self.emit_tracks_changed(index, change)
    }

    /// Change a playlist's filter and refresh it against the pool
    ///
    /// A blank filter turns the playlist back into a standard one and keeps
    /// its members.
    pub fn set_filter(&mut self, key: impl Into<PlaylistKey>, filter: Option<&str>) -> TrackChange {
        let Some(index) = self.resolve(key, "set filter") else {
            return TrackChange::default();
        };
        if !self.playlists[index].set_filter(filter.map(str::to_string)) {
            return TrackChange::default();
        }
        self.emit_property_changed(index, PlaylistProperty::Filter);

        if self.playlists[index].playlist_type() == PlaylistType::Standard {
            return TrackChange::default();
        }
        let change = self.playlists[index].refresh(self.pool.tracks());
        self.emit_tracks_changed(index, change)
    }

    // ===== Metadata =====

    /// Set the cloud identifier
    pub fn set_cloud_id(&mut self, key: impl Into<PlaylistKey>, id: u32) -> bool {
        let Some(index) = self.resolve(key, "set id") else {
            return false;
        };
        if !self.playlists[index].set_id(id) {
            return false;
        }
        self.emit_property_changed(index, PlaylistProperty::Id);
        true
    }

    /// Set owner information, stamping the cache time
    pub fn set_owner(
        &mut self,
        key: impl Into<PlaylistKey>,
        owner_id: u32,
        owner_name: &str,
    ) -> bool {
        let Some(index) = self.resolve(key, "set owner") else {
            return false;
        };
        self.playlists[index].set_owner(owner_id, owner_name);
        self.emit_property_changed(index, PlaylistProperty::Owner);
        true
    }

    /// Edit a playlist's list view state
    pub fn update_list_config(
        &mut self,
        key: impl Into<PlaylistKey>,
        edit: impl FnOnce(&mut ListViewConfig),
    ) -> bool {
        let Some(index) = self.resolve(key, "update list config") else {
            return false;
        };
        let before = self.playlists[index].list_config().clone();
        edit(self.playlists[index].list_config_mut());
        if *self.playlists[index].list_config() == before {
            return false;
        }
        self.emit_property_changed(index, PlaylistProperty::ListConfig);
        true
    }

    /// Change the signed-in user for the foreign-ownership check
    pub fn set_current_user(&mut self, user_id: Option<u32>) {
        self.settings.current_user_id = user_id;
        for playlist in &mut self.playlists {
            playlist.set_current_user(user_id);
        }
    }

    // ===== Pool =====

    /// Add tracks to the pool and refresh dynamic playlists with the new ones
    ///
    /// Returns how many tracks were new to the pool.
    pub fn extend_pool(&mut self, tracks: Vec<TrackRef>) -> usize {
        let added = self.pool.extend(tracks);
        if added.is_empty() {
            return 0;
        }
        debug!(count = added.len(), "Pool grew, refreshing dynamic playlists");
        for index in self.dynamic_indices() {
            let change = self.playlists[index].refresh(&added);
            self.emit_tracks_changed(index, change);
        }
        added.len()
    }

    /// Swap the whole pool and fully refresh every dynamic playlist
    ///
    /// Dynamic members that are not in the new pool are dropped before the
    /// refresh.
    pub fn replace_pool(&mut self, tracks: Vec<TrackRef>) {
        self.pool.replace(tracks);
        info!(count = self.pool.len(), "Pool replaced, refreshing dynamic playlists");
        for index in self.dynamic_indices() {
            let departed: Vec<TrackRef> = self.playlists[index]
                .tracks()
                .iter()
                .filter(|t| self.pool.find(&t.path).is_none())
                .cloned()
                .collect();
            let mut change = self.playlists[index].remove(&departed);
            change.merge(self.playlists[index].refresh(self.pool.tracks()));
            self.emit_tracks_changed(index, change);
        }
    }

    /// Drop tracks from the pool and from every dynamic playlist
    ///
    /// Standard playlists keep their members.
    pub fn remove_from_pool(&mut self, tracks: &[TrackRef]) -> usize {
        let removed = self.pool.remove(tracks);
        if removed.is_empty() {
            return 0;
        }
        for index in self.dynamic_indices() {
            let change = self.playlists[index].remove(&removed);
            self.emit_tracks_changed(index, change);
        }
        removed.len()
    }

    fn dynamic_indices(&self) -> Vec<usize> {
        self.playlists
            .iter()
            .enumerate()
            .filter(|(_, p)| p.playlist_type() == PlaylistType::Dynamic)
            .map(|(i, _)| i)
            .collect()
    }

    // ===== Persistence =====

    /// Whether some adapter accepts `path`
    pub fn is_supported(&self, path: &str) -> bool {
        self.parsers.is_supported(path)
    }

    /// Read playlists from `path` without registering them
    ///
    /// Failures are reported through the event queue and give an empty
    /// list.
    pub fn parse(&mut self, path: &str, resolve_metadata: bool) -> Vec<Playlist> {
        match self.parsers.try_parse(path, resolve_metadata) {
            Ok(playlists) => playlists,
            Err(e) => {
                self.report_failure("parse", &e);
                Vec::new()
            }
        }
    }

    /// Read playlists from `path` and register them
    ///
    /// Members the pool knows are swapped for the pool's copy. Returns the
    /// registered names, which may differ from the names in the file.
    pub fn load(&mut self, path: &str) -> Vec<String> {
        let mut names = Vec::new();
        for mut playlist in self.parse(path, true) {
            playlist.resolve_with(&self.pool);
            let index = self.register(playlist);
            let name = self.playlists[index].name().to_string();
            self.events.push(PlaylistEvent::Created {
                name: name.clone(),
                interactive: false,
            });
            names.push(name);
        }
        info!(path, count = names.len(), "Loaded playlists");
        names
    }

    /// Write a playlist to `path`
    ///
    /// Failures are returned and also reported through the event queue.
    pub fn save(&mut self, key: impl Into<PlaylistKey>, path: &str) -> Result<()> {
        let key = key.into();
        let result = match self.index_for(&key) {
            Some(index) => self.parsers.save(&self.playlists[index], path),
            None => Err(CadenceError::not_found(key.to_string())),
        };
        if let Err(e) = &result {
            self.report_failure("save", e);
        }
        result
    }

    // ===== Event helpers =====

    fn emit_tracks_changed(&mut self, index: usize, change: TrackChange) -> TrackChange {
        if change.is_empty() {
            return change;
        }
        let playlist = &self.playlists[index];
        self.events.push(PlaylistEvent::TracksChanged {
            name: playlist.name().to_string(),
            change: change.clone(),
            time: playlist.time(),
        });
        change
    }

    fn emit_property_changed(&mut self, index: usize, property: PlaylistProperty) {
        self.events.push(PlaylistEvent::PropertyChanged {
            name: self.playlists[index].name().to_string(),
            property,
        });
    }

    fn report_failure(&mut self, context: &str, error: &CadenceError) {
        warn!(context, error = %error, "Playlist operation failed");
        self.events.push(PlaylistEvent::Failure {
            context: context.to_string(),
            message: error.to_string(),
        });
    }
}

impl Default for PlaylistRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default(), ParserSet::with_defaults())
    }
}
