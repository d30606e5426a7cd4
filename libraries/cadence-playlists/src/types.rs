//! Playlist types
//!
//! Small value types shared by the playlist entity, the registry and the
//! events they produce.

use serde::{Deserialize, Serialize};

/// Prefix of navigation identifiers that point at a playlist
pub const NAVIGATION_PREFIX: &str = "Playlist:";

/// Kind of playlist, derived from its filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistType {
    /// Membership is edited by hand
    Standard,
    /// Membership is computed from a filter over the track pool
    Dynamic,
}

/// Summary of what a single mutation did to a playlist's membership
///
/// Each list holds track paths in the order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackChange {
    /// Tracks that became members
    pub added: Vec<String>,
    /// Existing members that were repositioned
    pub moved: Vec<String>,
    /// Tracks that stopped being members
    pub removed: Vec<String>,
}

impl TrackChange {
    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }

    /// Append another change after this one
    pub fn merge(&mut self, other: TrackChange) {
        self.added.extend(other.added);
        self.moved.extend(other.moved);
        self.removed.extend(other.removed);
    }
}

/// How a registry operation addresses a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistKey {
    /// Exact, case-sensitive name
    Name(String),
    /// Cloud identifier; zero never matches
    Id(u32),
}

impl From<&str> for PlaylistKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PlaylistKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for PlaylistKey {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<u32> for PlaylistKey {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}

/// Request to create a playlist in the registry
///
/// ```rust
/// use cadence_playlists::CreatePlaylist;
///
/// let request = CreatePlaylist::new("Road Trip").id(42).owner(7).interactive();
/// assert_eq!(request.id, 42);
/// assert!(request.interactive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaylist {
    /// Requested name, resolved to a unique one on creation
    pub name: String,
    /// Cloud identifier, zero for local playlists
    pub id: u32,
    /// Owning user, zero for unowned playlists
    pub owner_id: u32,
    /// Whether the creation came from a direct user action
    pub interactive: bool,
    /// Whether a `Created` event is announced
    pub announce: bool,
}

impl CreatePlaylist {
    /// Create a request for a local, unowned playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: 0,
            owner_id: 0,
            interactive: false,
            announce: true,
        }
    }

    /// Set the cloud identifier
    #[must_use]
    pub fn id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Set the owning user
    #[must_use]
    pub fn owner(mut self, owner_id: u32) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Mark the creation as user-initiated
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Do not announce the creation
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.announce = false;
        self
    }
}

impl From<&str> for CreatePlaylist {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CreatePlaylist {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
