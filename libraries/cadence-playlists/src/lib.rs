//! Cadence Playlists
//!
//! Playlist membership and synchronization for Cadence.
//!
//! # Features
//!
//! - **Standard playlists**: ordered, duplicate-free track lists edited by hand
//! - **Dynamic playlists**: membership computed from a filter over the track
//!   pool and kept current as the pool changes
//! - **Unique naming**: blank, taken and reserved names are resolved on
//!   create and rename
//! - **Format adapters**: PLS and M3U built in, more can be registered
//! - **Event queue**: every change is queued as a [`PlaylistEvent`] for
//!   observers to drain
//!
//! # Example
//!
//! ```rust
//! use cadence_core::TrackRef;
//! use cadence_playlists::{ParserSet, PlaylistEvent, PlaylistRegistry, RegistrySettings};
//!
//! let mut registry = PlaylistRegistry::new(RegistrySettings::default(), ParserSet::with_defaults());
//! registry.replace_pool(vec![
//!     TrackRef::new("/music/insane.mp3").with_artist("Eminem").with_title("Insane"),
//!     TrackRef::new("/music/blue.mp3").with_artist("Miles Davis").with_title("Blue"),
//! ]);
//!
//! let rap = registry.create_dynamic("Rap", "eminem");
//! assert_eq!(rap.len(), 1);
//!
//! registry.extend_pool(vec![TrackRef::new("/music/stan.mp3").with_artist("Eminem")]);
//! assert_eq!(registry.get("Rap").unwrap().len(), 2);
//!
//! let events = registry.drain_events();
//! assert!(events.iter().any(|e| matches!(e, PlaylistEvent::Created { interactive: true, .. })));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod events;
pub mod parser;
pub mod parsers;
pub mod playlist;
pub mod pool;
pub mod registry;
pub mod types;

// Re-export main types
pub use self::config::{RegistrySettings, SearchPolicy};
pub use events::{PlaylistEvent, PlaylistProperty};
pub use parser::{ParserSet, PlaylistParser};
pub use parsers::{M3uParser, PlsParser};
pub use playlist::Playlist;
pub use pool::TrackPool;
pub use registry::PlaylistRegistry;
pub use types::{CreatePlaylist, PlaylistKey, PlaylistType, TrackChange};
