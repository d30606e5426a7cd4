//! Playlist Events
//!
//! Events queued by the registry for observers such as the navigation tree
//! or a sync client. Events are emitted at key points:
//! - Playlists created, removed or renamed
//! - Membership changes (add, remove, refresh)
//! - Metadata edits (filter, ownership, list view state)
//! - Failures in load and save that are reported instead of raised
//!
//! The registry never calls out to observers; callers drain the queue after
//! each operation.

use crate::types::TrackChange;
use serde::{Deserialize, Serialize};

/// Events emitted by the playlist registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaylistEvent {
    /// A playlist joined the registry
    Created {
        /// Name of the new playlist
        name: String,
        /// Whether a user action created it (e.g. to start inline editing)
        interactive: bool,
    },

    /// A playlist is about to leave the registry
    ///
    /// Queued before the playlist is unlinked.
    Removed {
        /// Name of the removed playlist
        name: String,
    },

    /// A playlist was renamed
    Renamed {
        /// Name before the rename
        old_name: String,
        /// Name after the rename
        new_name: String,
    },

    /// Membership changed
    TracksChanged {
        /// Playlist whose tracks changed
        name: String,
        /// What was added, moved and removed
        change: TrackChange,
        /// Aggregate time after the change, in seconds
        time: f64,
    },

    /// A metadata field changed
    PropertyChanged {
        /// Playlist that changed
        name: String,
        /// Which field
        property: PlaylistProperty,
    },

    /// An operation failed and was reported rather than raised
    Failure {
        /// Operation that failed, e.g. `parse` or `save`
        context: String,
        /// Human-readable reason
        message: String,
    },
}

/// Playlist fields announced through [`PlaylistEvent::PropertyChanged`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistProperty {
    /// Cloud identifier
    Id,
    /// Owner id, owner name and cache time
    Owner,
    /// Dynamic filter
    Filter,
    /// List view state
    ListConfig,
}

impl PlaylistEvent {
    /// Name of the playlist the event is about, if any
    pub fn playlist_name(&self) -> Option<&str> {
        match self {
            Self::Created { name, .. }
            | Self::Removed { name }
            | Self::TracksChanged { name, .. }
            | Self::PropertyChanged { name, .. } => Some(name),
            Self::Renamed { new_name, .. } => Some(new_name),
            Self::Failure { .. } => None,
        }
    }
}

/// FIFO of events waiting to be drained
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    pending: Vec<PlaylistEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: PlaylistEvent) {
        self.pending.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaylistEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue_in_order() {
        let mut queue = EventQueue::default();
        queue.push(PlaylistEvent::Removed { name: "a".into() });
        queue.push(PlaylistEvent::Created {
            name: "b".into(),
            interactive: false,
        });

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].playlist_name(), Some("a"));
        assert!(queue.is_empty());
    }

    #[test]
    fn renamed_reports_the_new_name() {
        let event = PlaylistEvent::Renamed {
            old_name: "Old".into(),
            new_name: "New".into(),
        };
        assert_eq!(event.playlist_name(), Some("New"));

        let failure = PlaylistEvent::Failure {
            context: "save".into(),
            message: "disk full".into(),
        };
        assert_eq!(failure.playlist_name(), None);
    }

    #[test]
    fn events_serialize_with_variant_names() {
        let json = serde_json::to_string(&PlaylistEvent::PropertyChanged {
            name: "Mix".into(),
            property: PlaylistProperty::Filter,
        })
        .unwrap();
        assert!(json.contains("PropertyChanged"));
        assert!(json.contains("Filter"));
    }
}
