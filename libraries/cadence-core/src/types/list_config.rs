/// List view configuration carried by playlists and the track pool
use serde::{Deserialize, Serialize};

/// State of the list view that displays a collection of tracks
///
/// The playlist engine treats this as opaque: it is stored, copied and
/// passed through, and edits to it are announced, but its contents never
/// influence membership. The one field the engine reads is `search_filter`,
/// which is seeded according to the search policy when a playlist is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListViewConfig {
    /// Columns shown by the view, in display order
    pub columns: Vec<ListColumn>,

    /// Sort keys, most significant first (e.g. `asc:Artist`)
    pub sorts: Vec<String>,

    /// Indices of the selected rows
    pub selected_indices: Vec<u32>,

    /// Text typed into the view's search box
    pub search_filter: String,

    /// Vertical scroll position
    pub vertical_scroll_offset: f64,
}

/// A single column of a list view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListColumn {
    /// Track field bound to the column
    pub name: String,

    /// Header text
    pub text: String,

    /// Width in pixels
    pub width: f64,

    /// Whether the column is shown
    pub visible: bool,
}

impl ListViewConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty configuration with a preset search filter
    pub fn with_search_filter(filter: impl Into<String>) -> Self {
        Self {
            search_filter: filter.into(),
            ..Self::default()
        }
    }
}
