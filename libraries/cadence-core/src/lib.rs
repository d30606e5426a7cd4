//! Cadence Core
//!
//! Platform-agnostic types and error handling shared by the Cadence crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackRef` (the track identity a playlist holds) and
//!   `ListViewConfig` (opaque list-view state carried by every playlist)
//! - **Query Matching**: the filter language used by dynamic playlists
//! - **Text Helpers**: blank checks and XML-safe name cleaning
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{track_matches_query, TrackRef};
//!
//! let track = TrackRef::new("/music/insane.mp3")
//!     .with_title("Insane")
//!     .with_artist("Eminem")
//!     .with_duration(181.0);
//!
//! assert!(track_matches_query(&track, "emin"));
//! assert!(!track_matches_query(&track, "foo insane"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod query;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use query::track_matches_query;
pub use text::{clean_xml_text, is_blank};
pub use types::{ListColumn, ListViewConfig, TrackRef};
