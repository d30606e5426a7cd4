//! Domain types

mod list_config;
mod track;

pub use list_config::{ListColumn, ListViewConfig};
pub use track::TrackRef;
