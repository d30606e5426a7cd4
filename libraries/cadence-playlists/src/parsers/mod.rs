//! Built-in format adapters
//!
//! Both adapters read local files only. Entries are kept in file order;
//! relative entries are resolved against the playlist's directory when the
//! combined path exists. The playlist is named after the file stem.

mod m3u;
mod pls;

pub use m3u::M3uParser;
pub use pls::PlsParser;

use cadence_core::{CadenceError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Case-insensitive extension check
fn has_extension(path: &str, extensions: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| ext.eq_ignore_ascii_case(x)))
}

fn is_remote(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Read a local playlist file into memory
fn read_local(parser: &str, path: &str) -> Result<String> {
    if is_remote(path) {
        return Err(CadenceError::parse(
            parser,
            path,
            "remote playlists are not fetched",
        ));
    }
    std::fs::read_to_string(path).map_err(|e| CadenceError::parse(parser, path, e.to_string()))
}

fn create_local(parser: &str, path: &str) -> Result<BufWriter<File>> {
    if is_remote(path) {
        return Err(CadenceError::parse(
            parser,
            path,
            "cannot write to a remote location",
        ));
    }
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CadenceError::parse(parser, path, e.to_string()))
}

/// Name a playlist after the file it came from
fn playlist_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Resolve a playlist entry relative to the playlist's directory
fn resolve_entry(playlist_path: &str, entry: &str) -> String {
    if is_remote(entry) || Path::new(entry).is_absolute() {
        return entry.to_string();
    }
    match Path::new(playlist_path).parent() {
        Some(dir) => {
            let joined = dir.join(entry);
            if joined.exists() {
                joined.to_string_lossy().into_owned()
            } else {
                entry.to_string()
            }
        }
        None => entry.to_string(),
    }
}
