//! Playlist format adapters
//!
//! A [`PlaylistParser`] reads and writes one playlist file format. A
//! [`ParserSet`] holds adapters in priority order and picks among them:
//! every adapter whose `supports` accepts a path is tried in turn and the
//! first success wins.

use crate::parsers::{M3uParser, PlsParser};
use crate::playlist::Playlist;
use cadence_core::{CadenceError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Reads and writes one playlist file format
///
/// Implementations must be stateless with respect to the registry: they
/// produce and consume plain [`Playlist`] values and never see other
/// playlists.
pub trait PlaylistParser: Send + Sync {
    /// Short name used in logs and errors, e.g. `pls`
    fn name(&self) -> &str;

    /// Whether this adapter handles `path`, usually by extension
    fn supports(&self, path: &str) -> bool;

    /// Read every playlist stored at `path`
    ///
    /// `resolve_metadata` asks the adapter to look up missing track
    /// metadata where it knows how to.
    fn read(&self, path: &str, resolve_metadata: bool) -> Result<Vec<Playlist>>;

    /// Write `playlist` to `path`; the location may be assumed absent
    fn write(&self, playlist: &Playlist, path: &str) -> Result<()>;
}

/// Ordered collection of format adapters
pub struct ParserSet {
    parsers: Vec<Box<dyn PlaylistParser>>,
}

impl ParserSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Create a set with the built-in adapters: PLS, then M3U
    pub fn with_defaults() -> Self {
        Self::new().with_parser(PlsParser).with_parser(M3uParser)
    }

    /// Append an adapter at the lowest priority
    #[must_use]
    pub fn with_parser(mut self, parser: impl PlaylistParser + 'static) -> Self {
        self.register(Box::new(parser));
        self
    }

    /// Append an adapter at the lowest priority
    pub fn register(&mut self, parser: Box<dyn PlaylistParser>) {
        debug!(parser = parser.name(), "Registered playlist parser");
        self.parsers.push(parser);
    }

    /// Number of adapters
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// True when no adapter is registered
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Adapter names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    /// Adapters that accept `path`, in priority order
    pub fn parsers_for<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a dyn PlaylistParser> + 'a {
        self.parsers
            .iter()
            .map(|p| &**p)
            .filter(move |p| p.supports(path))
    }

    /// Whether any adapter accepts `path`
    pub fn is_supported(&self, path: &str) -> bool {
        self.parsers_for(path).next().is_some()
    }

    /// Read `path` with the first adapter that succeeds
    ///
    /// Adapter failures are logged and the next candidate is tried. Fails
    /// with [`CadenceError::NoParser`] when no candidate succeeds.
    pub fn try_parse(&self, path: &str, resolve_metadata: bool) -> Result<Vec<Playlist>> {
        debug!(path, "Looking for playlist parser");
        for parser in self.parsers_for(path) {
            match parser.read(path, resolve_metadata) {
                Ok(playlists) => {
                    debug!(
                        parser = parser.name(),
                        path,
                        count = playlists.len(),
                        "Parsed playlist file"
                    );
                    return Ok(playlists);
                }
                Err(e) => {
                    warn!(parser = parser.name(), path, error = %e, "Parser could not read playlist");
                }
            }
        }
        Err(CadenceError::no_parser(path))
    }

    /// Read `path`, returning an empty list when no adapter succeeds
    pub fn parse(&self, path: &str, resolve_metadata: bool) -> Vec<Playlist> {
        self.try_parse(path, resolve_metadata).unwrap_or_else(|e| {
            warn!(path, error = %e, "Returning no playlists");
            Vec::new()
        })
    }

    /// Write `playlist` to `path` with the first adapter that succeeds
    ///
    /// Before each attempt an existing file at `path` is deleted, so a
    /// failed write can leave nothing behind. Fails with
    /// [`CadenceError::NoParser`] when no adapter accepts the path and with
    /// [`CadenceError::Persistence`] when every candidate failed.
    pub fn save(&self, playlist: &Playlist, path: &str) -> Result<()> {
        let mut last_error = None;

        for parser in self.parsers_for(path) {
            let target = Path::new(path);
            if target.exists() {
                if let Err(e) = std::fs::remove_file(target) {
                    debug!(parser = parser.name(), path, error = %e, "Could not clear existing file");
                    last_error = Some(e.to_string());
                    continue;
                }
            }

            match parser.write(playlist, path) {
                Ok(()) => {
                    debug!(parser = parser.name(), playlist = playlist.name(), path, "Saved playlist");
                    return Ok(());
                }
                Err(e) => {
                    debug!(parser = parser.name(), path, error = %e, "Parser is not appropriate");
                    last_error = Some(e.to_string());
                }
            }
        }

        match last_error {
            Some(reason) => {
                warn!(path, %reason, "Could not save playlist");
                Err(CadenceError::persistence(path, reason))
            }
            None => {
                warn!(path, "Could not find appropriate parser");
                Err(CadenceError::no_parser(path))
            }
        }
    }
}

impl Default for ParserSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ParserSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserSet")
            .field("parsers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_pls_then_m3u() {
        let set = ParserSet::with_defaults();
        assert_eq!(set.names(), vec!["pls", "m3u"]);
        assert!(set.is_supported("/tmp/a.PLS"));
        assert!(set.is_supported("/tmp/a.m3u8"));
        assert!(!set.is_supported("/tmp/a.xspf"));
    }

    #[test]
    fn empty_set_reports_no_parser() {
        let set = ParserSet::new();
        assert!(set.is_empty());
        assert!(set.parse("/tmp/a.pls", false).is_empty());
        assert!(matches!(
            set.save(&Playlist::new("x"), "/tmp/a.pls"),
            Err(CadenceError::NoParser { .. })
        ));
    }
}
