use super::{create_local, has_extension, playlist_name, read_local, resolve_entry};
use crate::parser::PlaylistParser;
use crate::playlist::Playlist;
use cadence_core::{is_blank, CadenceError, Result, TrackRef};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::warn;

const NAME: &str = "pls";

/// Shoutcast/Winamp `.pls` playlists
///
/// ```text
/// [playlist]
/// File1=/music/one.mp3
/// Title1=One
/// Length1=181
/// NumberOfEntries=1
/// Version=2
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlsParser;

#[derive(Debug, Default)]
struct Entry {
    file: Option<String>,
    title: String,
    length: f64,
}

impl PlsParser {
    fn parse_content(path: &str, content: &str) -> Result<Playlist> {
        let mut has_header = false;
        let mut declared = 0usize;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            let lower = line.to_ascii_lowercase();
            if lower == "[playlist]" {
                has_header = true;
            } else if !has_header {
                if !line.is_empty() {
                    warn!(path, line = line_no + 1, "Expecting '[playlist]', skipping line");
                }
            } else if let Some(value) = lower.strip_prefix("numberofentries=") {
                declared = value.trim().parse().map_err(|_| {
                    CadenceError::parse(NAME, path, format!("invalid NumberOfEntries on line {}", line_no + 1))
                })?;
            }
        }

        if !has_header {
            return Err(CadenceError::parse(NAME, path, "No header found"));
        }

        let mut entries: BTreeMap<usize, Entry> = BTreeMap::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            let lower = line.to_ascii_lowercase();
            let (prefix_len, field) = if lower.starts_with("file") {
                (4, Field::File)
            } else if lower.starts_with("title") {
                (5, Field::Title)
            } else if lower.starts_with("length") {
                (6, Field::Length)
            } else {
                if !line.is_empty()
                    && lower != "[playlist]"
                    && !lower.starts_with("numberofentries=")
                    && !lower.starts_with("version=")
                {
                    warn!(path, line = line_no + 1, "Unexpected line, skipping");
                }
                continue;
            };

            let Some((key, value)) = line.split_once('=') else {
                warn!(path, line = line_no + 1, "Expecting '=', skipping line");
                continue;
            };
            let number: usize = key[prefix_len..].trim().parse().map_err(|_| {
                CadenceError::parse(NAME, path, format!("invalid entry number on line {}", line_no + 1))
            })?;
            if number == 0 || number > declared {
                warn!(path, line = line_no + 1, number, "Entry number out of range, skipping");
                continue;
            }

            let entry = entries.entry(number).or_default();
            match field {
                Field::File => entry.file = Some(value.trim().to_string()),
                Field::Title => entry.title = value.trim().to_string(),
                Field::Length => entry.length = value.trim().parse::<f64>().unwrap_or(0.0).max(0.0),
            }
        }

        let tracks = entries
            .into_values()
            .filter_map(|entry| {
                let file = entry.file.filter(|f| !is_blank(f))?;
                Some(
                    TrackRef::new(resolve_entry(path, &file))
                        .with_title(entry.title)
                        .with_duration(entry.length),
                )
            })
            .collect();

        Ok(Playlist::with_tracks(playlist_name(path), tracks))
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    File,
    Title,
    Length,
}

impl PlaylistParser for PlsParser {
    fn name(&self) -> &str {
        NAME
    }

    fn supports(&self, path: &str) -> bool {
        has_extension(path, &["pls"])
    }

    fn read(&self, path: &str, _resolve_metadata: bool) -> Result<Vec<Playlist>> {
        let content = read_local(NAME, path)?;
        Ok(vec![Self::parse_content(path, &content)?])
    }

    fn write(&self, playlist: &Playlist, path: &str) -> Result<()> {
        let mut out = create_local(NAME, path)?;
        let io = |e: std::io::Error| CadenceError::parse(NAME, path, e.to_string());

        writeln!(out, "[playlist]").map_err(io)?;
        writeln!(out).map_err(io)?;
        for (index, track) in playlist.tracks().iter().enumerate() {
            let n = index + 1;
            writeln!(out, "File{n}={}", track.path).map_err(io)?;
            writeln!(out, "Title{n}={}", track.title).map_err(io)?;
            writeln!(out, "Length{n}={}", track.duration.max(0.0) as i64).map_err(io)?;
            writeln!(out).map_err(io)?;
        }
        writeln!(out, "NumberOfEntries={}", playlist.len()).map_err(io)?;
        writeln!(out, "Version=2").map_err(io)?;
        out.flush().map_err(io)
    }
}
