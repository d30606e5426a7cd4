use super::{create_local, has_extension, playlist_name, read_local, resolve_entry};
use crate::parser::PlaylistParser;
use crate::playlist::Playlist;
use cadence_core::{CadenceError, Result, TrackRef};
use std::io::Write;
use tracing::warn;

const NAME: &str = "m3u";

/// Plain and extended `.m3u` / `.m3u8` playlists
///
/// Extended playlists start with `#EXTM3U` and describe each entry with an
/// `#EXTINF:{seconds},{artist} - {title}` line before its path.
#[derive(Debug, Clone, Copy, Default)]
pub struct M3uParser;

impl M3uParser {
    fn parse_content(path: &str, content: &str) -> Playlist {
        let mut extended = false;
        let mut info: Option<String> = None;
        let mut tracks = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim().trim_start_matches('\u{feff}');
            let lower = line.to_ascii_lowercase();

            if lower == "#extm3u" {
                extended = true;
                continue;
            }
            if extended && lower.starts_with("#extinf:") {
                info = Some(line["#extinf:".len()..].to_string());
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut track = TrackRef::new(resolve_entry(path, line));
            if let Some(info) = info.take() {
                let Some((length, description)) = info.split_once(',') else {
                    warn!(path, line = line_no + 1, "Expecting ',' in #EXTINF, skipping entry");
                    continue;
                };
                let (artist, title) = split_description(description);
                track = track
                    .with_artist(artist)
                    .with_title(title)
                    .with_duration(length.trim().parse::<f64>().unwrap_or(0.0).max(0.0));
            }
            tracks.push(track);
        }

        Playlist::with_tracks(playlist_name(path), tracks)
    }
}

/// Split `Artist - Title`; a description without a dash is all title
fn split_description(description: &str) -> (&str, &str) {
    match description
        .split_once(" - ")
        .or_else(|| description.split_once('-'))
    {
        Some((artist, title)) => (artist.trim(), title.trim()),
        None => ("", description.trim()),
    }
}

impl PlaylistParser for M3uParser {
    fn name(&self) -> &str {
        NAME
    }

    fn supports(&self, path: &str) -> bool {
        has_extension(path, &["m3u", "m3u8"])
    }

    fn read(&self, path: &str, _resolve_metadata: bool) -> Result<Vec<Playlist>> {
        let content = read_local(NAME, path)?;
        Ok(vec![Self::parse_content(path, &content)])
    }

    fn write(&self, playlist: &Playlist, path: &str) -> Result<()> {
        let mut out = create_local(NAME, path)?;
        let io = |e: std::io::Error| CadenceError::parse(NAME, path, e.to_string());

        writeln!(out, "#EXTM3U").map_err(io)?;
        writeln!(out).map_err(io)?;
        for track in playlist.tracks() {
            writeln!(
                out,
                "#EXTINF:{},{} - {}",
                track.duration.max(0.0) as i64,
                track.artist,
                track.title
            )
            .map_err(io)?;
            writeln!(out, "{}", track.path).map_err(io)?;
            writeln!(out).map_err(io)?;
        }
        out.flush().map_err(io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extended_entries() {
        let content = "#EXTM3U\n\
            #EXTINF:181,Eminem - Insane\n\
            /music/insane.mp3\n\
            \n\
            #EXTINF:-1,Radio\n\
            http://radio.example/live\n";
        let playlist = M3uParser::parse_content("/lists/Mix.m3u", content);

        assert_eq!(playlist.name(), "Mix");
        assert_eq!(playlist.len(), 2);
        let first = &playlist.tracks()[0];
        assert_eq!(first.artist, "Eminem");
        assert_eq!(first.title, "Insane");
        assert_eq!(first.duration, 181.0);

        let second = &playlist.tracks()[1];
        assert_eq!(second.path, "http://radio.example/live");
        assert_eq!(second.title, "Radio");
        assert_eq!(second.duration, 0.0);
    }

    #[test]
    fn plain_playlists_are_just_paths() {
        let content = "/music/a.mp3\r\n# comment\r\n/music/b.mp3\r\n/music/a.mp3\r\n";
        let playlist = M3uParser::parse_content("/lists/plain.m3u8", content);

        let paths: Vec<_> = playlist.tracks().iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["/music/a.mp3", "/music/b.mp3"]);
    }

    #[test]
    fn extinf_without_comma_skips_its_entry() {
        let content = "#EXTM3U\n#EXTINF:abc\n/music/a.mp3\n#EXTINF:10,A - B\n/music/b.mp3\n";
        let playlist = M3uParser::parse_content("/lists/x.m3u", content);

        let paths: Vec<_> = playlist.tracks().iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["/music/b.mp3"]);
        assert_eq!(playlist.tracks()[0].title, "B");
    }

    #[test]
    fn extinf_without_header_is_a_comment() {
        let content = "#EXTINF:10,A - B\n/music/a.mp3\n";
        let playlist = M3uParser::parse_content("/lists/x.m3u", content);
        assert_eq!(playlist.tracks()[0].title, "");
    }

    #[test]
    fn descriptions_split_on_the_first_dash() {
        assert_eq!(split_description("A - B - C"), ("A", "B - C"));
        assert_eq!(split_description("AC-DC"), ("AC", "DC"));
        assert_eq!(split_description("Untitled"), ("", "Untitled"));
    }

    #[test]
    fn writes_the_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.m3u");
        let path = path.to_str().unwrap();

        let playlist = Playlist::with_tracks(
            "out",
            vec![TrackRef::new("/music/insane.mp3")
                .with_artist("Eminem")
                .with_title("Insane")
                .with_duration(181.9)],
        );
        M3uParser.write(&playlist, path).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            written,
            "#EXTM3U\n\n#EXTINF:181,Eminem - Insane\n/music/insane.mp3\n\n"
        );
    }
}
