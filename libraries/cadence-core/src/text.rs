//! Text helpers shared by name handling and query matching

/// True for empty strings and strings made only of whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when both values are blank, or when they are exactly equal.
///
/// Used for track identity: two tracks with no usable path are the same track.
pub fn same_text(a: &str, b: &str) -> bool {
    (is_blank(a) && is_blank(b)) || a == b
}

/// Strip characters that are not allowed in XML 1.0 documents.
///
/// Playlist names end up in XML-based playlist formats and settings files,
/// so every name passes through here before it is stored.
pub fn clean_xml_text(value: &str) -> String {
    value.chars().filter(|c| is_xml_char(*c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x1_0000..=0x10_FFFF
    )
}
