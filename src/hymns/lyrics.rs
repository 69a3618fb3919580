//! Lyrics layout conventions.
//!
//! A line starting with `<digits>.` opens a new verse (the marker line is
//! kept as the first line of that verse). A line containing `CHORUS:`
//! (any case) opens the chorus block; everything after it belongs to the
//! chorus until the next verse marker.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLyrics {
    pub verses: Vec<String>,
    pub chorus: Option<String>,
}

/// Whether a trimmed line starts with a verse marker such as `1.` or `12.`.
#[must_use]
pub fn is_verse_marker(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}

fn is_chorus_marker(line: &str) -> bool {
    line.to_uppercase().contains("CHORUS:")
}

fn flush(current: &mut String, verses: &mut Vec<String>) {
    let verse = current.trim();
    if !verse.is_empty() {
        verses.push(verse.to_string());
    }
    current.clear();
}

/// Split raw lyrics into verses and an optional chorus.
#[must_use]
pub fn parse_lyrics(text: &str) -> ParsedLyrics {
    let mut verses = Vec::new();
    let mut chorus: Option<String> = None;
    let mut current = String::new();
    let mut in_chorus = false;

    for raw in text.lines() {
        let line = raw.trim();

        if is_verse_marker(line) {
            flush(&mut current, &mut verses);
            current.push_str(line);
            in_chorus = false;
        } else if is_chorus_marker(line) {
            flush(&mut current, &mut verses);
            chorus = Some(String::new());
            in_chorus = true;
        } else if in_chorus {
            if let Some(block) = chorus.as_mut() {
                if !block.is_empty() {
                    block.push('\n');
                }
                block.push_str(line);
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    flush(&mut current, &mut verses);

    let chorus = chorus
        .map(|block| block.trim_end().to_string())
        .filter(|block| !block.is_empty());

    ParsedLyrics { verses, chorus }
}

/// First non-empty line of the lyrics that is not a bare verse marker.
///
/// A marker line carrying text ("1. Amazing grace") is skipped as a whole,
/// matching how the marker convention is applied everywhere else.
#[must_use]
pub fn first_line(lyrics: &str) -> String {
    lyrics
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !is_verse_marker(line))
        .unwrap_or_default()
        .to_string()
}
