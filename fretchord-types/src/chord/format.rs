//! Chord-name formatting and the presentation helpers layered on top of it.

use crate::state::music::Note;

pub const NO_INPUT: &str = "play a chord";
pub const SINGLE_NOTE: &str = "single note";
pub const UNKNOWN_CHORD: &str = "unknown chord";
pub const NO_CHORD: &str = "no chord";

/// Informational phrases that are not chord names.
pub const FALLBACK_PHRASES: [&str; 4] = [NO_INPUT, SINGLE_NOTE, UNKNOWN_CHORD, NO_CHORD];

/// `root + suffix`, with the suffix's letters lowercased (`Maj7` renders as
/// `maj7`); digits and symbols pass through.
pub fn format_chord_name(root: Note, suffix: &str) -> String {
    let mut name = String::from(root.name());
    name.extend(suffix.chars().map(|c| c.to_ascii_lowercase()));
    name
}

pub fn is_fallback_phrase(label: &str) -> bool {
    let lowered = label.trim().to_lowercase();
    FALLBACK_PHRASES.contains(&lowered.as_str())
}

/// Whether a recognizer label names something worth storing.
pub fn is_savable_name(label: &str) -> bool {
    !label.trim().is_empty() && !is_fallback_phrase(label)
}

fn display_accidental(c: char) -> Option<char> {
    match c {
        '#' | '♯' => Some('♯'),
        'b' | '♭' => Some('♭'),
        _ => None,
    }
}

/// A note name split for display: letter and optional accidental glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNote {
    pub letter: char,
    pub accidental: Option<char>,
}

impl DisplayNote {
    /// Split a leading note name off `s`, returning it and the remainder.
    fn split(s: &str) -> Option<(DisplayNote, &str)> {
        let mut chars = s.char_indices();
        let (_, first) = chars.next()?;
        let letter = first.to_ascii_uppercase();
        if !('A'..='G').contains(&letter) {
            return None;
        }
        let rest = &s[first.len_utf8()..];
        match rest.chars().next().and_then(display_accidental) {
            Some(glyph) => {
                let skip = rest.chars().next().map_or(0, char::len_utf8);
                Some((
                    DisplayNote {
                        letter,
                        accidental: Some(glyph),
                    },
                    &rest[skip..],
                ))
            }
            None => Some((
                DisplayNote {
                    letter,
                    accidental: None,
                },
                rest,
            )),
        }
    }
}

impl std::fmt::Display for DisplayNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter)?;
        if let Some(glyph) = self.accidental {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

/// A recognizer label prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    /// Fallback phrase, shown lowercase as-is.
    Message(String),
    Chord {
        root: DisplayNote,
        suffix: String,
        bass: Option<DisplayNote>,
    },
}

impl DisplayName {
    /// Split a label (`C♯m7`, `G/B`, `Bb`, `unknown chord`) into display parts.
    /// Anything that does not start with a note letter is treated as a message.
    pub fn parse(label: &str) -> DisplayName {
        let label = label.trim();
        if label.is_empty() || is_fallback_phrase(label) {
            return DisplayName::Message(label.to_lowercase());
        }
        let (main, bass) = match label.split_once('/') {
            Some((main, bass)) => (main, Some(bass)),
            None => (label, None),
        };
        let Some((root, suffix)) = DisplayNote::split(main) else {
            return DisplayName::Message(label.to_lowercase());
        };
        let bass = bass.and_then(DisplayNote::split).map(|(note, _)| note);
        DisplayName::Chord {
            root,
            suffix: suffix.to_lowercase(),
            bass,
        }
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayName::Message(msg) => f.write_str(msg),
            DisplayName::Chord { root, suffix, bass } => {
                write!(f, "{}{}", root, suffix)?;
                if let Some(bass) = bass {
                    write!(f, "/{}", bass)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_lowercases_suffix_letters_only() {
        assert_eq!(format_chord_name(Note::C, ""), "C");
        assert_eq!(format_chord_name(Note::A, "m7"), "Am7");
        assert_eq!(format_chord_name(Note::F, "Maj7"), "Fmaj7");
        assert_eq!(format_chord_name(Note::Cs, "M7B5"), "C♯m7b5");
        assert_eq!(format_chord_name(Note::G, "5"), "G5");
    }

    #[test]
    fn fallback_phrases_are_lowercase() {
        for phrase in FALLBACK_PHRASES {
            assert_eq!(phrase, phrase.to_lowercase());
        }
    }

    #[test]
    fn savable_names() {
        assert!(is_savable_name("C"));
        assert!(is_savable_name("G/B"));
        assert!(!is_savable_name(""));
        assert!(!is_savable_name("  "));
        assert!(!is_savable_name("unknown chord"));
        assert!(!is_savable_name("Play a Chord"));
        assert!(!is_savable_name("no chord"));
        assert!(!is_savable_name("single note"));
    }

    #[test]
    fn display_plain_chord() {
        let d = DisplayName::parse("Am7");
        assert_eq!(
            d,
            DisplayName::Chord {
                root: DisplayNote {
                    letter: 'A',
                    accidental: None
                },
                suffix: "m7".to_string(),
                bass: None,
            }
        );
        assert_eq!(d.to_string(), "Am7");
    }

    #[test]
    fn display_converts_ascii_accidentals() {
        assert_eq!(DisplayName::parse("c#m").to_string(), "C♯m");
        assert_eq!(DisplayName::parse("Bb7").to_string(), "B♭7");
        assert_eq!(DisplayName::parse("F♯").to_string(), "F♯");
    }

    #[test]
    fn display_splits_slash_bass() {
        let d = DisplayName::parse("G/B");
        match &d {
            DisplayName::Chord { root, bass, .. } => {
                assert_eq!(root.letter, 'G');
                assert_eq!(bass.as_ref().map(|b| b.letter), Some('B'));
            }
            other => panic!("expected chord, got {:?}", other),
        }
        assert_eq!(DisplayName::parse("D/F#").to_string(), "D/F♯");
    }

    #[test]
    fn display_keeps_messages() {
        assert_eq!(
            DisplayName::parse("Unknown Chord"),
            DisplayName::Message("unknown chord".to_string())
        );
        assert_eq!(
            DisplayName::parse("hello"),
            DisplayName::Message("hello".to_string())
        );
    }
}
