//! Six-string fretboard geometry: string tuning, finger positions, and the
//! mapping from (string, fret) to pitch class.

use serde::{Deserialize, Serialize};

use super::music::Note;

/// Number of strings on the instrument.
pub const STRING_COUNT: u8 = 6;

/// Open-string pitches in standard tuning, indexed by string.
/// Index 0 is the high E string, index 5 the low E string.
pub const STANDARD_TUNING: [Note; STRING_COUNT as usize] =
    [Note::E, Note::B, Note::G, Note::D, Note::A, Note::E];

/// A single fretted (or open) string, as placed by the player.
///
/// `fret` is relative to the shape's fret offset. `finger` is cosmetic and
/// never affects pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerPosition {
    pub string: u8,
    pub fret: u8,
    pub finger: u8,
}

impl FingerPosition {
    /// Build a position, rejecting strings outside 0..=5 and fingers outside 1..=4.
    pub fn new(string: u8, fret: u8, finger: u8) -> Result<Self, PositionError> {
        if string >= STRING_COUNT {
            return Err(PositionError::StringOutOfRange(string));
        }
        if !(1..=4).contains(&finger) {
            return Err(PositionError::FingerOutOfRange(finger));
        }
        Ok(Self {
            string,
            fret,
            finger,
        })
    }

    /// Absolute fret once the shape's offset is applied.
    pub fn effective_fret(&self, fret_offset: u8) -> u32 {
        self.fret as u32 + fret_offset as u32
    }

    /// Pitch class sounded by this position, or `None` if the string index
    /// has no entry in the tuning table.
    pub fn pitch(&self, fret_offset: u8) -> Option<Note> {
        map_to_absolute_pitch(self.string, self.effective_fret(fret_offset))
    }
}

/// Rejected finger position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    StringOutOfRange(u8),
    FingerOutOfRange(u8),
}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StringOutOfRange(s) => {
                write!(f, "string index {} out of range (0-{})", s, STRING_COUNT - 1)
            }
            Self::FingerOutOfRange(n) => write!(f, "finger {} out of range (1-4)", n),
        }
    }
}

impl std::error::Error for PositionError {}

/// Open-string pitch plus `fret` semitones, folded to a pitch class.
/// Returns `None` for a string index the tuning table does not cover.
pub fn map_to_absolute_pitch(string_index: u8, fret: u32) -> Option<Note> {
    let open = STANDARD_TUNING.get(string_index as usize)?;
    Some(open.transpose(fret))
}

/// Physical spread of a shape on the neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voicing {
    Close,
    Medium,
    Open,
    Unknown,
}

impl Voicing {
    pub fn name(&self) -> &'static str {
        match self {
            Voicing::Close => "close",
            Voicing::Medium => "medium",
            Voicing::Open => "open",
            Voicing::Unknown => "unknown",
        }
    }
}

/// Classify a set of absolute frets by their span: up to 3 frets is close,
/// up to 5 medium, anything wider open.
pub fn analyze_voicing(frets: &[u32]) -> Voicing {
    let (Some(min), Some(max)) = (frets.iter().min(), frets.iter().max()) else {
        return Voicing::Unknown;
    };
    match max - min {
        0..=3 => Voicing::Close,
        4..=5 => Voicing::Medium,
        _ => Voicing::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_strings_match_standard_tuning() {
        let open: Vec<Note> = (0..STRING_COUNT)
            .map(|s| map_to_absolute_pitch(s, 0).unwrap())
            .collect();
        assert_eq!(open, vec![Note::E, Note::B, Note::G, Note::D, Note::A, Note::E]);
    }

    #[test]
    fn fret_adds_semitones() {
        // B string, 1st fret
        assert_eq!(map_to_absolute_pitch(1, 1), Some(Note::C));
        // A string, 3rd fret
        assert_eq!(map_to_absolute_pitch(4, 3), Some(Note::C));
        // low E, 5th fret
        assert_eq!(map_to_absolute_pitch(5, 5), Some(Note::A));
    }

    #[test]
    fn octave_equivalence() {
        for string in 0..STRING_COUNT {
            for fret in 0..=12u32 {
                assert_eq!(
                    map_to_absolute_pitch(string, fret),
                    map_to_absolute_pitch(string, fret + 12),
                    "string {} fret {}",
                    string,
                    fret
                );
            }
        }
    }

    #[test]
    fn unknown_string_is_none() {
        assert_eq!(map_to_absolute_pitch(6, 0), None);
        assert_eq!(map_to_absolute_pitch(200, 3), None);
    }

    #[test]
    fn new_validates_ranges() {
        assert!(FingerPosition::new(0, 0, 1).is_ok());
        assert!(FingerPosition::new(5, 24, 4).is_ok());
        assert_eq!(
            FingerPosition::new(6, 0, 1),
            Err(PositionError::StringOutOfRange(6))
        );
        assert_eq!(
            FingerPosition::new(2, 0, 0),
            Err(PositionError::FingerOutOfRange(0))
        );
        assert_eq!(
            FingerPosition::new(2, 0, 5),
            Err(PositionError::FingerOutOfRange(5))
        );
    }

    #[test]
    fn effective_fret_applies_offset() {
        let pos = FingerPosition::new(5, 1, 1).unwrap();
        assert_eq!(pos.effective_fret(2), 3);
        assert_eq!(pos.pitch(2), Some(Note::G));
    }

    #[test]
    fn effective_fret_past_u8_keeps_pitch() {
        // low E, 250 + 10 = 260 semitones up, pitch class 8 above E
        let pos = FingerPosition::new(5, 250, 1).unwrap();
        assert_eq!(pos.effective_fret(10), 260);
        assert_eq!(pos.pitch(10), Some(Note::C));
        assert_eq!(pos.effective_fret(u8::MAX), 505);
    }

    #[test]
    fn voicing_by_span() {
        assert_eq!(analyze_voicing(&[]), Voicing::Unknown);
        assert_eq!(analyze_voicing(&[5]), Voicing::Close);
        assert_eq!(analyze_voicing(&[0, 3]), Voicing::Close);
        assert_eq!(analyze_voicing(&[0, 4]), Voicing::Medium);
        assert_eq!(analyze_voicing(&[2, 7]), Voicing::Medium);
        assert_eq!(analyze_voicing(&[0, 6]), Voicing::Open);
    }

    #[test]
    fn position_error_messages() {
        assert_eq!(
            PositionError::StringOutOfRange(7).to_string(),
            "string index 7 out of range (0-5)"
        );
        assert_eq!(
            PositionError::FingerOutOfRange(9).to_string(),
            "finger 9 out of range (1-4)"
        );
    }
}
