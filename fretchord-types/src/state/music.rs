use serde::{Deserialize, Serialize};

/// One of the 12 chromatic pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Note {
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Canonical spelling, using the `♯` glyph.
    pub fn name(&self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C♯",
            Note::D => "D",
            Note::Ds => "D♯",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F♯",
            Note::G => "G",
            Note::Gs => "G♯",
            Note::A => "A",
            Note::As => "A♯",
            Note::B => "B",
        }
    }

    /// Plain-ASCII spelling (`C#`), for terminals and file names.
    pub fn ascii_name(&self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// Pitch class, 0 (C) through 11 (B).
    pub fn semitone(&self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Pitch class from any semitone count, folded modulo 12.
    pub fn from_semitone(semitone: u32) -> Note {
        Note::ALL[(semitone % 12) as usize]
    }

    /// Note reached by moving `semitones` up from this one.
    pub fn transpose(self, semitones: u32) -> Note {
        Note::from_semitone(self.semitone() as u32 + semitones)
    }

    /// Interval in semitones (0..12) from `root` up to this note.
    pub fn interval_from(self, root: Note) -> u8 {
        (self.semitone() + 12 - root.semitone()) % 12
    }

    /// Normalize a spelled note name to its pitch class.
    ///
    /// Accepts either case, `#`/`♯` sharps and `b`/`♭` flats, including the
    /// white-key enharmonics `Cb`, `Fb`, `E#` and `B#`.
    pub fn parse(s: &str) -> Option<Note> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let natural: i32 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let shift: i32 = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "B" | "♭" => -1,
            _ => return None,
        };
        Some(Note::from_semitone((natural + shift).rem_euclid(12) as u32))
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
