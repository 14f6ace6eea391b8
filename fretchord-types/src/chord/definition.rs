//! Chord knowledge base: the closed set of chord types the recognizer knows,
//! each with its textbook intervals and the hints used for scoring.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Chord type, identified by its name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Power,
    Dominant7,
    Major7,
    Minor7,
    Diminished7,
    HalfDiminished7,
    Sixth,
    Minor6,
    Add9,
    Ninth,
    Major9,
    Minor9,
}

impl ChordType {
    pub const ALL: [ChordType; 18] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Power,
        ChordType::Dominant7,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::Diminished7,
        ChordType::HalfDiminished7,
        ChordType::Sixth,
        ChordType::Minor6,
        ChordType::Add9,
        ChordType::Ninth,
        ChordType::Major9,
        ChordType::Minor9,
    ];

    /// Enumeration order for candidate generation. Only matters for ties:
    /// common, unambiguous shapes first, the power chord last.
    pub const PRIORITY: [ChordType; 18] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Dominant7,
        ChordType::Minor7,
        ChordType::Major7,
        ChordType::Sus4,
        ChordType::Sus2,
        ChordType::Sixth,
        ChordType::Minor6,
        ChordType::Ninth,
        ChordType::Minor9,
        ChordType::Major9,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Diminished7,
        ChordType::HalfDiminished7,
        ChordType::Add9,
        ChordType::Power,
    ];

    /// Suffix appended to the root in a chord name.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Diminished => "dim",
            ChordType::Augmented => "aug",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::Power => "5",
            ChordType::Dominant7 => "7",
            ChordType::Major7 => "maj7",
            ChordType::Minor7 => "m7",
            ChordType::Diminished7 => "dim7",
            ChordType::HalfDiminished7 => "m7b5",
            ChordType::Sixth => "6",
            ChordType::Minor6 => "m6",
            ChordType::Add9 => "add9",
            ChordType::Ninth => "9",
            ChordType::Major9 => "maj9",
            ChordType::Minor9 => "m9",
        }
    }

    /// Look a chord type up by suffix. Letter case is ignored.
    pub fn from_suffix(suffix: &str) -> Option<ChordType> {
        let lowered = suffix.trim().to_lowercase();
        ChordType::ALL
            .into_iter()
            .find(|t| t.suffix() == lowered)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, ChordType::Sus2 | ChordType::Sus4)
    }

    pub fn definition(&self) -> &'static ChordDefinition {
        match self {
            ChordType::Major => &MAJOR,
            ChordType::Minor => &MINOR,
            ChordType::Diminished => &DIMINISHED,
            ChordType::Augmented => &AUGMENTED,
            ChordType::Sus2 => &SUS2,
            ChordType::Sus4 => &SUS4,
            ChordType::Power => &POWER,
            ChordType::Dominant7 => &DOMINANT7,
            ChordType::Major7 => &MAJOR7,
            ChordType::Minor7 => &MINOR7,
            ChordType::Diminished7 => &DIMINISHED7,
            ChordType::HalfDiminished7 => &HALF_DIMINISHED7,
            ChordType::Sixth => &SIXTH,
            ChordType::Minor6 => &MINOR6,
            ChordType::Add9 => &ADD9,
            ChordType::Ninth => &NINTH,
            ChordType::Major9 => &MAJOR9,
            ChordType::Minor9 => &MINOR9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Triad,
    Seventh,
    Sixth,
    Extended,
    Suspended,
    Power,
    Added,
}

/// Static description of one chord type. Intervals are semitones above the root.
#[derive(Debug, PartialEq)]
pub struct ChordDefinition {
    /// Textbook chord tones, ascending.
    pub intervals: &'static [u8],
    /// Tones that must sound for the chord to be convincing.
    pub required: &'static [u8],
    /// Tones that may be dropped without penalty.
    pub optional: &'static [u8],
    /// Tones that rule this chord type out entirely.
    pub avoid: &'static [u8],
    /// Prior plausibility, from how often the chord shows up in practice.
    pub weight: f64,
    pub category: Category,
    /// Bass intervals that count as a normal voicing.
    pub common_inversions: &'static [u8],
}

impl ChordDefinition {
    pub fn contains(&self, interval: u8) -> bool {
        self.intervals.contains(&interval)
    }

    /// Check the table invariants: sorted intervals starting at the root,
    /// required/optional/inversion sets inside the intervals, avoid set disjoint.
    pub fn validate(&self, chord_type: ChordType) -> Result<(), DefinitionError> {
        if self.intervals.first() != Some(&0) {
            return Err(DefinitionError::MissingRoot(chord_type));
        }
        if self.intervals.windows(2).any(|w| w[0] >= w[1])
            || self.intervals.iter().any(|&i| i >= 12)
        {
            return Err(DefinitionError::UnsortedIntervals(chord_type));
        }
        if self.required.is_empty() {
            return Err(DefinitionError::NoRequiredNotes(chord_type));
        }
        let subsets = [
            ("required", self.required),
            ("optional", self.optional),
            ("common inversion", self.common_inversions),
        ];
        for (set, notes) in subsets {
            if let Some(&interval) = notes.iter().find(|&&n| !self.contains(n)) {
                return Err(DefinitionError::NotAChordTone {
                    chord_type,
                    set,
                    interval,
                });
            }
        }
        if let Some(&interval) = self.avoid.iter().find(|&&n| self.contains(n)) {
            return Err(DefinitionError::AvoidsOwnTone {
                chord_type,
                interval,
            });
        }
        Ok(())
    }
}

/// A chord definition that breaks the table invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    MissingRoot(ChordType),
    UnsortedIntervals(ChordType),
    NoRequiredNotes(ChordType),
    NotAChordTone {
        chord_type: ChordType,
        set: &'static str,
        interval: u8,
    },
    AvoidsOwnTone {
        chord_type: ChordType,
        interval: u8,
    },
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot(t) => write!(f, "{:?}: intervals must start at 0", t),
            Self::UnsortedIntervals(t) => {
                write!(f, "{:?}: intervals must be ascending and below 12", t)
            }
            Self::NoRequiredNotes(t) => write!(f, "{:?}: no required notes", t),
            Self::NotAChordTone {
                chord_type,
                set,
                interval,
            } => write!(
                f,
                "{:?}: {} interval {} is not a chord tone",
                chord_type, set, interval
            ),
            Self::AvoidsOwnTone {
                chord_type,
                interval,
            } => write!(f, "{:?}: avoid interval {} is a chord tone", chord_type, interval),
        }
    }
}

impl std::error::Error for DefinitionError {}

/// The validated chord table, in priority order.
#[derive(Debug)]
pub struct KnowledgeBase {
    entries: Vec<(ChordType, &'static ChordDefinition)>,
}

static STANDARD: LazyLock<KnowledgeBase> = LazyLock::new(|| {
    KnowledgeBase::load().expect("built-in chord table violates its invariants")
});

impl KnowledgeBase {
    /// Build and validate the table.
    pub fn load() -> Result<Self, DefinitionError> {
        let entries = ChordType::PRIORITY
            .into_iter()
            .map(|t| {
                let def = t.definition();
                def.validate(t).map(|()| (t, def))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Process-wide table, validated on first use.
    pub fn standard() -> &'static KnowledgeBase {
        &STANDARD
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChordType, &'static ChordDefinition)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Triads
static MAJOR: ChordDefinition = ChordDefinition {
    intervals: &[0, 4, 7],
    required: &[0, 4],
    optional: &[7],
    avoid: &[3, 6],
    weight: 10.0,
    category: Category::Triad,
    common_inversions: &[0, 4, 7],
};
static MINOR: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 7],
    required: &[0, 3],
    optional: &[7],
    avoid: &[4, 6],
    weight: 10.0,
    category: Category::Triad,
    common_inversions: &[0, 3, 7],
};
static DIMINISHED: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 6],
    required: &[0, 3, 6],
    optional: &[],
    avoid: &[4, 7],
    weight: 8.0,
    category: Category::Triad,
    common_inversions: &[0, 3, 6],
};
static AUGMENTED: ChordDefinition = ChordDefinition {
    intervals: &[0, 4, 8],
    required: &[0, 4, 8],
    optional: &[],
    avoid: &[3, 7],
    weight: 7.0,
    category: Category::Triad,
    common_inversions: &[0, 4, 8],
};
static SUS2: ChordDefinition = ChordDefinition {
    intervals: &[0, 2, 7],
    required: &[0, 2, 7],
    optional: &[],
    avoid: &[3, 4],
    weight: 9.0,
    category: Category::Suspended,
    common_inversions: &[0, 2, 7],
};
static SUS4: ChordDefinition = ChordDefinition {
    intervals: &[0, 5, 7],
    required: &[0, 5, 7],
    optional: &[],
    avoid: &[3, 4],
    weight: 9.0,
    category: Category::Suspended,
    common_inversions: &[0, 5, 7],
};
// Root and fifth only; anything else disqualifies it.
static POWER: ChordDefinition = ChordDefinition {
    intervals: &[0, 7],
    required: &[0, 7],
    optional: &[],
    avoid: &[2, 3, 4, 5, 6, 8, 9, 10, 11],
    weight: 6.0,
    category: Category::Power,
    common_inversions: &[0, 7],
};

// Sevenths
static DOMINANT7: ChordDefinition = ChordDefinition {
    intervals: &[0, 4, 7, 10],
    required: &[0, 4, 10],
    optional: &[7],
    avoid: &[3, 11],
    weight: 12.0,
    category: Category::Seventh,
    common_inversions: &[0, 4, 7, 10],
};
static MAJOR7: ChordDefinition = ChordDefinition {
    intervals: &[0, 4, 7, 11],
    required: &[0, 4, 11],
    optional: &[7],
    avoid: &[3, 10],
    weight: 11.0,
    category: Category::Seventh,
    common_inversions: &[0, 4, 7, 11],
};
static MINOR7: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 7, 10],
    required: &[0, 3, 10],
    optional: &[7],
    avoid: &[4, 11],
    weight: 12.0,
    category: Category::Seventh,
    common_inversions: &[0, 3, 7, 10],
};
static DIMINISHED7: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 6, 9],
    required: &[0, 3, 6, 9],
    optional: &[],
    avoid: &[4, 7, 10, 11],
    weight: 9.0,
    category: Category::Seventh,
    common_inversions: &[0, 3, 6, 9],
};
static HALF_DIMINISHED7: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 6, 10],
    required: &[0, 3, 6, 10],
    optional: &[],
    avoid: &[4, 7, 11],
    weight: 9.0,
    category: Category::Seventh,
    common_inversions: &[0, 3, 6, 10],
};

// Sixths
static SIXTH: ChordDefinition = ChordDefinition {
    intervals: &[0, 4, 7, 9],
    required: &[0, 4, 9],
    optional: &[7],
    avoid: &[3, 10, 11],
    weight: 8.0,
    category: Category::Sixth,
    common_inversions: &[0, 4, 7, 9],
};
static MINOR6: ChordDefinition = ChordDefinition {
    intervals: &[0, 3, 7, 9],
    required: &[0, 3, 9],
    optional: &[7],
    avoid: &[4, 10, 11],
    weight: 8.0,
    category: Category::Sixth,
    common_inversions: &[0, 3, 7, 9],
};

// Added tones and extensions
static ADD9: ChordDefinition = ChordDefinition {
    intervals: &[0, 2, 4, 7],
    required: &[0, 2, 4],
    optional: &[7],
    avoid: &[3, 10, 11],
    weight: 9.0,
    category: Category::Added,
    common_inversions: &[0, 2, 4, 7],
};
static NINTH: ChordDefinition = ChordDefinition {
    intervals: &[0, 2, 4, 7, 10],
    required: &[0, 2, 4, 10],
    optional: &[7],
    avoid: &[3, 11],
    weight: 10.0,
    category: Category::Extended,
    common_inversions: &[0, 4, 7, 10],
};
static MAJOR9: ChordDefinition = ChordDefinition {
    intervals: &[0, 2, 4, 7, 11],
    required: &[0, 2, 4, 11],
    optional: &[7],
    avoid: &[3, 10],
    weight: 9.0,
    category: Category::Extended,
    common_inversions: &[0, 4, 7, 11],
};
static MINOR9: ChordDefinition = ChordDefinition {
    intervals: &[0, 2, 3, 7, 10],
    required: &[0, 2, 3, 10],
    optional: &[7],
    avoid: &[4, 11],
    weight: 10.0,
    category: Category::Extended,
    common_inversions: &[0, 3, 7, 10],
};
