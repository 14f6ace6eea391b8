//! The recognition pipeline: positions to pitch classes, candidates, and the
//! single best chord name.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::definition::{ChordType, KnowledgeBase};
use super::format::{format_chord_name, NO_INPUT, UNKNOWN_CHORD};
use super::score::{intervals_from_root, score_candidate, Candidate, PlayedNotes, ScoringWeights};
use crate::state::fretboard::{analyze_voicing, FingerPosition, Voicing};
use crate::state::music::Note;

/// Distinct pitch classes in a shape, ascending, with the absolute frets they
/// came from (for voicing). Sets built from bare notes carry no frets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchClassSet {
    notes: Vec<Note>,
    frets: Option<Vec<u32>>,
}

impl PitchClassSet {
    /// Map every position through the tuning table, dropping positions on
    /// strings the table does not know.
    pub fn from_positions(positions: &[FingerPosition], fret_offset: u8) -> Self {
        let mut notes = Vec::with_capacity(positions.len());
        let mut frets = Vec::with_capacity(positions.len());
        for pos in positions {
            if let Some(note) = pos.pitch(fret_offset) {
                notes.push(note);
                frets.push(pos.effective_fret(fret_offset));
            }
        }
        notes.sort_unstable();
        notes.dedup();
        Self {
            notes,
            frets: Some(frets),
        }
    }

    pub fn from_notes(notes: &[Note]) -> Self {
        let mut notes = notes.to_vec();
        notes.sort_unstable();
        notes.dedup();
        Self { notes, frets: None }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Lowest pitch class present. This is a pitch-class minimum, not the
    /// physically lowest string.
    pub fn bass(&self) -> Option<Note> {
        self.notes.first().copied()
    }

    /// Voicing from the fret span. Sets built from bare notes count as close.
    pub fn voicing(&self) -> Voicing {
        match &self.frets {
            Some(frets) => analyze_voicing(frets),
            None => Voicing::Close,
        }
    }
}

/// A recognized chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordName {
    pub root: Note,
    pub chord_type: ChordType,
    pub bass: Note,
}

impl ChordName {
    pub fn is_inversion(&self) -> bool {
        self.bass != self.root
    }

    /// Name with the bass appended when it is not the root, e.g. `G/B`.
    pub fn slash_name(&self) -> String {
        if self.is_inversion() {
            format!("{}/{}", self, self.bass)
        } else {
            self.to_string()
        }
    }
}

impl std::fmt::Display for ChordName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_chord_name(self.root, self.chord_type.suffix()))
    }
}

/// Outcome of recognizing one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recognition {
    /// Nothing was pressed.
    NoInput,
    /// Every position sounds the same pitch class.
    SingleNote(Note),
    Chord(ChordName),
    /// No candidate and no relaxed match.
    Unknown,
}

impl Recognition {
    /// Canonical label: chord name, note name, or a lowercase fallback phrase.
    pub fn label(&self) -> String {
        match self {
            Recognition::NoInput => NO_INPUT.to_string(),
            Recognition::SingleNote(note) => note.name().to_string(),
            Recognition::Chord(chord) => chord.to_string(),
            Recognition::Unknown => UNKNOWN_CHORD.to_string(),
        }
    }

    pub fn chord(&self) -> Option<&ChordName> {
        match self {
            Recognition::Chord(chord) => Some(chord),
            _ => None,
        }
    }
}

/// Score every (root, chord type) pair and return the admitted candidates,
/// best first.
pub fn rank_candidates(set: &PitchClassSet, kb: &KnowledgeBase, w: &ScoringWeights) -> Vec<Candidate> {
    let Some(bass) = set.bass() else {
        return Vec::new();
    };
    let played = PlayedNotes {
        notes: set.notes(),
        bass,
        voicing: set.voicing(),
    };

    let mut candidates = Vec::new();
    for &root in set.notes() {
        for (chord_type, def) in kb.iter() {
            if let Some(candidate) = score_candidate(&played, root, chord_type, def, w) {
                candidates.push(candidate);
            }
        }
    }
    candidates.sort_by(compare_candidates);
    candidates
}

/// Total order over candidates: quality, score, root position, fewer extra
/// notes, smaller chord definition. Stable sorting keeps priority order
/// for anything still tied.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.quality
        .rank()
        .cmp(&a.quality.rank())
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| b.is_root_position().cmp(&a.is_root_position()))
        .then_with(|| a.extra_notes.cmp(&b.extra_notes))
        .then_with(|| a.definition_size.cmp(&b.definition_size))
}

/// Loose match used when nothing scores high enough: for each root in
/// ascending order, look for a major third and fifth, then a minor third and
/// fifth, then just a fifth.
pub fn relaxed_match(set: &PitchClassSet) -> Option<(Note, ChordType)> {
    set.notes().iter().find_map(|&root| {
        let present = intervals_from_root(set.notes(), root);
        let has = |i: u8| present.contains(&i);
        if has(4) && has(7) {
            Some((root, ChordType::Major))
        } else if has(3) && has(7) {
            Some((root, ChordType::Minor))
        } else if has(7) {
            Some((root, ChordType::Power))
        } else {
            None
        }
    })
}

/// Run the whole pipeline on a pitch-class set.
pub fn recognize_set(set: &PitchClassSet, kb: &KnowledgeBase, w: &ScoringWeights) -> Recognition {
    let Some(bass) = set.bass() else {
        return Recognition::NoInput;
    };
    if set.len() == 1 {
        return Recognition::SingleNote(bass);
    }

    if let Some(best) = rank_candidates(set, kb, w).into_iter().next() {
        return Recognition::Chord(ChordName {
            root: best.root,
            chord_type: best.chord_type,
            bass: best.bass,
        });
    }

    match relaxed_match(set) {
        Some((root, chord_type)) => Recognition::Chord(ChordName {
            root,
            chord_type,
            bass,
        }),
        None => Recognition::Unknown,
    }
}

/// Recognize a shape with explicit scoring weights.
pub fn recognize_with(
    positions: &[FingerPosition],
    fret_offset: u8,
    w: &ScoringWeights,
) -> Recognition {
    let set = PitchClassSet::from_positions(positions, fret_offset);
    recognize_set(&set, KnowledgeBase::standard(), w)
}

/// Recognize a shape with the default weights.
pub fn recognize(positions: &[FingerPosition], fret_offset: u8) -> Recognition {
    recognize_with(positions, fret_offset, &ScoringWeights::default())
}

/// Name the chord a shape implies: a chord name, a single note name, or a
/// lowercase fallback phrase. Never empty.
pub fn recognize_chord(positions: &[FingerPosition], fret_offset: u8) -> String {
    recognize(positions, fret_offset).label()
}
