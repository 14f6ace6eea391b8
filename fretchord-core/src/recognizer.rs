//! Recognition service: the pure pipeline from `fretchord-types`, bound to a
//! set of scoring weights, with logging and an explanation view.

use serde::Serialize;

use fretchord_types::chord::{rank_candidates, recognize_set, PitchClassSet};
use fretchord_types::{
    Candidate, ChordShape, FingerPosition, KnowledgeBase, Note, Recognition, ScoringWeights,
    Voicing,
};

use crate::config::Config;

/// Everything the recognizer considered for one shape, for debugging and
/// the `--explain` output.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub notes: Vec<Note>,
    pub bass: Option<Note>,
    pub voicing: Voicing,
    /// Positions ignored because their string is not in the tuning table.
    pub dropped_positions: usize,
    /// Admitted candidates, best first.
    pub candidates: Vec<Candidate>,
    pub recognition: Recognition,
    pub label: String,
    pub slash_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Recognizer {
    kb: &'static KnowledgeBase,
    weights: ScoringWeights,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl Recognizer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            kb: KnowledgeBase::standard(),
            weights,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scoring_weights())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn recognize(&self, positions: &[FingerPosition], fret_offset: u8) -> Recognition {
        let set = PitchClassSet::from_positions(positions, fret_offset);
        let dropped = dropped_positions(positions, fret_offset);
        if dropped > 0 {
            log::debug!(target: "recognizer", "dropped {} position(s) on unknown strings", dropped);
        }
        let recognition = recognize_set(&set, self.kb, &self.weights);
        log::debug!(
            target: "recognizer",
            "{} position(s) at offset {} -> {:?} -> {}",
            positions.len(),
            fret_offset,
            set.notes(),
            recognition.label()
        );
        recognition
    }

    /// Canonical label for a shape, never empty.
    pub fn recognize_chord(&self, positions: &[FingerPosition], fret_offset: u8) -> String {
        self.recognize(positions, fret_offset).label()
    }

    pub fn recognize_shape(&self, shape: &ChordShape) -> Recognition {
        self.recognize(&shape.positions, shape.fret_offset)
    }

    pub fn explain(&self, positions: &[FingerPosition], fret_offset: u8) -> Explanation {
        let set = PitchClassSet::from_positions(positions, fret_offset);
        let candidates = if set.len() >= 2 {
            rank_candidates(&set, self.kb, &self.weights)
        } else {
            Vec::new()
        };
        for c in &candidates {
            log::trace!(
                target: "recognizer",
                "candidate {}{} score={:.2} quality={:?}",
                c.root,
                c.chord_type.suffix(),
                c.score,
                c.quality
            );
        }
        let recognition = self.recognize(positions, fret_offset);
        Explanation {
            notes: set.notes().to_vec(),
            bass: set.bass(),
            voicing: set.voicing(),
            dropped_positions: dropped_positions(positions, fret_offset),
            candidates,
            label: recognition.label(),
            slash_name: recognition.chord().map(|c| c.slash_name()),
            recognition,
        }
    }
}

fn dropped_positions(positions: &[FingerPosition], fret_offset: u8) -> usize {
    positions
        .iter()
        .filter(|p| p.pitch(fret_offset).is_none())
        .count()
}
