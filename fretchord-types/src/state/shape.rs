use serde::{Deserialize, Serialize};

use super::fretboard::FingerPosition;
use crate::chord::{recognize_with, Recognition, ScoringWeights};

/// A chord shape being built on the neck: at most one position per string,
/// frets relative to `fret_offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordShape {
    pub positions: Vec<FingerPosition>,
    pub fret_offset: u8,
}

impl ChordShape {
    pub fn new(fret_offset: u8) -> Self {
        Self {
            positions: Vec::new(),
            fret_offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position currently held on `string`, if any.
    pub fn on_string(&self, string: u8) -> Option<&FingerPosition> {
        self.positions.iter().find(|p| p.string == string)
    }

    /// Finger at an exact (string, fret), if one is placed there.
    pub fn finger_at(&self, string: u8, fret: u8) -> Option<u8> {
        self.positions
            .iter()
            .find(|p| p.string == string && p.fret == fret)
            .map(|p| p.finger)
    }

    pub fn recognize(&self) -> Recognition {
        self.recognize_with(&ScoringWeights::default())
    }

    pub fn recognize_with(&self, weights: &ScoringWeights) -> Recognition {
        recognize_with(&self.positions, self.fret_offset, weights)
    }

    /// First absolute fret of a four-fret diagram framing this shape: the nut
    /// when the shape sounds an open string, otherwise one fret below the
    /// lowest position once the offset is applied.
    pub fn diagram_start_fret(&self) -> u32 {
        match self
            .positions
            .iter()
            .map(|p| p.effective_fret(self.fret_offset))
            .min()
        {
            None | Some(0) => 0,
            Some(lowest) => lowest - 1,
        }
    }
}
