//! Chord recognition: from fretted positions to a chord name.
//!
//! Everything here is pure and synchronous. The only shared state is the
//! chord knowledge base, which is built once and never mutated.

pub mod definition;
pub mod format;
pub mod recognize;
pub mod score;

pub use definition::{Category, ChordDefinition, ChordType, DefinitionError, KnowledgeBase};
pub use format::{format_chord_name, is_savable_name, DisplayName, DisplayNote, FALLBACK_PHRASES};
pub use recognize::{
    rank_candidates, recognize, recognize_chord, recognize_set, recognize_with, relaxed_match,
    ChordName, PitchClassSet, Recognition,
};
pub use score::{Candidate, Quality, ScoringWeights};
