//! # fretchord-types
//!
//! Pure domain types for fretchord: notes, fretboard positions, the chord
//! knowledge base, and the recognizer that names a fretted shape.
//! No I/O and no logging; `fretchord-core` layers configuration on top.
//!
//! ```
//! use fretchord_types::{recognize_chord, FingerPosition};
//!
//! // x32010, open C
//! let shape = [
//!     FingerPosition { string: 4, fret: 3, finger: 3 },
//!     FingerPosition { string: 3, fret: 2, finger: 2 },
//!     FingerPosition { string: 2, fret: 0, finger: 1 },
//!     FingerPosition { string: 1, fret: 1, finger: 1 },
//!     FingerPosition { string: 0, fret: 0, finger: 1 },
//! ];
//! assert_eq!(recognize_chord(&shape, 0), "C");
//! ```

pub mod action;
pub mod chord;
pub mod reduce;
pub mod state;

pub use action::ShapeAction;
pub use chord::{
    recognize, recognize_chord, recognize_with, Candidate, ChordName, ChordType, KnowledgeBase,
    Quality, Recognition, ScoringWeights,
};
pub use reduce::reduce_shape;
pub use state::*;
