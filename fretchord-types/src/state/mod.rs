pub mod fretboard;
pub mod music;
pub mod shape;

pub use fretboard::{
    analyze_voicing, map_to_absolute_pitch, FingerPosition, PositionError, Voicing,
    STANDARD_TUNING, STRING_COUNT,
};
pub use music::Note;
pub use shape::ChordShape;
