//! Edits a player can make to a chord shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeAction {
    /// Put `finger` on (`string`, `fret`), replacing whatever that string held.
    Place { string: u8, fret: u8, finger: u8 },
    /// Lift the finger at exactly (`string`, `fret`).
    Remove { string: u8, fret: u8 },
    Clear,
    /// Drop the most recently listed position.
    UndoLast,
    /// Move the window one fret toward the body. Clears the shape.
    ShiftUp,
    /// Move the window one fret toward the nut. Clears the shape.
    ShiftDown,
}
