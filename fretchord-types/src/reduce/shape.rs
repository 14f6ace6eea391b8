use crate::action::ShapeAction;
use crate::state::{ChordShape, FingerPosition, PositionError};

/// Apply one edit to a shape. Only `Place` can fail, when the string or
/// finger is out of range; the shape is left untouched in that case.
pub fn reduce_shape(shape: &mut ChordShape, action: &ShapeAction) -> Result<(), PositionError> {
    match *action {
        ShapeAction::Place {
            string,
            fret,
            finger,
        } => {
            let placed = FingerPosition::new(string, fret, finger)?;
            match shape.positions.iter_mut().find(|p| p.string == string) {
                Some(existing) => *existing = placed,
                None => shape.positions.push(placed),
            }
            shape.positions.sort_by_key(|p| p.string);
        }
        ShapeAction::Remove { string, fret } => {
            shape
                .positions
                .retain(|p| !(p.string == string && p.fret == fret));
        }
        ShapeAction::Clear => shape.positions.clear(),
        ShapeAction::UndoLast => {
            shape.positions.pop();
        }
        ShapeAction::ShiftUp => {
            shape.fret_offset = shape.fret_offset.saturating_add(1);
            shape.positions.clear();
        }
        ShapeAction::ShiftDown => {
            shape.fret_offset = shape.fret_offset.saturating_sub(1);
            shape.positions.clear();
        }
    }
    Ok(())
}
