//! End-to-end checks through the public API: build shapes with the reducer,
//! recognize them with a configured recognizer.

use std::io::Write;

use fretchord_core::config::Config;
use fretchord_core::recognizer::Recognizer;
use fretchord_core::types::chord::is_savable_name;
use fretchord_core::types::{reduce_shape, ChordShape, FingerPosition, ShapeAction};

fn build(fret_offset: u8, frets: [Option<u8>; 6]) -> ChordShape {
    let mut shape = ChordShape::new(fret_offset);
    for (string, fret) in frets.iter().enumerate() {
        if let Some(fret) = fret {
            reduce_shape(
                &mut shape,
                &ShapeAction::Place {
                    string: string as u8,
                    fret: *fret,
                    finger: 1,
                },
            )
            .unwrap();
        }
    }
    shape
}

#[test]
fn common_open_chords() {
    let recognizer = Recognizer::default();
    // high e first, low E last
    let cases = [
        ([Some(0), Some(1), Some(0), Some(2), Some(3), None], "C"),
        ([Some(0), Some(1), Some(2), Some(2), Some(0), None], "Am"),
        ([Some(3), Some(0), Some(0), Some(0), Some(2), Some(3)], "G"),
        ([Some(2), Some(3), Some(2), Some(0), None, None], "D"),
        ([Some(0), Some(0), Some(0), Some(2), Some(2), Some(0)], "Em"),
        ([Some(0), Some(2), Some(0), Some(2), Some(0), None], "A7"),
        ([Some(2), Some(1), Some(2), Some(0), None, None], "D7"),
    ];
    for (frets, expected) in cases {
        let shape = build(0, frets);
        assert_eq!(
            recognizer.recognize_shape(&shape).label(),
            expected,
            "{:?}",
            frets
        );
    }
}

#[test]
fn barre_shape_moves_with_offset() {
    let recognizer = Recognizer::default();
    // x24242, B7 at the nut
    let shape = build(0, [Some(2), Some(4), Some(2), Some(4), Some(2), None]);
    assert_eq!(recognizer.recognize_shape(&shape).label(), "B7");

    // A-shape at offset 3 is C
    let shape = build(3, [Some(0), Some(2), Some(2), Some(2), Some(0), None]);
    assert_eq!(recognizer.recognize_shape(&shape).label(), "C");
}

#[test]
fn labels_and_savability() {
    let recognizer = Recognizer::default();
    assert!(!is_savable_name(&recognizer.recognize_chord(&[], 0)));

    let one = [FingerPosition::new(2, 0, 1).unwrap()];
    assert_eq!(recognizer.recognize_chord(&one, 0), "G");

    let shape = build(0, [Some(3), Some(0), Some(0), Some(0), Some(2), Some(3)]);
    assert!(is_savable_name(&recognizer.recognize_shape(&shape).label()));
}

#[test]
fn configured_threshold_changes_outcome() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[scoring]\nadmission_threshold = 1000.0\n")
        .unwrap();
    let config = Config::load_from(file.path());
    let recognizer = Recognizer::from_config(&config);

    // C and C# a semitone apart: nothing admitted, no relaxed match
    let cluster = [
        FingerPosition::new(1, 1, 1).unwrap(),
        FingerPosition::new(2, 6, 2).unwrap(),
    ];
    assert_eq!(recognizer.recognize_chord(&cluster, 0), "unknown chord");
    assert_eq!(Recognizer::default().recognize_chord(&cluster, 0), "C♯maj7");
}

#[test]
fn explanation_serializes_to_json() {
    let shape = build(0, [Some(0), Some(1), Some(0), Some(2), Some(3), None]);
    let explanation = Recognizer::default().explain(&shape.positions, shape.fret_offset);
    let json = serde_json::to_value(&explanation).unwrap();
    assert_eq!(json["label"], "C");
    assert_eq!(json["voicing"], "close");
    assert_eq!(json["dropped_positions"], 0);
    assert!(json["candidates"].as_array().is_some_and(|c| !c.is_empty()));
}
