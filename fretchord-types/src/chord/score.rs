//! Candidate scoring: how well a hypothesized (root, chord type) pair explains
//! the set of pitch classes being played.

use serde::{Deserialize, Serialize};

use super::definition::{Category, ChordDefinition, ChordType};
use crate::state::fretboard::Voicing;
use crate::state::music::Note;

/// Every constant the scorer uses. The defaults are empirically tuned; the
/// config file can override any of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Bonus per unit of required-note ratio.
    pub required_bonus: f64,
    /// Penalty per unit of missing required-note ratio.
    pub missing_required_penalty: f64,
    /// Penalty per avoid-note present.
    pub avoid_penalty: f64,
    /// Bonus per unit of completeness.
    pub completeness_bonus: f64,
    /// Flat bonus when every chord tone sounds.
    pub complete_bonus: f64,
    /// Bonus when the bass interval is a common inversion.
    pub common_inversion_bonus: f64,
    /// Penalty per note outside the chord definition.
    pub extra_note_penalty: f64,
    pub close_voicing_bonus: f64,
    pub medium_voicing_bonus: f64,
    /// Penalty when too few notes sound to support the shape.
    pub sparse_penalty: f64,
    /// Penalty for an inverted bass that is not a common inversion.
    pub uncommon_inversion_penalty: f64,
    /// Penalty for a triad missing its third.
    pub missing_third_penalty: f64,
    /// Lowest score a candidate can get.
    pub score_floor: f64,
    /// Candidates must score strictly above this to be kept.
    pub admission_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            required_bonus: 20.0,
            missing_required_penalty: 30.0,
            avoid_penalty: 25.0,
            completeness_bonus: 15.0,
            complete_bonus: 10.0,
            common_inversion_bonus: 5.0,
            extra_note_penalty: 5.0,
            close_voicing_bonus: 5.0,
            medium_voicing_bonus: 2.0,
            sparse_penalty: 10.0,
            uncommon_inversion_penalty: 5.0,
            missing_third_penalty: 15.0,
            score_floor: -100.0,
            admission_threshold: 10.0,
        }
    }
}

/// How convincingly a candidate matches, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Ambiguous,
    Partial,
    Good,
    Perfect,
}

impl Quality {
    pub fn rank(&self) -> u8 {
        match self {
            Quality::Perfect => 4,
            Quality::Good => 3,
            Quality::Partial => 2,
            Quality::Ambiguous => 1,
        }
    }

    pub fn classify(completeness: f64, has_avoid_notes: bool, has_all_required: bool) -> Quality {
        if has_avoid_notes {
            Quality::Ambiguous
        } else if has_all_required && completeness >= 0.95 {
            Quality::Perfect
        } else if has_all_required && completeness >= 0.70 {
            Quality::Good
        } else if completeness >= 0.50 {
            Quality::Partial
        } else {
            Quality::Ambiguous
        }
    }
}

/// One scored interpretation of the played notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub root: Note,
    pub chord_type: ChordType,
    pub bass: Note,
    /// Semitones from the root up to the bass note.
    pub bass_interval: u8,
    pub score: f64,
    pub completeness: f64,
    /// Played notes outside the chord definition.
    pub extra_notes: usize,
    /// Size of the chord type's definition; the last tie-break.
    pub definition_size: usize,
    pub voicing: Voicing,
    pub quality: Quality,
}

impl Candidate {
    pub fn is_root_position(&self) -> bool {
        self.bass == self.root
    }
}

/// Everything the scorer needs to know about the notes being played,
/// computed once per recognition.
#[derive(Debug, Clone)]
pub struct PlayedNotes<'a> {
    /// Distinct pitch classes, ascending.
    pub notes: &'a [Note],
    pub bass: Note,
    pub voicing: Voicing,
}

/// Sorted intervals from `root` to every played note.
pub fn intervals_from_root(notes: &[Note], root: Note) -> Vec<u8> {
    let mut intervals: Vec<u8> = notes.iter().map(|n| n.interval_from(root)).collect();
    intervals.sort_unstable();
    intervals
}

fn count_present(wanted: &[u8], present: &[u8]) -> usize {
    wanted.iter().filter(|n| present.contains(n)).count()
}

/// Fraction of the definition's intervals that are present.
pub fn completeness(present: &[u8], def: &ChordDefinition) -> f64 {
    let matched = present.iter().filter(|&&i| def.contains(i)).count();
    matched as f64 / def.intervals.len() as f64
}

/// Raw score for one chord type against the present intervals.
pub fn chord_score(
    present: &[u8],
    chord_type: ChordType,
    def: &ChordDefinition,
    bass_interval: u8,
    voicing: Voicing,
    w: &ScoringWeights,
) -> f64 {
    let note_count = present.len();
    let mut score = def.weight;

    let required_ratio = count_present(def.required, present) as f64 / def.required.len() as f64;
    score += required_ratio * w.required_bonus;
    if required_ratio < 1.0 && !def.required.is_empty() {
        score -= (1.0 - required_ratio) * w.missing_required_penalty;
    }

    score -= count_present(def.avoid, present) as f64 * w.avoid_penalty;

    let completeness = completeness(present, def);
    score += completeness * w.completeness_bonus;
    if completeness == 1.0 {
        score += w.complete_bonus;
    }

    let common_inversion = def.common_inversions.contains(&bass_interval);
    if common_inversion {
        score += w.common_inversion_bonus;
    }

    let extra = present.iter().filter(|&&i| !def.contains(i)).count();
    score -= extra as f64 * w.extra_note_penalty;

    match voicing {
        Voicing::Close => score += w.close_voicing_bonus,
        Voicing::Medium => score += w.medium_voicing_bonus,
        Voicing::Open | Voicing::Unknown => {}
    }

    if note_count < def.intervals.len() - def.optional.len() && note_count < 3 {
        score -= w.sparse_penalty;
    }

    if bass_interval != 0 && !common_inversion {
        score -= w.uncommon_inversion_penalty;
    }

    if def.category == Category::Triad
        && chord_type != ChordType::Power
        && !chord_type.is_suspended()
        && !present.contains(&def.intervals[1])
    {
        score -= w.missing_third_penalty;
    }

    score.max(w.score_floor)
}

/// Score `chord_type` rooted at `root`. Returns `None` when the pair is
/// rejected outright (an avoid note is present) or scores at or below the
/// admission threshold.
pub fn score_candidate(
    played: &PlayedNotes<'_>,
    root: Note,
    chord_type: ChordType,
    def: &ChordDefinition,
    w: &ScoringWeights,
) -> Option<Candidate> {
    let present = intervals_from_root(played.notes, root);
    let has_avoid_notes = def.avoid.iter().any(|n| present.contains(n));
    if has_avoid_notes {
        return None;
    }

    let bass_interval = played.bass.interval_from(root);
    let score = chord_score(&present, chord_type, def, bass_interval, played.voicing, w);
    if score <= w.admission_threshold {
        return None;
    }

    let completeness = completeness(&present, def);
    let has_all_required = def.required.iter().all(|n| present.contains(n));
    Some(Candidate {
        root,
        chord_type,
        bass: played.bass,
        bass_interval,
        score,
        completeness,
        extra_notes: present.iter().filter(|&&i| !def.contains(i)).count(),
        definition_size: def.intervals.len(),
        voicing: played.voicing,
        quality: Quality::classify(completeness, has_avoid_notes, has_all_required),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(semitones: &[u32]) -> Vec<Note> {
        semitones.iter().map(|&s| Note::from_semitone(s)).collect()
    }

    fn score_of(present: &[u8], chord_type: ChordType, bass_interval: u8, voicing: Voicing) -> f64 {
        chord_score(
            present,
            chord_type,
            chord_type.definition(),
            bass_interval,
            voicing,
            &ScoringWeights::default(),
        )
    }

    #[test]
    fn intervals_are_sorted_and_relative() {
        let played = notes(&[0, 4, 7]);
        assert_eq!(intervals_from_root(&played, Note::C), vec![0, 4, 7]);
        assert_eq!(intervals_from_root(&played, Note::E), vec![0, 3, 8]);
        assert_eq!(intervals_from_root(&played, Note::G), vec![0, 5, 9]);
    }

    #[test]
    fn full_major_triad_close_voicing() {
        // 10 weight + 20 required + 15 completeness + 10 complete + 5 inversion + 5 close
        let score = score_of(&[0, 4, 7], ChordType::Major, 0, Voicing::Close);
        assert!((score - 65.0).abs() < 1e-9, "score={}", score);
    }

    #[test]
    fn voicing_bonus_differs() {
        let close = score_of(&[0, 4, 7], ChordType::Major, 0, Voicing::Close);
        let medium = score_of(&[0, 4, 7], ChordType::Major, 0, Voicing::Medium);
        let open = score_of(&[0, 4, 7], ChordType::Major, 0, Voicing::Open);
        assert!((close - medium - 3.0).abs() < 1e-9);
        assert!((medium - open - 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_required_is_penalized() {
        // C7 without its seventh: 2 of 3 required present
        let score = score_of(&[0, 4, 7], ChordType::Dominant7, 0, Voicing::Close);
        let expected = 12.0 + 20.0 * (2.0 / 3.0) - 30.0 * (1.0 / 3.0) + 15.0 * 0.75 + 5.0 + 5.0;
        assert!((score - expected).abs() < 1e-9, "score={} expected={}", score, expected);
    }

    #[test]
    fn extra_notes_are_penalized() {
        let clean = score_of(&[0, 4, 7], ChordType::Major, 0, Voicing::Close);
        let extra = score_of(&[0, 2, 4, 7], ChordType::Major, 0, Voicing::Close);
        assert!((clean - extra - 5.0).abs() < 1e-9);
    }

    #[test]
    fn triad_without_third_is_penalized() {
        // C and G only, read as a major triad: half the required notes, no third
        let score = score_of(&[0, 7], ChordType::Major, 0, Voicing::Close);
        let expected = 10.0 + 10.0 - 15.0 + 10.0 + 5.0 + 5.0 - 15.0;
        assert!((score - expected).abs() < 1e-9, "score={}", score);
    }

    #[test]
    fn uncommon_inversion_is_penalized() {
        // bass a whole tone above the root is not a major-triad inversion
        let root = score_of(&[0, 2, 4, 7], ChordType::Major, 0, Voicing::Close);
        let odd = score_of(&[0, 2, 4, 7], ChordType::Major, 2, Voicing::Close);
        assert!((root - odd - 10.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_floored() {
        let w = ScoringWeights {
            extra_note_penalty: 1000.0,
            ..ScoringWeights::default()
        };
        let score = chord_score(
            &[0, 1, 2, 4, 7],
            ChordType::Major,
            ChordType::Major.definition(),
            0,
            Voicing::Open,
            &w,
        );
        assert_eq!(score, -100.0);
    }

    #[test]
    fn quality_classification() {
        assert_eq!(Quality::classify(1.0, false, true), Quality::Perfect);
        assert_eq!(Quality::classify(0.75, false, true), Quality::Good);
        assert_eq!(Quality::classify(0.75, false, false), Quality::Partial);
        assert_eq!(Quality::classify(0.5, false, false), Quality::Partial);
        assert_eq!(Quality::classify(0.4, false, true), Quality::Ambiguous);
        assert_eq!(Quality::classify(1.0, true, true), Quality::Ambiguous);
    }

    #[test]
    fn quality_ordering_matches_rank() {
        assert!(Quality::Perfect > Quality::Good);
        assert!(Quality::Good > Quality::Partial);
        assert!(Quality::Partial > Quality::Ambiguous);
        assert_eq!(Quality::Perfect.rank(), 4);
        assert_eq!(Quality::Ambiguous.rank(), 1);
    }

    #[test]
    fn avoid_notes_reject_candidate() {
        let played_notes = notes(&[0, 3, 4, 7]);
        let played = PlayedNotes {
            notes: &played_notes,
            bass: Note::C,
            voicing: Voicing::Close,
        };
        let w = ScoringWeights::default();
        assert!(score_candidate(&played, Note::C, ChordType::Major, ChordType::Major.definition(), &w).is_none());
        assert!(score_candidate(&played, Note::C, ChordType::Minor, ChordType::Minor.definition(), &w).is_none());
    }

    #[test]
    fn candidate_fields_for_first_inversion() {
        let played_notes = notes(&[0, 4, 7]);
        let played = PlayedNotes {
            notes: &played_notes,
            bass: Note::E,
            voicing: Voicing::Close,
        };
        let c = score_candidate(
            &played,
            Note::C,
            ChordType::Major,
            ChordType::Major.definition(),
            &ScoringWeights::default(),
        )
        .unwrap();
        assert_eq!(c.bass_interval, 4);
        assert!(!c.is_root_position());
        assert_eq!(c.quality, Quality::Perfect);
        assert_eq!(c.extra_notes, 0);
        assert_eq!(c.definition_size, 3);
        assert!((c.completeness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn admission_threshold_is_strict() {
        let played_notes = notes(&[0, 4, 7]);
        let played = PlayedNotes {
            notes: &played_notes,
            bass: Note::C,
            voicing: Voicing::Close,
        };
        let w = ScoringWeights {
            admission_threshold: 65.0,
            ..ScoringWeights::default()
        };
        assert!(score_candidate(&played, Note::C, ChordType::Major, ChordType::Major.definition(), &w).is_none());
    }
}
