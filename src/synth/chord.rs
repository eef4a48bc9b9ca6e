use super::config::NUM_VOICES;
use serde::Serialize;

/// Pitches of the C major scale from C4 to C5, in Hz.
pub const PITCHES: [f32; 8] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25];

/// A named preset of one target frequency per voice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Chord {
    pub name: &'static str,
    /// Keyboard shortcut, uppercase.
    pub key: char,
    pub frequencies: [f32; NUM_VOICES],
}

/// The four chord buttons: C, Am, F, G.
pub static CHORDS: [Chord; 4] = [
    Chord {
        name: "C",
        key: 'C',
        frequencies: [PITCHES[0], PITCHES[2], PITCHES[4]],
    },
    Chord {
        name: "Am",
        key: 'A',
        frequencies: [PITCHES[0], PITCHES[2], PITCHES[3]],
    },
    Chord {
        name: "F",
        key: 'F',
        frequencies: [PITCHES[3], PITCHES[5], PITCHES[0]],
    },
    Chord {
        name: "G",
        key: 'G',
        frequencies: [PITCHES[1], PITCHES[4], PITCHES[6]],
    },
];

pub fn chord_count() -> usize {
    CHORDS.len()
}

/// Looks up a chord, panicking on an index outside the table.
///
/// Chord indices come from a fixed button set, so a bad index is an
/// integration bug rather than user input.
pub fn chord(index: usize) -> &'static Chord {
    assert!(
        index < CHORDS.len(),
        "chord index {} out of range ({} chords)",
        index,
        CHORDS.len()
    );
    &CHORDS[index]
}

/// Case-insensitive shortcut lookup.
pub fn chord_for_key(key: char) -> Option<usize> {
    let key = key.to_ascii_uppercase();
    CHORDS.iter().position(|chord| chord.key == key)
}

/// The table as JSON, for UIs that draw their own chord buttons.
pub fn chords_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CHORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_chord_values() {
        assert_eq!(chord(0).frequencies, [261.63, 329.63, 392.00]);
        assert_eq!(chord(1).frequencies, [261.63, 329.63, 349.23]);
        assert_eq!(chord(2).frequencies, [349.23, 440.00, 261.63]);
        assert_eq!(chord(3).frequencies, [293.66, 392.00, 493.88]);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(chord_for_key('C'), Some(0));
        assert_eq!(chord_for_key('A'), Some(1));
        assert_eq!(chord_for_key('f'), Some(2));
        assert_eq!(chord_for_key('g'), Some(3));
        assert_eq!(chord_for_key('D'), None);
    }

    #[test]
    #[should_panic(expected = "chord index 4 out of range")]
    fn out_of_range_chord_panics() {
        chord(4);
    }

    #[test]
    fn json_lists_every_chord() {
        let json = chords_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), chord_count());
        assert_eq!(entries[1]["name"], "Am");
        assert_eq!(entries[1]["key"], "A");
        assert_eq!(entries[0]["frequencies"].as_array().unwrap().len(), NUM_VOICES);
    }
}
