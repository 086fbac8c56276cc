use crate::pitch;

pub const FALLBACK_CHORD: &str = "C";

static CHORDS: &[(&str, &[&str])] = &[
    // Major
    ("C", &["C4", "E4", "G4"]), ("D", &["D4", "F#4", "A4"]), ("E", &["E4", "G#4", "B4"]),
    ("F", &["F4", "A4", "C5"]), ("G", &["G4", "B4", "D5"]), ("A", &["A4", "C#5", "E5"]),
    ("B", &["B4", "D#5", "F#5"]), ("Db", &["Db4", "F4", "Ab4"]), ("Eb", &["Eb4", "G4", "Bb4"]),
    ("Gb", &["Gb4", "Bb4", "Db5"]), ("Ab", &["Ab4", "C5", "Eb5"]), ("Bb", &["Bb4", "D5", "F5"]),
    // Minor
    ("Cm", &["C4", "Eb4", "G4"]), ("Dm", &["D4", "F4", "A4"]), ("Em", &["E4", "G4", "B4"]),
    ("Fm", &["F4", "Ab4", "C5"]), ("Gm", &["G4", "Bb4", "D5"]), ("Am", &["A4", "C5", "E5"]),
    ("Bm", &["B4", "D5", "F#5"]), ("C#m", &["C#4", "E4", "G#4"]), ("Ebm", &["Eb4", "Gb4", "Bb4"]),
    ("F#m", &["F#4", "A4", "C#5"]), ("Abm", &["Ab4", "B4", "Eb5"]), ("Bbm", &["Bb4", "Db5", "F5"]),
    // Dominant 7th
    ("C7", &["C4", "E4", "G4", "Bb4"]), ("D7", &["D4", "F#4", "A4", "C5"]),
    ("E7", &["E4", "G#4", "B4", "D5"]), ("F7", &["F4", "A4", "C5", "Eb5"]),
    ("G7", &["G4", "B4", "D5", "F5"]), ("A7", &["A4", "C#5", "E5", "G5"]),
    ("B7", &["B4", "D#5", "F#5", "A5"]), ("Bb7", &["Bb4", "D5", "F5", "Ab5"]),
    ("Eb7", &["Eb4", "G4", "Bb4", "Db5"]), ("Ab7", &["Ab4", "C5", "Eb5", "Gb5"]),
    // Major 7th
    ("Cmaj7", &["C4", "E4", "G4", "B4"]), ("Dmaj7", &["D4", "F#4", "A4", "C#5"]),
    ("Emaj7", &["E4", "G#4", "B4", "D#5"]), ("Fmaj7", &["F4", "A4", "C5", "E5"]),
    ("Gmaj7", &["G4", "B4", "D5", "F#5"]), ("Amaj7", &["A4", "C#5", "E5", "G#5"]),
    ("Bmaj7", &["B4", "D#5", "F#5", "A#5"]),
    // Minor 7th
    ("Cm7", &["C4", "Eb4", "G4", "Bb4"]), ("Dm7", &["D4", "F4", "A4", "C5"]),
    ("Em7", &["E4", "G4", "B4", "D5"]), ("Fm7", &["F4", "Ab4", "C5", "Eb5"]),
    ("Gm7", &["G4", "Bb4", "D5", "F5"]), ("Am7", &["A4", "C5", "E5", "G5"]),
    ("Bm7", &["B4", "D5", "F#5", "A5"]),
    // Suspended
    ("Csus2", &["C4", "D4", "G4"]), ("Csus4", &["C4", "F4", "G4"]),
    ("Dsus2", &["D4", "E4", "A4"]), ("Dsus4", &["D4", "G4", "A4"]),
    ("Esus2", &["E4", "F#4", "B4"]), ("Esus4", &["E4", "A4", "B4"]),
    ("Fsus2", &["F4", "G4", "C5"]), ("Fsus4", &["F4", "Bb4", "C5"]),
    ("Gsus2", &["G4", "A4", "D5"]), ("Gsus4", &["G4", "C5", "D5"]),
    ("Asus2", &["A4", "B4", "E5"]), ("Asus4", &["A4", "D5", "E5"]),
    // 9th
    ("C9", &["C4", "E4", "G4", "Bb4", "D5"]), ("D9", &["D4", "F#4", "A4", "C5", "E5"]),
    ("E9", &["E4", "G#4", "B4", "D5", "F#5"]), ("F9", &["F4", "A4", "C5", "Eb5", "G5"]),
    ("G9", &["G4", "B4", "D5", "F5", "A5"]), ("A9", &["A4", "C#5", "E5", "G5", "B5"]),
    ("Cm9", &["C4", "Eb4", "G4", "Bb4", "D5"]), ("Dm9", &["D4", "F4", "A4", "C5", "E5"]),
    ("Em9", &["E4", "G4", "B4", "D5", "F#5"]), ("Am9", &["A4", "C5", "E5", "G5", "B5"]),
    // 6th
    ("C6", &["C4", "E4", "G4", "A4"]), ("D6", &["D4", "F#4", "A4", "B4"]),
    ("E6", &["E4", "G#4", "B4", "C#5"]), ("F6", &["F4", "A4", "C5", "D5"]),
    ("G6", &["G4", "B4", "D5", "E5"]), ("A6", &["A4", "C#5", "E5", "F#5"]),
    ("Cm6", &["C4", "Eb4", "G4", "A4"]), ("Dm6", &["D4", "F4", "A4", "B4"]),
    ("Em6", &["E4", "G4", "B4", "C#5"]), ("Am6", &["A4", "C5", "E5", "F#5"]),
    // Add9
    ("Cadd9", &["C4", "E4", "G4", "D5"]), ("Dadd9", &["D4", "F#4", "A4", "E5"]),
    ("Eadd9", &["E4", "G#4", "B4", "F#5"]), ("Fadd9", &["F4", "A4", "C5", "G5"]),
    ("Gadd9", &["G4", "B4", "D5", "A5"]), ("Aadd9", &["A4", "C#5", "E5", "B5"]),
    // Power
    ("C5", &["C3", "G3", "C4"]), ("D5", &["D3", "A3", "D4"]), ("E5", &["E3", "B3", "E4"]),
    ("F5", &["F3", "C4", "F4"]), ("G5", &["G3", "D4", "G4"]), ("A5", &["A3", "E4", "A4"]),
    ("B5", &["B3", "F#4", "B4"]),
    // Diminished
    ("Cdim", &["C4", "Eb4", "Gb4"]), ("Ddim", &["D4", "F4", "Ab4"]), ("Edim", &["E4", "G4", "Bb4"]),
    ("Fdim", &["F4", "Ab4", "B4"]), ("Gdim", &["G4", "Bb4", "Db5"]), ("Adim", &["A4", "C5", "Eb5"]),
    ("Bdim", &["B4", "D5", "F5"]),
    // Augmented
    ("Caug", &["C4", "E4", "G#4"]), ("Daug", &["D4", "F#4", "A#4"]), ("Eaug", &["E4", "G#4", "B#4"]),
    ("Faug", &["F4", "A4", "C#5"]), ("Gaug", &["G4", "B4", "D#5"]), ("Aaug", &["A4", "C#5", "E#5"]),
];

pub fn lookup(chord: &str) -> Option<&'static [&'static str]> {
    CHORDS.iter().find(|(name, _)| *name == chord).map(|(_, notes)| *notes)
}

pub fn notes(chord: &str) -> &'static [&'static str] {
    lookup(chord).unwrap_or_else(|| {
        log::debug!("Unknown chord '{}', falling back to {}", chord, FALLBACK_CHORD);
        lookup(FALLBACK_CHORD).unwrap_or(&["C4", "E4", "G4"])
    })
}

pub fn chord_names() -> impl Iterator<Item = &'static str> {
    CHORDS.iter().map(|(name, _)| *name)
}

/// Resolves a timeline identifier: `"C4n"` is one note, commas join parts.
pub fn resolve(identifier: &str) -> Vec<&str> {
    if identifier.contains(',') {
        return identifier
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .flat_map(resolve_single)
            .collect();
    }
    resolve_single(identifier.trim())
}

fn resolve_single(identifier: &str) -> Vec<&str> {
    if let Some(note) = identifier.strip_suffix('n') {
        if pitch::is_note(note) {
            return vec![note];
        }
    }
    notes(identifier).to_vec()
}
