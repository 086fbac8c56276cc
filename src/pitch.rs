use crate::error::SynthError;

pub const A4_FREQUENCY: f64 = 440.0;
pub const LOWEST_OCTAVE: i32 = 2;
pub const HIGHEST_OCTAVE: i32 = 6;

const LETTERS: [(char, i32); 7] = [
    ('C', 0), ('D', 2), ('E', 4), ('F', 5), ('G', 7), ('A', 9), ('B', 11),
];

/// Frequency in Hz of a note identifier such as `A4`, `C#3` or `Bb5`.
pub fn frequency(note: &str) -> Result<f64, SynthError> {
    let midi = midi_number(note).ok_or_else(|| SynthError::NotFound(note.to_string()))?;
    Ok(A4_FREQUENCY * 2.0_f64.powf((midi - 69) as f64 / 12.0))
}

pub fn is_note(note: &str) -> bool {
    midi_number(note).is_some()
}

fn midi_number(note: &str) -> Option<i32> {
    let mut chars = note.chars();
    let letter = chars.next()?;
    let mut semitone = LETTERS.iter().find(|(l, _)| *l == letter)?.1;

    let rest = chars.as_str();
    let octave_str = if let Some(r) = rest.strip_prefix('#') {
        semitone += 1;
        r
    } else if let Some(r) = rest.strip_prefix('b') {
        semitone -= 1;
        r
    } else {
        rest
    };

    if octave_str.len() != 1 {
        return None;
    }
    let octave: i32 = octave_str.parse().ok()?;
    if !(LOWEST_OCTAVE..=HIGHEST_OCTAVE).contains(&octave) {
        return None;
    }

    Some((octave + 1) * 12 + semitone)
}

pub fn note_names() -> Vec<String> {
    let mut names = Vec::new();
    for octave in LOWEST_OCTAVE..=HIGHEST_OCTAVE {
        for (letter, _) in LETTERS {
            names.push(format!("{}{}", letter, octave));
            names.push(format!("{}#{}", letter, octave));
            names.push(format!("{}b{}", letter, octave));
        }
    }
    names
}
