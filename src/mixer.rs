use crate::buffer::{self, RenderedBuffer};
use crate::chord;
use crate::error::SynthError;
use crate::instrument::Instrument;
use crate::pitch;
use crate::synth::ToneSynth;

#[derive(Debug, Clone)]
pub struct ChordMixer {
    synth: ToneSynth,
    note_volume: f64,
    headroom: f64,
}

impl ChordMixer {
    pub fn new(synth: ToneSynth, note_volume: f64, headroom: f64) -> Self {
        ChordMixer { synth, note_volume, headroom }
    }

    pub fn sample_rate(&self) -> u32 {
        self.synth.sample_rate()
    }

    pub fn headroom(&self) -> f64 {
        self.headroom
    }

    pub fn mix_chord(&self, identifier: &str, duration: f64, instrument: Instrument) -> Result<RenderedBuffer, SynthError> {
        let notes = chord::resolve(identifier);
        self.mix_notes(&notes, duration, instrument)
    }

    pub fn mix_notes(&self, notes: &[&str], duration: f64, instrument: Instrument) -> Result<RenderedBuffer, SynthError> {
        let sample_rate = self.synth.sample_rate();
        if !(duration > 0.0) {
            return Err(SynthError::InvalidParameter(format!("duration must be positive: {}", duration)));
        }
        let frames = (sample_rate as f64 * duration).round() as usize;

        let frequencies: Vec<f64> = notes
            .iter()
            .filter_map(|note| match pitch::frequency(note) {
                Ok(f) => Some(f),
                Err(_) => {
                    log::debug!("Skipping unknown note '{}'", note);
                    None
                }
            })
            .collect();

        if frequencies.is_empty() {
            return Ok(RenderedBuffer::silence(frames, sample_rate));
        }

        let mut mixed = vec![0.0f64; frames * 2];
        for freq in frequencies {
            let tone = self.synth.synthesize(freq, duration, self.note_volume, instrument)?;
            for (dst, &s) in mixed.iter_mut().zip(tone.samples.iter()) {
                *dst += s as f64;
            }
        }

        buffer::normalize_to(&mut mixed, self.headroom);
        Ok(RenderedBuffer::from_interleaved(&mixed, sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectsChain;

    fn mixer() -> ChordMixer {
        ChordMixer::new(ToneSynth::new(44100, EffectsChain::default(), 0.9).unwrap(), 0.25, 28000.0)
    }

    #[test]
    fn unknown_chord_sounds_like_c_major() {
        let m = mixer();
        let known = m.mix_chord("C", 0.3, Instrument::Piano).unwrap();
        let unknown = m.mix_chord("NotAChord", 0.3, Instrument::Piano).unwrap();
        assert_eq!(known, unknown);
    }

    #[test]
    fn fallback_holds_for_every_deterministic_instrument() {
        let m = mixer();
        for instrument in Instrument::ALL.iter().filter(|i| i.profile().is_deterministic()) {
            let a = m.mix_chord("C", 0.1, *instrument).unwrap();
            let b = m.mix_chord("???", 0.1, *instrument).unwrap();
            assert_eq!(a, b, "{}", instrument);
        }
    }

    #[test]
    fn non_silent_chords_peak_at_headroom() {
        let m = mixer();
        for id in ["C", "Am7", "G9", "E4n", "C5"] {
            let buf = m.mix_chord(id, 0.25, Instrument::Guitar).unwrap();
            assert_eq!(buf.peak(), 28000, "{}", id);
        }
        // random timbres still land exactly on the target
        let buf = m.mix_chord("Dm", 0.25, Instrument::Strings).unwrap();
        assert_eq!(buf.peak(), 28000);
    }

    #[test]
    fn no_valid_notes_gives_sized_silence() {
        let m = mixer();
        let buf = m.mix_notes(&["Q4", "Z9"], 0.5, Instrument::Piano).unwrap();
        assert_eq!(buf.frames(), 22050);
        assert_eq!(buf.peak(), 0);

        let buf = m.mix_notes(&[], 0.1, Instrument::Piano).unwrap();
        assert_eq!(buf.frames(), 4410);
    }

    #[test]
    fn length_matches_duration() {
        let buf = mixer().mix_chord("Fmaj7", 0.8, Instrument::Bass).unwrap();
        assert_eq!(buf.frames(), 35280);
        assert_eq!(buf.sample_rate, 44100);
    }
}
