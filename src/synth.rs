use crate::buffer::{self, FULL_SCALE, RenderedBuffer};
use crate::effects::EffectsChain;
use crate::envelope::envelope;
use crate::error::SynthError;
use crate::instrument::Instrument;
use crate::waveform::Partials;

#[derive(Debug, Clone)]
pub struct ToneSynth {
    sample_rate: u32,
    effects: EffectsChain,
    peak: f64,
}

impl ToneSynth {
    pub fn new(sample_rate: u32, effects: EffectsChain, peak: f64) -> Result<Self, SynthError> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidParameter("sample rate must be positive".to_string()));
        }
        if !(peak > 0.0 && peak <= 1.0) {
            return Err(SynthError::InvalidParameter(format!("tone peak out of range: {}", peak)));
        }
        Ok(ToneSynth { sample_rate, effects, peak })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn harmonic_cap(&self, frequency: f64) -> usize {
        let nyquist = self.sample_rate as f64 / 2.0;
        let cap = (nyquist / frequency).floor() as i64 - 1;
        if cap >= 1 {
            cap as usize
        } else if frequency < nyquist {
            1
        } else {
            0
        }
    }

    pub fn synthesize_mono(
        &self,
        frequency: f64,
        duration: f64,
        volume: f64,
        instrument: Instrument,
    ) -> Result<Vec<f64>, SynthError> {
        if !(frequency > 0.0) {
            return Err(SynthError::InvalidParameter(format!("frequency must be positive: {}", frequency)));
        }
        if !(duration > 0.0) {
            return Err(SynthError::InvalidParameter(format!("duration must be positive: {}", duration)));
        }

        let profile = instrument.profile();
        let sr = self.sample_rate as f64;
        let len = (sr * duration).round() as usize;

        let cap = self.harmonic_cap(frequency).min(profile.harmonics.len());
        let partials = Partials {
            frequency,
            amplitudes: &profile.harmonics[..cap],
            decay_rate: profile.decay_rate,
            modulation: profile.modulation,
        };

        let mut wave = partials.render(sr, len);
        let env = envelope(len, &profile.envelope);
        let gain = volume.clamp(0.0, 1.0) / profile.normalization;
        for (s, e) in wave.iter_mut().zip(env) {
            *s *= gain * e;
        }

        self.effects.apply(&mut wave, sr);
        buffer::normalize_to(&mut wave, self.peak);

        log::trace!("Synthesized {} Hz for {:.3}s on {} ({} harmonics)", frequency, duration, instrument, cap);
        Ok(wave)
    }

    pub fn synthesize(
        &self,
        frequency: f64,
        duration: f64,
        volume: f64,
        instrument: Instrument,
    ) -> Result<RenderedBuffer, SynthError> {
        let mut wave = self.synthesize_mono(frequency, duration, volume, instrument)?;
        wave.iter_mut().for_each(|s| *s *= FULL_SCALE);
        Ok(RenderedBuffer::from_mono(&wave, self.sample_rate))
    }
}
