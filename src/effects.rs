use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverbParams {
    pub first_delay_ms: f64,
    pub first_gain: f64,
    pub second_delay_ms: f64,
    pub second_gain: f64,
}

impl Default for ReverbParams {
    fn default() -> Self {
        ReverbParams {
            first_delay_ms: 30.0,
            first_gain: 0.15,
            second_delay_ms: 47.0,
            second_gain: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    pub blend: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        SmoothingParams { blend: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsChain {
    pub reverb: Option<ReverbParams>,
    pub smoothing: Option<SmoothingParams>,
}

impl EffectsChain {
    pub fn has_any(&self) -> bool {
        self.reverb.is_some() || self.smoothing.is_some()
    }

    pub fn dry() -> Self {
        EffectsChain { reverb: None, smoothing: None }
    }

    pub fn apply(&self, buffer: &mut [f64], sample_rate: f64) {
        if let Some(reverb) = &self.reverb {
            let mut processor = EffectsProcessor::new(sample_rate, reverb);
            for s in buffer.iter_mut() {
                *s = processor.process(*s);
            }
        }

        if let Some(smoothing) = &self.smoothing {
            apply_smoothing(buffer, smoothing);
        }
    }
}

impl Default for EffectsChain {
    fn default() -> Self {
        EffectsChain {
            reverb: Some(ReverbParams::default()),
            smoothing: Some(SmoothingParams::default()),
        }
    }
}

pub struct EffectsProcessor {
    delay_line: VecDeque<f64>, // dry history, front is the previous sample
    taps: [(usize, f64); 2],
}

impl EffectsProcessor {
    pub fn new(sample_rate: f64, params: &ReverbParams) -> Self {
        let to_samples = |ms: f64| ((ms / 1000.0 * sample_rate).round() as usize).max(1);
        let taps = [
            (to_samples(params.first_delay_ms), params.first_gain),
            (to_samples(params.second_delay_ms), params.second_gain),
        ];
        let longest = taps.iter().map(|(d, _)| *d).max().unwrap_or(1);

        EffectsProcessor {
            delay_line: VecDeque::from(vec![0.0; longest]),
            taps,
        }
    }

    pub fn process(&mut self, input: f64) -> f64 {
        let mut output = input;
        for (delay, gain) in self.taps {
            output += self.delay_line[delay - 1] * gain;
        }
        Self::cycle_buffer(&mut self.delay_line, input);
        output
    }

    #[inline]
    fn cycle_buffer(buffer: &mut VecDeque<f64>, new_value: f64) {
        buffer.pop_back();
        buffer.push_front(new_value);
    }
}

// Centered moving average with zero padding at both edges.
fn apply_smoothing(buffer: &mut [f64], params: &SmoothingParams) {
    if buffer.is_empty() {
        return;
    }
    let original = buffer.to_vec();
    let last = original.len() - 1;
    for (i, s) in buffer.iter_mut().enumerate() {
        let prev = if i > 0 { original[i - 1] } else { 0.0 };
        let next = if i < last { original[i + 1] } else { 0.0 };
        let smoothed = (prev + original[i] + next) / 3.0;
        *s = original[i] * (1.0 - params.blend) + smoothed * params.blend;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_response_has_two_taps() {
        let chain = EffectsChain { reverb: Some(ReverbParams::default()), smoothing: None };
        let mut buf = vec![0.0; 3000];
        buf[0] = 1.0;
        chain.apply(&mut buf, 44100.0);

        // 30 ms and 47 ms at 44.1 kHz
        assert_eq!(buf[0], 1.0);
        assert!((buf[1323] - 0.15).abs() < 1e-12);
        assert!((buf[2073] - 0.08).abs() < 1e-12);
        let nonzero = buf.iter().filter(|v| **v != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn smoothing_blends_seventy_thirty() {
        let chain = EffectsChain { reverb: None, smoothing: Some(SmoothingParams::default()) };
        let mut buf = vec![0.0, 3.0, 0.0, 0.0];
        chain.apply(&mut buf, 44100.0);
        assert!((buf[0] - 0.3).abs() < 1e-12);
        assert!((buf[1] - 2.4).abs() < 1e-12);
        assert!((buf[2] - 0.3).abs() < 1e-12);
        assert_eq!(buf[3], 0.0);
    }

    #[test]
    fn smoothing_leaves_constant_interior_untouched() {
        let chain = EffectsChain { reverb: None, smoothing: Some(SmoothingParams::default()) };
        let mut buf = vec![0.5; 10];
        chain.apply(&mut buf, 44100.0);
        assert!(buf[1..9].iter().all(|v| (v - 0.5).abs() < 1e-12));
    }

    #[test]
    fn dry_chain_is_a_no_op() {
        let chain = EffectsChain::dry();
        assert!(!chain.has_any());
        let mut buf = vec![0.1, -0.2, 0.3];
        chain.apply(&mut buf, 48000.0);
        assert_eq!(buf, vec![0.1, -0.2, 0.3]);
    }
}
