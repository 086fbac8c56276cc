use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    None,
    Vibrato { rate: f64, depth: f64 },
    Tremolo { rate: f64, depth: f64 },
    PulseWidth { rate: f64, depth: f64 },
    Breath { rate: f64, depth: f64, noise: f64 }, // random per call
    Chorus { rate: f64, depth: f64, jitter: f64 }, // random per call
}

impl Modulation {
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Modulation::Breath { .. } | Modulation::Chorus { .. })
    }

    fn vibrato(&self) -> Option<(f64, f64)> {
        match *self {
            Modulation::Vibrato { rate, depth }
            | Modulation::Breath { rate, depth, .. }
            | Modulation::Chorus { rate, depth, .. } => Some((rate, depth)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Partials<'a> {
    pub frequency: f64,
    pub amplitudes: &'a [f64],
    pub decay_rate: f64,
    pub modulation: Modulation,
}

impl Partials<'_> {
    pub fn render(&self, sample_rate: f64, len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len];
        let vibrato = self.modulation.vibrato();

        for (idx, &amp) in self.amplitudes.iter().enumerate() {
            let h = (idx + 1) as f64;
            let offset = match self.modulation {
                Modulation::Chorus { jitter, .. } => fastrand::f64() * TAU * jitter,
                _ => 0.0,
            };

            for (i, sample) in out.iter_mut().enumerate() {
                let t = i as f64 / sample_rate;
                let warped = match vibrato {
                    // integral of 1 + depth * sin(2*pi*rate*t)
                    Some((rate, depth)) => t + depth * (1.0 - (TAU * rate * t).cos()) / (TAU * rate),
                    None => t,
                };

                let mut partial = amp * (TAU * self.frequency * h * warped + offset).sin();

                if self.decay_rate > 0.0 {
                    partial *= (-self.decay_rate * h * t).exp();
                }
                if let Modulation::PulseWidth { rate, depth } = self.modulation {
                    let duty = 0.5 + 0.5 * depth * (TAU * rate * t).sin();
                    partial *= (h * PI * duty).sin();
                }

                *sample += partial;
            }
        }

        match self.modulation {
            Modulation::Tremolo { rate, depth } => {
                for (i, sample) in out.iter_mut().enumerate() {
                    let t = i as f64 / sample_rate;
                    *sample *= 1.0 - depth * 0.5 * (1.0 - (TAU * rate * t).sin());
                }
            }
            Modulation::Breath { noise, .. } => {
                let level = noise * self.amplitudes.iter().sum::<f64>();
                let mut lowpassed = 0.0;
                for sample in out.iter_mut() {
                    lowpassed += 0.1 * ((fastrand::f64() * 2.0 - 1.0) - lowpassed);
                    *sample += lowpassed * level;
                }
            }
            _ => {}
        }

        out
    }
}
