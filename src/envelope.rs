#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack: f64,
    pub decay: f64,
    pub sustain_level: f64,
    pub release: f64,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        EnvelopeShape {
            attack: 0.01,
            decay: 0.15,
            sustain_level: 0.6,
            release: 0.4,
        }
    }
}

/// Amplitude curve of `sample_count` values in [0, 1].
pub fn envelope(sample_count: usize, shape: &EnvelopeShape) -> Vec<f64> {
    let mut env = vec![shape.sustain_level; sample_count];

    let attack = segment_len(sample_count, shape.attack);
    let decay = segment_len(sample_count, shape.decay);
    let release = segment_len(sample_count, shape.release);
    let release_start = sample_count - release;

    let attack_end = attack.min(release_start);
    for (i, v) in linspace(0.0, 1.0, attack).take(attack_end).enumerate() {
        env[i] = v.sqrt();
    }

    let decay_end = (attack_end + decay).min(release_start);
    for (i, v) in linspace(1.0, shape.sustain_level, decay).take(decay_end - attack_end).enumerate() {
        env[attack_end + i] = v;
    }

    for (i, v) in linspace(1.0, 0.0, release).enumerate() {
        env[release_start + i] = shape.sustain_level * v * v;
    }

    env
}

fn segment_len(sample_count: usize, fraction: f64) -> usize {
    ((sample_count as f64 * fraction.clamp(0.0, 1.0)) as usize).min(sample_count)
}

// Inclusive of both ends, a single point yields `start`.
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let span = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| start + (end - start) * i as f64 / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piano() -> EnvelopeShape {
        EnvelopeShape::default()
    }

    #[test]
    fn length_matches_and_values_in_range() {
        for n in [0, 1, 2, 3, 7, 100, 44100] {
            let env = envelope(n, &piano());
            assert_eq!(env.len(), n);
            assert!(env.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn phases_follow_the_shape() {
        let env = envelope(1000, &piano());
        // attack: 10 samples, 0 -> 1
        assert_eq!(env[0], 0.0);
        assert!((env[9] - 1.0).abs() < 1e-12);
        // decay: 150 samples ending at the sustain level
        assert!((env[10] - 1.0).abs() < 1e-12);
        assert!((env[159] - 0.6).abs() < 1e-12);
        // sustain plateau
        assert!(env[160..600].iter().all(|v| (*v - 0.6).abs() < 1e-12));
        // release: 400 samples, squared fall to silence
        assert!((env[600] - 0.6).abs() < 1e-12);
        assert_eq!(env[999], 0.0);
    }

    #[test]
    fn overlapping_phases_lose_the_sustain_segment() {
        let shape = EnvelopeShape { attack: 0.4, decay: 0.5, sustain_level: 0.7, release: 0.5 };
        let env = envelope(100, &shape);
        assert_eq!(env.len(), 100);
        // attack 0..40 untouched, decay cut at the release start (50)
        assert!((env[39] - 1.0).abs() < 1e-12);
        assert!((env[50] - 0.7).abs() < 1e-12);
        assert_eq!(env[99], 0.0);
    }

    #[test]
    fn attack_longer_than_release_start_is_clamped() {
        let shape = EnvelopeShape { attack: 0.9, decay: 0.9, sustain_level: 0.5, release: 0.9 };
        let env = envelope(10, &shape);
        assert_eq!(env.len(), 10);
        assert!(env.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
