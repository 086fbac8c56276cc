use std::sync::Arc;

pub const FULL_SCALE: f64 = i16::MAX as f64;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBuffer {
    pub samples: Arc<Vec<i16>>,
    pub sample_rate: u32,
}

impl RenderedBuffer {
    pub fn silence(frames: usize, sample_rate: u32) -> Self {
        RenderedBuffer {
            samples: Arc::new(vec![0; frames * 2]),
            sample_rate,
        }
    }

    pub fn from_mono(mono: &[f64], sample_rate: u32) -> Self {
        let mut samples = Vec::with_capacity(mono.len() * 2);
        for &s in mono {
            let q = quantize(s);
            samples.push(q);
            samples.push(q);
        }
        RenderedBuffer { samples: Arc::new(samples), sample_rate }
    }

    pub fn from_interleaved(interleaved: &[f64], sample_rate: u32) -> Self {
        RenderedBuffer {
            samples: Arc::new(interleaved.iter().map(|&s| quantize(s)).collect()),
            sample_rate,
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn peak(&self) -> i32 {
        self.samples.iter().map(|s| (*s as i32).abs()).max().unwrap_or(0)
    }
}

#[inline]
pub fn quantize(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

pub fn peak_abs(buf: &[f64]) -> f64 {
    buf.iter().fold(0.0, |m, v| m.max(v.abs()))
}

pub fn normalize_to(buf: &mut [f64], target: f64) {
    let peak = peak_abs(buf);
    if peak > 0.0 {
        let gain = target / peak;
        buf.iter_mut().for_each(|s| *s *= gain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_is_duplicated() {
        let buf = RenderedBuffer::from_mono(&[0.0, 100.4, -32768.9, 40000.0], 44100);
        assert_eq!(buf.frames(), 4);
        assert_eq!(*buf.samples, vec![0, 0, 100, 100, -32768, -32768, 32767, 32767]);
        assert_eq!(buf.samples.chunks(2).map(|f| f[0]).collect::<Vec<_>>(), vec![0, 100, -32768, 32767]);
        assert_eq!(buf.peak(), 32768);
    }

    #[test]
    fn normalize_hits_target_and_ignores_silence() {
        let mut buf = vec![0.25, -0.5, 0.1];
        normalize_to(&mut buf, 28000.0);
        assert_eq!(peak_abs(&buf), 28000.0);
        assert_eq!(buf[0], 14000.0);

        let mut silent = vec![0.0; 4];
        normalize_to(&mut silent, 28000.0);
        assert!(silent.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn silence_has_requested_length() {
        let buf = RenderedBuffer::silence(22050, 44100);
        assert_eq!(buf.frames(), 22050);
        assert_eq!(buf.duration_secs(), 0.5);
        assert_eq!(buf.peak(), 0);
    }
}
