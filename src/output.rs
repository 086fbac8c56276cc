use std::sync::{Arc, Mutex, PoisonError};

use crate::buffer::{FULL_SCALE, RenderedBuffer};

pub trait PlaybackSink: Send + Sync {
    /// Starts `buffer` immediately. Returns `false` when it had to be dropped.
    fn play(&self, buffer: &RenderedBuffer) -> bool;

    fn stop_all(&self);
}

struct Lane {
    buffer: RenderedBuffer,
    position: f64, // in source frames
}

pub struct LanePool {
    lanes: Vec<Option<Lane>>,
}

impl LanePool {
    pub fn new(count: usize) -> Self {
        LanePool {
            lanes: (0..count).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lanes.len()
    }

    pub fn active(&self) -> usize {
        self.lanes.iter().filter(|l| l.is_some()).count()
    }

    pub fn try_start(&mut self, buffer: RenderedBuffer) -> Option<usize> {
        let index = self.lanes.iter().position(Option::is_none)?;
        self.lanes[index] = Some(Lane { buffer, position: 0.0 });
        Some(index)
    }

    pub fn clear(&mut self) {
        self.lanes.iter_mut().for_each(|l| *l = None);
    }

    pub fn mix_into(&mut self, data: &mut [f32], channels: usize, device_rate: f32) {
        data.iter_mut().for_each(|s| *s = 0.0);
        if channels == 0 {
            return;
        }

        for slot in self.lanes.iter_mut() {
            let Some(lane) = slot else { continue };
            let frames = lane.buffer.frames();
            let step = lane.buffer.sample_rate as f64 / device_rate as f64;

            for frame in data.chunks_mut(channels) {
                if lane.position as usize >= frames {
                    break;
                }
                let (left, right) = Self::interpolate(&lane.buffer, lane.position);
                if channels == 1 {
                    frame[0] += (left + right) * 0.5;
                } else {
                    frame[0] += left;
                    frame[1] += right;
                }
                lane.position += step;
            }

            if lane.position as usize >= frames {
                *slot = None;
            }
        }
    }

    #[inline]
    fn interpolate(buffer: &RenderedBuffer, position: f64) -> (f32, f32) {
        let idx = position as usize;
        let frames = buffer.frames();
        let s = &buffer.samples;
        let at = |i: usize, ch: usize| s[i * 2 + ch] as f32 / FULL_SCALE as f32;

        if idx + 1 < frames {
            let frac = (position - idx as f64) as f32;
            (
                at(idx, 0) * (1.0 - frac) + at(idx + 1, 0) * frac,
                at(idx, 1) * (1.0 - frac) + at(idx + 1, 1) * frac,
            )
        } else {
            (at(idx, 0), at(idx, 1))
        }
    }
}

#[derive(Clone)]
pub struct LaneSink {
    pool: Arc<Mutex<LanePool>>,
}

impl LaneSink {
    pub fn new(lanes: usize) -> Self {
        LaneSink {
            pool: Arc::new(Mutex::new(LanePool::new(lanes))),
        }
    }

    pub fn pool(&self) -> Arc<Mutex<LanePool>> {
        Arc::clone(&self.pool)
    }

    pub fn active(&self) -> usize {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner).active()
    }
}

impl PlaybackSink for LaneSink {
    fn play(&self, buffer: &RenderedBuffer) -> bool {
        let mut pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        pool.try_start(buffer.clone()).is_some()
    }

    fn stop_all(&self) {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(feature = "device")]
pub use device::DeviceOutput;

#[cfg(feature = "device")]
mod device {
    use std::sync::{Arc, Mutex, PoisonError};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::Stream;

    use super::{LanePool, LaneSink};
    use crate::error::SynthError;

    pub struct DeviceOutput {
        sink: LaneSink,
        sample_rate: u32,
        _stream: Stream,
    }

    impl DeviceOutput {
        pub fn open(lanes: usize) -> Result<Self, SynthError> {
            let host = cpal::default_host();
            let device = host.default_output_device()
                .ok_or_else(|| SynthError::AudioError("No output device found".to_string()))?;
            let config = device.default_output_config()
                .map_err(|e| SynthError::AudioError(e.to_string()))?
                .config();

            let sink = LaneSink::new(lanes);
            let pool: Arc<Mutex<LanePool>> = sink.pool();
            let channels = config.channels as usize;
            let device_rate = config.sample_rate.0 as f32;

            let stream = device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut pool = pool.lock().unwrap_or_else(PoisonError::into_inner);
                    pool.mix_into(data, channels, device_rate);
                },
                |err| log::warn!("Stream error: {}", err),
                None,
            ).map_err(|e| SynthError::AudioError(e.to_string()))?;

            stream.play().map_err(|e| SynthError::AudioError(e.to_string()))?;
            log::info!("Opened output device at {} Hz, {} channels, {} lanes", config.sample_rate.0, channels, lanes);

            Ok(DeviceOutput { sink, sample_rate: config.sample_rate.0, _stream: stream })
        }

        pub fn sink(&self) -> LaneSink {
            self.sink.clone()
        }

        pub fn sample_rate(&self) -> u32 {
            self.sample_rate
        }
    }
}
