use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::buffer::{self, FULL_SCALE, RenderedBuffer};
use crate::config::SchedulerConfig;
use crate::error::SynthError;
use crate::mixer::ChordMixer;
use crate::output::PlaybackSink;
use crate::timeline::{Timeline, TimelineEvent};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct ScheduledEvent {
    pub start_ms: f64,
    pub track: u32,
    pub buffer: RenderedBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
}

pub fn prepare(
    timeline: &Timeline,
    mixer: &ChordMixer,
    token: &CancellationToken,
) -> Result<Option<Vec<ScheduledEvent>>, SynthError> {
    let ms_per_beat = 60_000.0 / timeline.bpm;
    let mut scheduled = Vec::with_capacity(timeline.events.len());

    for event in timeline.sorted_events() {
        if token.is_cancelled() {
            return Ok(None);
        }
        scheduled.push(ScheduledEvent {
            start_ms: event.start_beat * ms_per_beat,
            track: event.track,
            buffer: render_event(timeline, mixer, event)?,
        });
    }

    Ok(Some(scheduled))
}

/// Real-time dispatch loop against the monotonic clock.
pub fn run_realtime(
    events: &[ScheduledEvent],
    end_ms: f64,
    sink: &dyn PlaybackSink,
    token: &CancellationToken,
    repeat: &AtomicBool,
    config: &SchedulerConfig,
) -> PlaybackOutcome {
    let tolerance = config.tolerance_ms as f64;
    let poll = Duration::from_millis(config.poll_interval_ms);

    loop {
        let started = Instant::now();
        let mut cursor = 0;

        loop {
            if token.is_cancelled() {
                return PlaybackOutcome::Cancelled;
            }

            let elapsed = started.elapsed().as_secs_f64() * 1000.0;
            while let Some(event) = events.get(cursor) {
                if event.start_ms > elapsed + tolerance || token.is_cancelled() {
                    break;
                }
                if !sink.play(&event.buffer) {
                    log::debug!("No free lane for track {} at {:.0} ms, dropped", event.track, event.start_ms);
                }
                cursor += 1;
            }

            if cursor >= events.len() && elapsed >= end_ms {
                break;
            }
            thread::sleep(poll);
        }

        if !repeat.load(Ordering::Acquire) {
            return PlaybackOutcome::Completed;
        }
        log::debug!("Repeating timeline");
    }
}

pub fn accumulate(timeline: &Timeline, mixer: &ChordMixer) -> Result<Vec<f64>, SynthError> {
    if timeline.is_empty() {
        return Ok(Vec::new());
    }
    timeline.validate()?;

    let sample_rate = mixer.sample_rate() as f64;
    let total_frames = (sample_rate * timeline.duration_secs()).round() as usize;
    let mut acc = vec![0.0f64; total_frames * 2];

    let sorted = timeline.sorted_events();
    for group in sorted.chunk_by(|a, b| a.start_beat == b.start_beat) {
        let offset = (sample_rate * timeline.beats_to_secs(group[0].start_beat)).round() as usize;
        let Some(dst) = acc.get_mut(offset * 2..) else { continue };

        for event in group {
            let rendered = render_event(timeline, mixer, event)?;
            for (d, &s) in dst.iter_mut().zip(rendered.samples.iter()) {
                *d += s as f64;
            }
        }
        log::debug!("Placed {} event(s) at beat {}", group.len(), group[0].start_beat);
    }

    Ok(acc)
}

pub fn render_offline(timeline: &Timeline, mixer: &ChordMixer, peak: f64) -> Result<RenderedBuffer, SynthError> {
    let mut acc = accumulate(timeline, mixer)?;
    buffer::normalize_to(&mut acc, peak * FULL_SCALE);
    let rendered = RenderedBuffer::from_interleaved(&acc, mixer.sample_rate());
    log::info!(
        "Rendered {} events into {} frames ({:.2}s)",
        timeline.events.len(),
        rendered.frames(),
        rendered.duration_secs()
    );
    Ok(rendered)
}

fn render_event(timeline: &Timeline, mixer: &ChordMixer, event: &TimelineEvent) -> Result<RenderedBuffer, SynthError> {
    mixer.mix_chord(&event.identifier, timeline.beats_to_secs(event.duration_beats), timeline.instrument)
}
