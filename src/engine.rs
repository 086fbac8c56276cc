use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::buffer::RenderedBuffer;
use crate::config::EngineConfig;
use crate::error::SynthError;
use crate::instrument::Instrument;
use crate::mixer::ChordMixer;
use crate::output::{LaneSink, PlaybackSink};
use crate::scheduler::{self, CancellationToken, PlaybackOutcome};
use crate::synth::ToneSynth;
use crate::timeline::Timeline;
use crate::wav;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

struct Playback {
    token: CancellationToken,
    sink: Arc<dyn PlaybackSink>,
    worker: JoinHandle<()>,
}

pub struct SynthEngine {
    config: EngineConfig,
    mixer: ChordMixer,
    repeat: Arc<AtomicBool>,
    active: Arc<AtomicBool>,
    playback: Option<Playback>,
}

impl SynthEngine {
    pub fn new(config: EngineConfig) -> Result<Self, SynthError> {
        config.validate()?;
        let synth = ToneSynth::new(config.sample_rate(), config.effects.clone(), config.tone_peak)?;
        let mixer = ChordMixer::new(synth, config.note_volume, config.headroom);

        Ok(SynthEngine {
            config,
            mixer,
            repeat: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicBool::new(false)),
            playback: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mixer(&self) -> &ChordMixer {
        &self.mixer
    }

    pub fn sample_rate(&self) -> u32 {
        self.mixer.sample_rate()
    }

    pub fn lane_sink(&self) -> Arc<LaneSink> {
        Arc::new(LaneSink::new(self.config.scheduler.lanes))
    }

    #[cfg(feature = "device")]
    pub fn open_device(&self) -> Result<crate::output::DeviceOutput, SynthError> {
        crate::output::DeviceOutput::open(self.config.scheduler.lanes)
    }

    pub fn mix_chord(&self, identifier: &str, duration: f64, instrument: Instrument) -> Result<RenderedBuffer, SynthError> {
        self.mixer.mix_chord(identifier, duration, instrument)
    }

    pub fn render(&self, timeline: &Timeline) -> Result<RenderedBuffer, SynthError> {
        scheduler::render_offline(timeline, &self.mixer, self.config.render_peak)
    }

    pub fn export_wav(&self, timeline: &Timeline, path: impl AsRef<Path>) -> Result<RenderedBuffer, SynthError> {
        let rendered = self.render(timeline)?;
        wav::export_wav(&rendered, path)?;
        Ok(rendered)
    }

    /// Starts real-time playback on a worker thread.
    pub fn play(&mut self, timeline: &Timeline, sink: Arc<dyn PlaybackSink>) -> Result<(), SynthError> {
        if self.active.load(Ordering::Acquire) {
            return Err(SynthError::AlreadyPlaying);
        }
        if timeline.is_empty() {
            return Err(SynthError::EmptyTimeline);
        }
        timeline.validate()?;

        // A previous pass that ended on its own still has a handle to reap.
        self.reap();

        let snapshot = timeline.clone();
        let mixer = self.mixer.clone();
        let scheduler_config = self.config.scheduler.clone();
        let token = CancellationToken::new();
        let repeat = Arc::clone(&self.repeat);
        let active = Arc::clone(&self.active);

        let worker_token = token.clone();
        let worker_sink = Arc::clone(&sink);
        active.store(true, Ordering::Release);

        let spawned = thread::Builder::new()
            .name("chordbox-playback".to_string())
            .spawn(move || {
                let end_ms = snapshot.duration_secs() * 1000.0;
                match scheduler::prepare(&snapshot, &mixer, &worker_token) {
                    Ok(Some(events)) => {
                        log::info!("Playing {} events over {:.0} ms", events.len(), end_ms);
                        let outcome = scheduler::run_realtime(
                            &events,
                            end_ms,
                            worker_sink.as_ref(),
                            &worker_token,
                            &repeat,
                            &scheduler_config,
                        );
                        if outcome == PlaybackOutcome::Completed {
                            log::info!("Playback finished");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("Could not prepare playback: {}", e),
                }
                active.store(false, Ordering::Release);
            });

        match spawned {
            Ok(worker) => {
                self.playback = Some(Playback { token, sink, worker });
                Ok(())
            }
            Err(e) => {
                self.active.store(false, Ordering::Release);
                Err(SynthError::Io(e))
            }
        }
    }

    /// Cancels playback. No dispatch happens after this returns.
    pub fn stop(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.token.cancel();
            if playback.worker.join().is_err() {
                log::warn!("Playback worker panicked");
            }
            playback.sink.stop_all();
        }
        self.active.store(false, Ordering::Release);
    }

    pub fn wait(&mut self) {
        if let Some(playback) = self.playback.take() {
            if playback.worker.join().is_err() {
                log::warn!("Playback worker panicked");
            }
        }
    }

    pub fn set_repeat(&self, enabled: bool) {
        self.repeat.store(enabled, Ordering::Release);
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat.load(Ordering::Acquire)
    }

    pub fn state(&self) -> PlaybackState {
        if self.active.load(Ordering::Acquire) {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    fn reap(&mut self) {
        if let Some(playback) = self.playback.take() {
            if playback.worker.join().is_err() {
                log::warn!("Playback worker panicked");
            }
        }
    }
}

impl Drop for SynthEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
