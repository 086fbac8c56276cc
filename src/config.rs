use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::effects::EffectsChain;
use crate::error::SynthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Standard,
    High,
}

impl Quality {
    pub fn sample_rate(&self) -> u32 {
        match self {
            Quality::Standard => 44100,
            Quality::High => 48000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tolerance_ms: u64, // dispatch this close to the start
    pub poll_interval_ms: u64,
    pub lanes: usize, // busy lanes drop new events
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            tolerance_ms: 50,
            poll_interval_ms: 10,
            lanes: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub quality: Quality,
    pub note_volume: f64,
    pub tone_peak: f64,
    pub headroom: f64, // i16 units
    pub render_peak: f64,
    pub effects: EffectsChain,
    pub scheduler: SchedulerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            quality: Quality::Standard,
            note_volume: 0.25,
            tone_peak: 0.9,
            headroom: 28000.0,
            render_peak: 0.9,
            effects: EffectsChain::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn sample_rate(&self) -> u32 {
        self.quality.sample_rate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SynthError> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        let checks = [
            ("note_volume", self.note_volume, 0.0..=1.0),
            ("tone_peak", self.tone_peak, f64::MIN_POSITIVE..=1.0),
            ("headroom", self.headroom, 1.0..=i16::MAX as f64),
            ("render_peak", self.render_peak, f64::MIN_POSITIVE..=1.0),
        ];
        for (name, value, range) in checks {
            if !range.contains(&value) {
                return Err(SynthError::InvalidParameter(format!("{} out of range: {}", name, value)));
            }
        }
        if self.scheduler.poll_interval_ms == 0 || self.scheduler.lanes == 0 {
            return Err(SynthError::InvalidParameter("scheduler needs a poll interval and at least one lane".to_string()));
        }
        Ok(())
    }
}
