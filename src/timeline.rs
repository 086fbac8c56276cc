use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::instrument::Instrument;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub identifier: String, // chord, "C4n" note, or comma list
    pub start_beat: f64,
    pub duration_beats: f64,
    pub track: u32,
}

impl TimelineEvent {
    pub fn new(identifier: impl Into<String>, start_beat: f64, duration_beats: f64, track: u32) -> Self {
        TimelineEvent {
            identifier: identifier.into(),
            start_beat,
            duration_beats,
            track,
        }
    }

    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub bpm: f64,
    pub key: String, // advisory
    pub instrument: Instrument,
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new(bpm: f64, instrument: Instrument) -> Self {
        Timeline {
            bpm,
            key: "C".to_string(),
            instrument,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: TimelineEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn beats_to_secs(&self, beats: f64) -> f64 {
        beats * 60.0 / self.bpm
    }

    pub fn end_beat(&self) -> f64 {
        self.events.iter().map(TimelineEvent::end_beat).fold(0.0, f64::max)
    }

    pub fn duration_secs(&self) -> f64 {
        self.beats_to_secs(self.end_beat())
    }

    pub fn sorted_events(&self) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = self.events.iter().collect();
        events.sort_by(|a, b| a.start_beat.total_cmp(&b.start_beat).then(a.track.cmp(&b.track)));
        events
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if !(self.bpm > 0.0) {
            return Err(SynthError::InvalidParameter(format!("bpm must be positive: {}", self.bpm)));
        }
        for event in &self.events {
            if !(event.start_beat >= 0.0) || !(event.duration_beats > 0.0) {
                return Err(SynthError::InvalidParameter(format!(
                    "event '{}' at beat {} with duration {}",
                    event.identifier, event.start_beat, event.duration_beats
                )));
            }
        }
        Ok(())
    }

    pub fn from_project(project: &Project, instrument: Instrument) -> Self {
        Timeline {
            bpm: project.bpm,
            key: project.key.clone(),
            instrument,
            events: project
                .blocks
                .iter()
                .map(|b| TimelineEvent::new(b.chord_name.clone(), b.position, b.duration, b.track))
                .collect(),
        }
    }

    pub fn to_project(&self) -> Project {
        Project {
            bpm: self.bpm,
            key: self.key.clone(),
            blocks: self
                .events
                .iter()
                .map(|e| Block {
                    chord_name: e.identifier.clone(),
                    position: e.start_beat,
                    duration: e.duration_beats,
                    track: e.track,
                })
                .collect(),
        }
    }
}

fn default_bpm() -> f64 {
    100.0
}

fn default_key() -> String {
    "C".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub chord_name: String,
    pub position: f64,
    pub duration: f64,
    #[serde(default)]
    pub track: u32,
}

impl Project {
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SynthError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SynthError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "bpm": 120,
        "key": "G",
        "blocks": [
            {"chord_name": "G", "position": 0, "duration": 2, "track": 1},
            {"chord_name": "C4n", "position": 0.5, "duration": 0.25, "track": 0},
            {"chord_name": "Em", "position": 2, "duration": 2, "track": 1}
        ]
    }"#;

    #[test]
    fn project_round_trips_field_for_field() {
        let project = Project::from_json(PROJECT).unwrap();
        let timeline = Timeline::from_project(&project, Instrument::Guitar);
        assert_eq!(timeline.events.len(), 3);
        assert_eq!(timeline.key, "G");
        assert_eq!(timeline.to_project(), project);

        let reparsed = Project::from_json(&timeline.to_project().to_json().unwrap()).unwrap();
        assert_eq!(reparsed, project);
    }

    #[test]
    fn missing_fields_take_editor_defaults() {
        let project = Project::from_json(r#"{"blocks":[{"chord_name":"C","position":1,"duration":1}]}"#).unwrap();
        assert_eq!(project.bpm, 100.0);
        assert_eq!(project.key, "C");
        assert_eq!(project.blocks[0].track, 0);
    }

    #[test]
    fn timing_helpers() {
        let timeline = Timeline::from_project(&Project::from_json(PROJECT).unwrap(), Instrument::Piano);
        assert_eq!(timeline.end_beat(), 4.0);
        assert_eq!(timeline.duration_secs(), 2.0);
        assert_eq!(timeline.beats_to_secs(1.0), 0.5);
        let order: Vec<&str> = timeline.sorted_events().iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(order, vec!["G", "C4n", "Em"]);
        assert_eq!(Timeline::new(90.0, Instrument::Piano).end_beat(), 0.0);
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(Timeline::new(0.0, Instrument::Piano).validate().is_err());
        let t = Timeline::new(120.0, Instrument::Piano).with_event(TimelineEvent::new("C", 0.0, 0.0, 0));
        assert!(t.validate().is_err());
        let t = Timeline::new(120.0, Instrument::Piano).with_event(TimelineEvent::new("C", -1.0, 1.0, 0));
        assert!(t.validate().is_err());
    }

    #[test]
    fn save_and_load_through_a_file() {
        let path = std::env::temp_dir().join("chordbox_project_test.json");
        let project = Project::from_json(PROJECT).unwrap();
        project.save(&path).unwrap();
        assert_eq!(Project::load(&path).unwrap(), project);
        std::fs::remove_file(&path).unwrap();
    }
}
