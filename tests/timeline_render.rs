use chordbox::buffer::{self, FULL_SCALE};
use chordbox::{scheduler, EngineConfig, Instrument, Project, Quality, SynthEngine, Timeline, TimelineEvent};

fn engine() -> SynthEngine {
    SynthEngine::new(EngineConfig::default()).unwrap()
}

#[test]
fn single_chord_at_120_bpm_is_half_a_second() {
    let timeline = Timeline::new(120.0, Instrument::Piano).with_event(TimelineEvent::new("C", 0.0, 1.0, 0));
    let rendered = engine().render(&timeline).unwrap();
    assert_eq!(rendered.frames(), 22050);
    assert_eq!(rendered.samples.len(), 44100);
}

#[test]
fn overlapping_tracks_are_louder_before_normalization() {
    let e = engine();
    let c = Timeline::new(120.0, Instrument::Organ).with_event(TimelineEvent::new("C", 0.0, 1.0, 0));
    let g = Timeline::new(120.0, Instrument::Organ).with_event(TimelineEvent::new("G", 0.0, 1.0, 1));
    let both = c.clone().with_event(TimelineEvent::new("G", 0.0, 1.0, 1));

    let peak_c = buffer::peak_abs(&scheduler::accumulate(&c, e.mixer()).unwrap());
    let peak_g = buffer::peak_abs(&scheduler::accumulate(&g, e.mixer()).unwrap());
    let peak_both = buffer::peak_abs(&scheduler::accumulate(&both, e.mixer()).unwrap());
    assert!((peak_c - 28000.0).abs() < 1.0);
    assert!((peak_g - 28000.0).abs() < 1.0);
    assert!(peak_both > peak_c.max(peak_g));

    let rendered = e.render(&both).unwrap();
    assert_eq!(rendered.peak(), (0.9 * FULL_SCALE).round() as i32);
}

#[test]
fn render_length_follows_the_last_event_end() {
    let cases: Vec<(f64, Vec<TimelineEvent>)> = vec![
        (60.0, vec![TimelineEvent::new("Am", 0.0, 0.5, 0)]),
        (100.0, vec![TimelineEvent::new("F", 3.0, 1.0, 2), TimelineEvent::new("C", 0.0, 2.0, 0)]),
        (
            137.0,
            vec![
                TimelineEvent::new("Dm7", 0.25, 6.0, 0),
                TimelineEvent::new("G7", 2.0, 1.5, 1),
                TimelineEvent::new("A4n,C5n", 1.0, 0.75, 3),
            ],
        ),
    ];

    for quality in [Quality::Standard, Quality::High] {
        let e = SynthEngine::new(EngineConfig { quality, ..EngineConfig::default() }).unwrap();
        let rate = quality.sample_rate() as f64;
        for (bpm, events) in &cases {
            let mut timeline = Timeline::new(*bpm, Instrument::Organ);
            timeline.events = events.clone();
            let end = events.iter().map(TimelineEvent::end_beat).fold(0.0, f64::max);
            let expected = (rate * end * 60.0 / bpm).round() as usize;
            assert_eq!(e.render(&timeline).unwrap().frames(), expected, "bpm {} at {} Hz", bpm, rate);
        }
    }
}

#[test]
fn empty_timeline_renders_nothing() {
    let rendered = engine().render(&Timeline::new(120.0, Instrument::Piano)).unwrap();
    assert_eq!(rendered.frames(), 0);
}

#[test]
fn unknown_chords_render_like_c() {
    let e = engine();
    let known = Timeline::new(90.0, Instrument::Trumpet).with_event(TimelineEvent::new("C", 0.0, 1.0, 0));
    let unknown = Timeline::new(90.0, Instrument::Trumpet).with_event(TimelineEvent::new("Xyz", 0.0, 1.0, 0));
    assert_eq!(e.render(&known).unwrap(), e.render(&unknown).unwrap());
}

#[test]
fn exported_file_has_exact_size_and_header() {
    let e = SynthEngine::new(EngineConfig { quality: Quality::High, ..EngineConfig::default() }).unwrap();
    let timeline = Timeline::new(120.0, Instrument::Bass)
        .with_event(TimelineEvent::new("E", 0.0, 1.0, 0))
        .with_event(TimelineEvent::new("E2n", 1.0, 1.0, 1));
    let path = std::env::temp_dir().join("chordbox_export_test.wav");

    let rendered = e.export_wav(&timeline, &path).unwrap();
    let data = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(rendered.frames(), 48000);
    assert_eq!(data.len(), 44 + 4 * rendered.frames());
    assert_eq!(&data[0..4], b"RIFF");
    assert_eq!(&data[8..12], b"WAVE");
    assert_eq!(u16::from_le_bytes([data[22], data[23]]), 2);
    assert_eq!(u32::from_le_bytes([data[24], data[25], data[26], data[27]]), 48000);
}

#[test]
fn project_file_renders_the_same_as_the_timeline() {
    let project = Project::from_json(
        r#"{"bpm": 120, "key": "C", "blocks": [
            {"chord_name": "C", "position": 0, "duration": 1, "track": 0},
            {"chord_name": "G", "position": 1, "duration": 1, "track": 1}
        ]}"#,
    )
    .unwrap();
    let from_project = Timeline::from_project(&project, Instrument::from_name("Organ"));
    let built = Timeline::new(120.0, Instrument::Organ)
        .with_event(TimelineEvent::new("C", 0.0, 1.0, 0))
        .with_event(TimelineEvent::new("G", 1.0, 1.0, 1));

    let e = engine();
    assert_eq!(e.render(&from_project).unwrap(), e.render(&built).unwrap());
    assert_eq!(from_project.to_project(), project);
}
