// Renders a saved project file to a WAV file.
//
// usage: chordbox-render <project.json> <out.wav> [instrument] [config.json]

use std::env;
use std::error::Error;
use std::process;

use chordbox::{EngineConfig, Instrument, Project, SynthEngine, Timeline};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        return Err("usage: chordbox-render <project.json> <out.wav> [instrument] [config.json]".into());
    }

    let project = Project::load(&args[0])?;
    let instrument = args.get(2).map(|n| Instrument::from_name(n)).unwrap_or(Instrument::Piano);
    let config = match args.get(3) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let timeline = Timeline::from_project(&project, instrument);
    let engine = SynthEngine::new(config)?;
    let rendered = engine.export_wav(&timeline, &args[1])?;

    println!(
        "{} blocks at {} BPM with {} -> {} ({:.2}s, {} Hz)",
        timeline.events.len(),
        timeline.bpm,
        instrument,
        args[1],
        rendered.duration_secs(),
        rendered.sample_rate
    );
    Ok(())
}
