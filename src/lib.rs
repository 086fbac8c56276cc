//  _______           _______  _______  ______   ______   _______          
// (  ____ \|\     /|(  ___  )(  ____ )(  __  \ (  ___ \ (  ___  )|\     /|
// | (    \/| )   ( || (   ) || (    )|| (  \  )| (   ) )| (   ) |( \   / )
// | |      | (___) || |   | || (____)|| |   ) || (__/ / | |   | | \ (_) / 
// | |      |  ___  || |   | ||     __)| |   | ||  __ (  | |   | |  ) _ (  
// | |      | (   ) || |   | || (\ (   | |   ) || (  \ \ | |   | | / ( ) \ 
// | (____/\| )   ( || (___) || ) \ \__| (__/  )| )___) )| (___) |( /   \ )
// (_______/|/     \|(_______)|/   \__/(______/ |/ \___/ (_______)|/     \|

pub mod error;
pub mod pitch;
pub mod chord;
pub mod instrument;
pub mod waveform;
pub mod envelope;
pub mod effects;
pub mod buffer;
pub mod synth;
pub mod mixer;
pub mod timeline;
pub mod scheduler;
pub mod output;
pub mod config;
pub mod engine;
pub mod wav;

pub use error::SynthError;
pub use instrument::{Instrument, InstrumentProfile};
pub use waveform::Modulation;
pub use envelope::EnvelopeShape;
pub use effects::{EffectsChain, ReverbParams, SmoothingParams};
pub use buffer::RenderedBuffer;
pub use synth::ToneSynth;
pub use mixer::ChordMixer;
pub use timeline::{Timeline, TimelineEvent, Project, Block};
pub use scheduler::{CancellationToken, PlaybackOutcome};
pub use output::{PlaybackSink, LanePool, LaneSink};
#[cfg(feature = "device")]
pub use output::DeviceOutput;
pub use config::{EngineConfig, Quality, SchedulerConfig};
pub use engine::{SynthEngine, PlaybackState};
