use crate::envelope::EnvelopeShape;
use crate::waveform::Modulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Piano,
    Guitar,
    Strings,
    Organ,
    Synth,
    Bass,
    Flute,
    Saxophone,
    Trumpet,
    Trombone,
    Violin,
    Cello,
    Default, // anything unrecognized, sounds like Piano
}

impl Instrument {
    pub const ALL: [Instrument; 13] = [
        Instrument::Piano, Instrument::Guitar, Instrument::Strings, Instrument::Organ,
        Instrument::Synth, Instrument::Bass, Instrument::Flute, Instrument::Saxophone,
        Instrument::Trumpet, Instrument::Trombone, Instrument::Violin, Instrument::Cello,
        Instrument::Default,
    ];

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|i| *i != Instrument::Default && i.name() == name)
            .unwrap_or(Instrument::Default)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Piano => "Piano",
            Instrument::Guitar => "Guitar",
            Instrument::Strings => "Strings",
            Instrument::Organ => "Organ",
            Instrument::Synth => "Synth",
            Instrument::Bass => "Bass",
            Instrument::Flute => "Flute",
            Instrument::Saxophone => "Saxophone",
            Instrument::Trumpet => "Trumpet",
            Instrument::Trombone => "Trombone",
            Instrument::Violin => "Violin",
            Instrument::Cello => "Cello",
            Instrument::Default => "Default",
        }
    }

    pub fn profile(&self) -> &'static InstrumentProfile {
        match self {
            Instrument::Piano | Instrument::Default => &PIANO,
            Instrument::Guitar => &GUITAR,
            Instrument::Strings => &STRINGS,
            Instrument::Organ => &ORGAN,
            Instrument::Synth => &SYNTH,
            Instrument::Bass => &BASS,
            Instrument::Flute => &FLUTE,
            Instrument::Saxophone => &SAXOPHONE,
            Instrument::Trumpet => &TRUMPET,
            Instrument::Trombone => &TROMBONE,
            Instrument::Violin => &VIOLIN,
            Instrument::Cello => &CELLO,
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct InstrumentProfile {
    pub harmonics: &'static [f64], // index 0 is the fundamental
    pub decay_rate: f64,
    pub modulation: Modulation,
    pub normalization: f64, // brings the raw sum to about [-1, 1]
    pub envelope: EnvelopeShape,
}

impl InstrumentProfile {
    pub fn is_deterministic(&self) -> bool {
        self.modulation.is_deterministic()
    }
}

static PIANO: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.6, 0.4, 0.3, 0.2, 0.15],
    decay_rate: 1.2,
    modulation: Modulation::None,
    normalization: 2.65,
    envelope: EnvelopeShape { attack: 0.01, decay: 0.15, sustain_level: 0.6, release: 0.4 },
};

static GUITAR: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.5, 0.35, 0.2, 0.1],
    decay_rate: 2.5,
    modulation: Modulation::None,
    normalization: 2.15,
    envelope: EnvelopeShape { attack: 0.005, decay: 0.10, sustain_level: 0.5, release: 0.5 },
};

static STRINGS: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.7, 0.5, 0.35, 0.25],
    decay_rate: 0.0,
    modulation: Modulation::Chorus { rate: 5.5, depth: 0.004, jitter: 1.0 },
    normalization: 2.8,
    envelope: EnvelopeShape { attack: 0.08, decay: 0.10, sustain_level: 0.8, release: 0.3 },
};

static ORGAN: InstrumentProfile = InstrumentProfile {
    harmonics: &[0.8, 1.0, 0.6, 0.5, 0.3, 0.25],
    decay_rate: 0.0,
    modulation: Modulation::Tremolo { rate: 6.0, depth: 0.15 },
    normalization: 3.45,
    envelope: EnvelopeShape { attack: 0.02, decay: 0.05, sustain_level: 0.9, release: 0.2 },
};

// 1/n series, the pulse width sweep shapes which of them speak
static SYNTH: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.5, 0.333, 0.25, 0.2, 0.1667, 0.1429, 0.125],
    decay_rate: 0.0,
    modulation: Modulation::PulseWidth { rate: 0.8, depth: 0.35 },
    normalization: 2.72,
    envelope: EnvelopeShape { attack: 0.02, decay: 0.20, sustain_level: 0.7, release: 0.3 },
};

static BASS: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.2, 0.9, 0.5, 0.3],
    decay_rate: 0.8,
    modulation: Modulation::None,
    normalization: 2.9,
    envelope: EnvelopeShape { attack: 0.005, decay: 0.10, sustain_level: 0.7, release: 0.4 },
};

static FLUTE: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.12, 0.05],
    decay_rate: 0.0,
    modulation: Modulation::Breath { rate: 5.5, depth: 0.003, noise: 0.04 },
    normalization: 1.25,
    envelope: EnvelopeShape { attack: 0.04, decay: 0.10, sustain_level: 0.8, release: 0.3 },
};

static SAXOPHONE: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.8, 0.6, 0.5, 0.35],
    decay_rate: 0.0,
    modulation: Modulation::Breath { rate: 6.0, depth: 0.004, noise: 0.03 },
    normalization: 3.35,
    envelope: EnvelopeShape { attack: 0.03, decay: 0.12, sustain_level: 0.75, release: 0.3 },
};

static TRUMPET: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.7, 0.6, 0.5, 0.4],
    decay_rate: 0.0,
    modulation: Modulation::Vibrato { rate: 5.0, depth: 0.002 },
    normalization: 3.2,
    envelope: EnvelopeShape { attack: 0.008, decay: 0.10, sustain_level: 0.8, release: 0.25 },
};

static TROMBONE: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.75, 0.55, 0.4],
    decay_rate: 0.0,
    modulation: Modulation::Vibrato { rate: 4.5, depth: 0.002 },
    normalization: 2.7,
    envelope: EnvelopeShape { attack: 0.012, decay: 0.12, sustain_level: 0.75, release: 0.3 },
};

static VIOLIN: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.7, 0.5, 0.4, 0.3],
    decay_rate: 0.0,
    modulation: Modulation::Vibrato { rate: 6.0, depth: 0.004 },
    normalization: 2.9,
    envelope: EnvelopeShape { attack: 0.06, decay: 0.10, sustain_level: 0.85, release: 0.25 },
};

static CELLO: InstrumentProfile = InstrumentProfile {
    harmonics: &[1.0, 0.8, 0.6, 0.45, 0.32],
    decay_rate: 0.0,
    modulation: Modulation::Vibrato { rate: 5.2, depth: 0.0035 },
    normalization: 3.17,
    envelope: EnvelopeShape { attack: 0.07, decay: 0.12, sustain_level: 0.8, release: 0.3 },
};
