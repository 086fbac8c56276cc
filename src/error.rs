use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Timeline has no events")]
    EmptyTimeline,

    #[error("Playback is already active")]
    AlreadyPlaying,

    #[error("Export failed: {0}")]
    Export(#[source] hound::Error),

    #[error("File Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing Error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Audio Error: {0}")]
    AudioError(String),
}

impl From<hound::Error> for SynthError { // hound wraps io errors too, keep them under Export
    fn from(err: hound::Error) -> Self {
        SynthError::Export(err)
    }
}
