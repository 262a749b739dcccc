/// Error types for synthesis, playback and configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Recipe values outside their domain (non-positive duration, empty sequence, ...)
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Sound key not present in the catalog or custom sounds
    #[error("Unknown sound: {0}")]
    UnknownSound(String),

    /// Music track name never registered
    #[error("Unknown music track: {0}")]
    UnknownTrack(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing audio file
    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDevice(String),
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;
