//! Error types for the extraction pipeline

use std::path::PathBuf;

/// Errors raised while extracting sound effects.
///
/// `InputNotFound` and `DependencyMissing` are fatal and abort the run before
/// the machine is started. `NoAudioCaptured` and `EncodeFailed` are recorded
/// per effect and never stop the batch.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// ROM (or other input) path does not exist
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A required external tool or backend could not be resolved
    #[error("dependency missing: {0}")]
    DependencyMissing(String),

    /// The machine produced no audio frames for an effect
    #[error("no audio captured for {0}")]
    NoAudioCaptured(String),

    /// The encoder exited unsuccessfully
    #[error("encoding {name} failed: {diagnostics}")]
    EncodeFailed { name: String, diagnostics: String },

    /// Invalid configuration or catalog
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Machine backend failure (ROM load, boot)
    #[error("machine error: {0}")]
    Machine(String),

    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ExtractError {
    fn from(err: toml::de::Error) -> Self {
        ExtractError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
