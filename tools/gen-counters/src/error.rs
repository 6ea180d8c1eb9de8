//! Error types for counter generation

/// Errors raised while building or saving counter images
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// Palette entry is not `#RRGGBB`
    #[error("invalid color {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    /// Counter too small to hold the coin rings
    #[error("counter size {0} is too small (minimum {min})", min = crate::counter::MIN_SIZE)]
    InvalidSize(u32),

    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
