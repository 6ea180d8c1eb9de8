//! Counter sprite generator for the card game plugin
//!
//! Renders coin-style damage and status counters as transparent PNGs: a black
//! edge, a colored ring, a darker inner face, and a white outlined value or
//! icon on top.

pub mod counter;
pub mod error;
pub mod glyph;
pub mod palette;

use std::path::{Path, PathBuf};

pub use counter::{CounterStyle, DEFAULT_SIZE, Face, render_counter, render_kind};
pub use error::CounterError;
pub use palette::{CounterKind, Palette, StatusIcon, parse_hex_color};

/// Render every counter into `output_dir`, creating it if needed.
///
/// Returns the written paths in [`CounterKind::ALL`] order.
pub fn generate_counters(
    output_dir: &Path,
    style: &CounterStyle,
) -> Result<Vec<PathBuf>, CounterError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(CounterKind::ALL.len());
    for kind in CounterKind::ALL {
        let image = render_kind(kind, style)?;
        let path = output_dir.join(kind.file_name());
        image.save(&path)?;
        tracing::info!("Generated {}", path.display());
        written.push(path);
    }
    Ok(written)
}
