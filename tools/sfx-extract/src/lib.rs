//! sfx-extract - capture sound effects from a Game Boy ROM
//!
//! Boots the ROM in an emulator, triggers each effect through the game's own
//! sound driver, records the audio output tick by tick, trims silence and
//! encodes one file per effect.
//!
//! The emulator is reached only through the [`Machine`] trait, so the whole
//! pipeline runs against [`test_utils::StubMachine`] in tests.

pub mod apu;
pub mod backend;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod encode;
pub mod error;
pub mod machine;
pub mod protocol;
pub mod runner;
pub mod test_utils;
pub mod trim;

pub use catalog::{EffectDescriptor, reference_catalog};
pub use config::{ExtractConfig, Timing};
pub use encode::{AudioEncoder, EncoderConfig, FfmpegEncoder};
pub use error::{ExtractError, Result};
pub use machine::{Machine, MachineOptions, SAMPLE_RATE, StereoFrame};
pub use runner::{
    ExtractOptions, ExtractionOutcome, ExtractionReport, SfxExtractionRunner, ensure_rom,
};
pub use trim::{TrimSettings, trim_silence};

/// Check preconditions, then extract every effect of `config`'s catalog.
///
/// Fails before the machine is started when the ROM is missing
/// ([`ExtractError::InputNotFound`]), the encoder cannot be resolved
/// ([`ExtractError::DependencyMissing`]) or the catalog is invalid.
pub fn extract<M, F>(
    options: &ExtractOptions,
    config: &ExtractConfig,
    start: F,
) -> Result<ExtractionReport>
where
    M: Machine,
    F: FnOnce(&MachineOptions) -> Result<M>,
{
    ensure_rom(&options.rom)?;
    let encoder = FfmpegEncoder::resolve(&config.encoder, SAMPLE_RATE)?;
    tracing::info!("Using encoder {}", encoder.program().display());
    let catalog = config.catalog()?;

    SfxExtractionRunner::new(catalog, encoder)
        .with_timing(config.timing.clone())
        .with_trim(config.trim.clone())
        .run(options, start)
}
