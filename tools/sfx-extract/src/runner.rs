//! Sequential sound-effect extraction
//!
//! One machine is booted once and reused for every effect:
//!
//! 1. Warm up past the intro, pause music, quiesce the sound hardware.
//! 2. Per effect: re-pause, re-quiesce, clear the previous effect, trigger,
//!    capture until the driver reports the effect finished (plus a short
//!    tail) or the window runs out.
//! 3. Trim silence, write a WAV, encode it.
//!
//! Effects are independent. A failed effect is recorded and the batch
//! continues.

use std::fs;
use std::path::{Path, PathBuf};

use crate::apu;
use crate::capture::AudioAccumulator;
use crate::catalog::EffectDescriptor;
use crate::config::Timing;
use crate::encode::{AudioEncoder, write_wav};
use crate::error::{ExtractError, Result};
use crate::machine::{Machine, MachineOptions, SAMPLE_RATE, StereoFrame};
use crate::protocol;
use crate::trim::{TrimSettings, trim_silence};

/// Name of the intermediate WAV directory inside the output directory
pub const TEMP_DIR_NAME: &str = ".temp";

/// What to extract and where
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub rom: PathBuf,
    pub output_dir: PathBuf,
    /// Skip catalog slots named `unused*`
    pub skip_unused: bool,
    /// Log every effect
    pub verbose: bool,
}

/// Result of one catalog entry
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// File written; duration of the trimmed audio
    Succeeded { duration_ms: u64 },
    /// Nothing written
    Failed(ExtractError),
    /// Excluded by `skip_unused`; not a failure
    Skipped,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Succeeded { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed(_))
    }
}

/// Per-effect outcomes of a run, in catalog order
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub outcomes: Vec<(String, ExtractionOutcome)>,
}

impl ExtractionReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ExtractionOutcome::Skipped))
            .count()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| o.is_failure())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn outcome(&self, name: &str) -> Option<&ExtractionOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, o)| o)
    }

    /// At least one effect was extracted
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
    }
}

/// Removes the intermediate directory when dropped, including on early
/// error returns.
struct TempDirGuard(PathBuf);

impl TempDirGuard {
    fn create(path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&path)?;
        Ok(Self(path))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.0) {
            tracing::debug!("Failed to remove {}: {}", self.0.display(), err);
        }
    }
}

/// Fail with [`ExtractError::InputNotFound`] unless `rom` exists.
pub fn ensure_rom(rom: &Path) -> Result<()> {
    if rom.exists() {
        Ok(())
    } else {
        Err(ExtractError::InputNotFound(rom.to_path_buf()))
    }
}

/// Create the output directory and its intermediate WAV directory.
fn prepare_output(output_dir: &Path) -> Result<TempDirGuard> {
    fs::create_dir_all(output_dir)?;
    TempDirGuard::create(output_dir.join(TEMP_DIR_NAME))
}

/// Batch driver extracting every catalog entry from one machine.
pub struct SfxExtractionRunner<E> {
    catalog: Vec<EffectDescriptor>,
    encoder: E,
    timing: Timing,
    trim: TrimSettings,
    sample_rate: u32,
}

impl<E: AudioEncoder> SfxExtractionRunner<E> {
    pub fn new(catalog: Vec<EffectDescriptor>, encoder: E) -> Self {
        Self {
            catalog,
            encoder,
            timing: Timing::default(),
            trim: TrimSettings::default(),
            sample_rate: SAMPLE_RATE,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_trim(mut self, trim: TrimSettings) -> Self {
        self.trim = trim;
        self
    }

    /// Run the whole batch.
    ///
    /// `start` boots the machine; it is only called after the ROM check. The
    /// output directories are created once the machine is running. Per-effect
    /// failures end up in the report; only setup errors are returned as `Err`.
    pub fn run<M, F>(&self, options: &ExtractOptions, start: F) -> Result<ExtractionReport>
    where
        M: Machine,
        F: FnOnce(&MachineOptions) -> Result<M>,
    {
        ensure_rom(&options.rom)?;

        tracing::info!("Loading ROM: {}", options.rom.display());
        let mut machine = start(&MachineOptions {
            rom: options.rom.clone(),
            headless: true,
            audio_enabled: true,
            sample_rate: self.sample_rate,
        })?;

        let temp = match prepare_output(&options.output_dir) {
            Ok(temp) => temp,
            Err(err) => {
                machine.stop();
                return Err(err);
            }
        };

        tracing::info!("Extracting {} effects", self.catalog.len());
        self.boot(&mut machine);

        let mut report = ExtractionReport::default();
        for effect in &self.catalog {
            let outcome = self.extract_effect(&mut machine, effect, temp.path(), options);
            report.outcomes.push((effect.name.clone(), outcome));
        }

        machine.stop();
        Ok(report)
    }

    /// Bring a freshly started machine to a quiet, music-free state.
    fn boot(&self, machine: &mut impl Machine) {
        tracing::info!(
            "Initializing game ({} ticks to the title screen)...",
            self.timing.warmup_ticks
        );
        machine.advance(self.timing.warmup_ticks);
        tracing::debug!("Title song id {:#04x}", machine.read(protocol::CUR_SONG_ID));

        tracing::info!("Pausing music and resetting sound channels...");
        protocol::pause_music(machine);
        apu::quiesce(machine);
        machine.advance(self.timing.settle_ticks);
    }

    fn extract_effect(
        &self,
        machine: &mut impl Machine,
        effect: &EffectDescriptor,
        temp_dir: &Path,
        options: &ExtractOptions,
    ) -> ExtractionOutcome {
        if options.skip_unused && effect.is_unused() {
            if options.verbose {
                tracing::info!("Skipping {}", effect.name);
            }
            return ExtractionOutcome::Skipped;
        }

        let frames = self.capture(machine, effect);
        if frames.is_empty() {
            if options.verbose {
                tracing::info!("{:02X} {}: NO AUDIO", effect.id, effect.name);
            }
            return ExtractionOutcome::Failed(ExtractError::NoAudioCaptured(effect.name.clone()));
        }

        let frames = frames.into_frames();
        let trimmed = trim_silence(&frames, &self.trim, self.sample_rate);

        match self.encode(effect, trimmed, temp_dir, &options.output_dir) {
            Ok(()) => {
                let duration_ms = trimmed.len() as u64 * 1000 / self.sample_rate as u64;
                if options.verbose {
                    tracing::info!("{:02X} {}: OK ({}ms)", effect.id, effect.name, duration_ms);
                }
                ExtractionOutcome::Succeeded { duration_ms }
            }
            Err(err) => {
                if options.verbose {
                    tracing::info!("{:02X} {}: CONVERT FAILED", effect.id, effect.name);
                }
                ExtractionOutcome::Failed(err)
            }
        }
    }

    /// Reset, trigger and record one effect.
    fn capture(&self, machine: &mut impl Machine, effect: &EffectDescriptor) -> AudioAccumulator {
        let timing = &self.timing;

        // Earlier effects can disturb driver state; re-assert everything
        protocol::pause_music(machine);
        apu::quiesce(machine);

        protocol::clear_effect(machine);
        machine.advance(timing.clear_ticks);

        protocol::trigger_effect(machine, effect.id);

        let mut audio = AudioAccumulator::new();
        let window = effect
            .estimated_duration_frames
            .saturating_add(timing.record_margin_ticks);

        for tick in 0..window {
            machine.advance_one_tick();
            audio.push(machine.sample_audio_frame());

            if tick > timing.early_exit_after && protocol::effect_finished(machine) {
                for _ in 0..timing.tail_ticks {
                    machine.advance_one_tick();
                    audio.push(machine.sample_audio_frame());
                }
                tracing::trace!("{} finished after {} ticks", effect.name, tick + 1);
                break;
            }
        }

        audio
    }

    fn encode(
        &self,
        effect: &EffectDescriptor,
        frames: &[StereoFrame],
        temp_dir: &Path,
        output_dir: &Path,
    ) -> Result<()> {
        let wav_path = temp_dir.join(format!("{}.wav", effect.name));
        let output_path =
            output_dir.join(format!("{}.{}", effect.name, self.encoder.extension()));

        write_wav(&wav_path, frames, self.sample_rate)?;
        self.encoder.encode(&effect.name, &wav_path, &output_path)
    }
}
