//! WAV writing and external encoder invocation
//!
//! Captured audio is widened to 16-bit PCM, written as an intermediate WAV with
//! `hound`, then handed to `ffmpeg` for MP3 encoding.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::error::{ExtractError, Result};
use crate::machine::StereoFrame;

/// Default encoder executable name
pub const FFMPEG: &str = "ffmpeg";

/// Encoder settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Explicit encoder executable; resolved from PATH when unset
    pub program: Option<PathBuf>,
    /// libmp3lame VBR quality (`-qscale:a`, 0 = best)
    pub quality: u8,
    /// Output file extension
    pub extension: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: None,
            quality: 2,
            extension: "mp3".to_string(),
        }
    }
}

/// Widen a signed 8-bit sample to 16 bits (linear ×256, clipped).
pub fn widen_sample(sample: i8) -> i16 {
    (sample as i32 * 256).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Write stereo frames as a 2-channel 16-bit PCM WAV.
pub fn write_wav(path: &Path, frames: &[StereoFrame], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &[left, right] in frames {
        writer.write_sample(widen_sample(left))?;
        writer.write_sample(widen_sample(right))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Converts an intermediate WAV into the final compressed file.
pub trait AudioEncoder {
    /// Extension of produced files, without the dot
    fn extension(&self) -> &str;

    /// Encode `wav` into `output`.
    ///
    /// Returns [`ExtractError::EncodeFailed`] carrying the encoder's
    /// diagnostics when it exits unsuccessfully.
    fn encode(&self, name: &str, wav: &Path, output: &Path) -> Result<()>;
}

impl<E: AudioEncoder + ?Sized> AudioEncoder for &E {
    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn encode(&self, name: &str, wav: &Path, output: &Path) -> Result<()> {
        (**self).encode(name, wav, output)
    }
}

/// MP3 encoding through an `ffmpeg` subprocess
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
    quality: u8,
    sample_rate: u32,
    extension: String,
}

impl FfmpegEncoder {
    /// Locate ffmpeg and confirm it runs.
    ///
    /// Lookup order: the configured program, `ffmpeg` on PATH, then
    /// `~/bin/ffmpeg`.
    pub fn resolve(config: &EncoderConfig, sample_rate: u32) -> Result<Self> {
        let program = match &config.program {
            Some(program) => program.clone(),
            None => find_ffmpeg()?,
        };

        probe(&program)?;

        Ok(Self {
            program,
            quality: config.quality,
            sample_rate,
            extension: config.extension.clone(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to ffmpeg for one conversion
    fn args(&self, wav: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = Vec::with_capacity(11);
        args.push("-y".into());
        args.push("-i".into());
        args.push(wav.into());
        args.push("-codec:a".into());
        args.push("libmp3lame".into());
        args.push("-qscale:a".into());
        args.push(self.quality.to_string().into());
        args.push("-ar".into());
        args.push(self.sample_rate.to_string().into());
        args.push(output.into());
        args
    }
}

impl AudioEncoder for FfmpegEncoder {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn encode(&self, name: &str, wav: &Path, output: &Path) -> Result<()> {
        // Blocks until ffmpeg exits
        let result = Command::new(&self.program)
            .args(self.args(wav, output))
            .output()?;

        if !result.status.success() {
            let diagnostics = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::warn!("ffmpeg error for {}: {}", name, diagnostics);
            return Err(ExtractError::EncodeFailed {
                name: name.to_string(),
                diagnostics,
            });
        }
        Ok(())
    }
}

/// Find the ffmpeg executable: PATH first, then the per-user install location.
fn find_ffmpeg() -> Result<PathBuf> {
    if let Ok(path) = which::which(FFMPEG) {
        return Ok(path);
    }

    if let Some(fallback) = fallback_ffmpeg_path() {
        if fallback.exists() {
            return Ok(fallback);
        }
    }

    Err(ExtractError::DependencyMissing(format!(
        "{FFMPEG} not found on PATH or in ~/bin. Install it or download a static binary."
    )))
}

/// `~/bin/ffmpeg`
fn fallback_ffmpeg_path() -> Option<PathBuf> {
    let exe_name = if cfg!(windows) { "ffmpeg.exe" } else { FFMPEG };
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join("bin").join(exe_name))
}

/// Run `<program> -version` and require a successful exit.
fn probe(program: &Path) -> Result<()> {
    let missing = || {
        ExtractError::DependencyMissing(format!(
            "encoder {} does not run (`-version` probe failed)",
            program.display()
        ))
    };

    let output = Command::new(program)
        .arg("-version")
        .output()
        .map_err(|_| missing())?;
    if !output.status.success() {
        return Err(missing());
    }
    Ok(())
}
