//! Emulated machine capability
//!
//! The extraction runner never looks inside the emulator. It drives it through
//! the narrow [`Machine`] trait: poke and peek memory, advance one tick, and
//! drain the audio produced by that tick.

use std::path::PathBuf;

/// Output sample rate requested from the emulator (Hz)
pub const SAMPLE_RATE: u32 = 44_100;

/// One interleaved stereo sample pair `[left, right]` in the emulator's native
/// signed 8-bit domain (`-128..=127`).
pub type StereoFrame = [i8; 2];

/// Parameters used to start an emulated machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineOptions {
    /// ROM image to boot
    pub rom: PathBuf,
    /// Run without any display window
    pub headless: bool,
    /// Emulate the sound hardware
    pub audio_enabled: bool,
    /// Audio output sample rate in Hz
    pub sample_rate: u32,
}

impl MachineOptions {
    /// Options for a headless, audio-enabled machine at [`SAMPLE_RATE`].
    pub fn headless_audio(rom: impl Into<PathBuf>) -> Self {
        Self {
            rom: rom.into(),
            headless: true,
            audio_enabled: true,
            sample_rate: SAMPLE_RATE,
        }
    }
}

/// An exclusively-owned emulated machine advanced one discrete tick at a time.
///
/// A tick is one video frame of the emulated hardware (~1/60 s).
pub trait Machine {
    /// Write a byte to the machine's address space.
    fn write(&mut self, address: u16, value: u8);

    /// Read a byte from the machine's address space.
    ///
    /// Takes `&mut self` because memory-mapped reads may have side effects.
    fn read(&mut self, address: u16) -> u8;

    /// Advance the machine by one tick.
    fn advance_one_tick(&mut self);

    /// Audio produced by the most recent tick.
    ///
    /// Returns an empty vector when that tick produced no samples.
    fn sample_audio_frame(&mut self) -> Vec<StereoFrame>;

    /// Release emulator resources. Called once after the batch completes.
    fn stop(&mut self) {}

    /// Advance the machine by `ticks` ticks.
    fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.advance_one_tick();
        }
    }
}

impl<M: Machine + ?Sized> Machine for &mut M {
    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value)
    }

    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    fn advance_one_tick(&mut self) {
        (**self).advance_one_tick()
    }

    fn sample_audio_frame(&mut self) -> Vec<StereoFrame> {
        (**self).sample_audio_frame()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

impl<M: Machine + ?Sized> Machine for Box<M> {
    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value)
    }

    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    fn advance_one_tick(&mut self) {
        (**self).advance_one_tick()
    }

    fn sample_audio_frame(&mut self) -> Vec<StereoFrame> {
        (**self).sample_audio_frame()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
