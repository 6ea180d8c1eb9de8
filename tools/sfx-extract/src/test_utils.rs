//! Test doubles for the extraction pipeline
//!
//! [`StubMachine`] emulates just enough of the sound driver protocol to
//! exercise the runner; [`CopyEncoder`] stands in for ffmpeg.

use std::cell::RefCell;
use std::path::Path;

use crate::encode::AudioEncoder;
use crate::error::{ExtractError, Result};
use crate::machine::{Machine, SAMPLE_RATE, StereoFrame};
use crate::protocol::{CUR_SFX_ID, SFX_FINISHED, SFX_PRIORITY};

/// Audio produced by a [`StubMachine`] once an effect is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubAudio {
    /// A square wave for the first `loud_ticks` ticks after the trigger,
    /// then zero-filled (but non-empty) chunks
    Tone { amplitude: i8, loud_ticks: u32 },
    /// Every tick yields an empty chunk
    Empty,
}

/// Scripted machine with flat 64 KiB memory.
///
/// Writing an effect id (anything but [`SFX_FINISHED`]) to [`CUR_SFX_ID`]
/// starts an effect. The machine writes the finished sentinel back after the
/// configured number of ticks, like the real sound driver.
#[derive(Debug)]
pub struct StubMachine {
    memory: Vec<u8>,
    ticks: u64,
    ticks_since_trigger: Option<u32>,
    finish_after: Option<u32>,
    audio: StubAudio,
    triggers: Vec<(u8, u8)>,
    stopped: bool,
}

impl Default for StubMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StubMachine {
    /// Samples produced per tick (44100 Hz / 60)
    pub const SAMPLES_PER_TICK: usize = (SAMPLE_RATE / 60) as usize;

    pub fn new() -> Self {
        Self {
            memory: vec![0; 0x1_0000],
            ticks: 0,
            ticks_since_trigger: None,
            finish_after: None,
            audio: StubAudio::Tone {
                amplitude: 48,
                loud_ticks: 50,
            },
            triggers: Vec::new(),
            stopped: false,
        }
    }

    /// Report the effect finished `ticks` ticks after each trigger.
    pub fn finish_after(mut self, ticks: u32) -> Self {
        self.finish_after = Some(ticks);
        self
    }

    pub fn with_audio(mut self, audio: StubAudio) -> Self {
        self.audio = audio;
        self
    }

    /// Read memory without going through [`Machine::read`]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    /// Set memory without triggering anything
    pub fn poke(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }

    /// Total ticks advanced
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks since the most recent trigger
    pub fn ticks_since_trigger(&self) -> Option<u32> {
        self.ticks_since_trigger
    }

    /// `(effect id, priority at trigger time)` for every trigger
    pub fn triggers(&self) -> &[(u8, u8)] {
        &self.triggers
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn tone_chunk(amplitude: i8) -> Vec<StereoFrame> {
        (0..Self::SAMPLES_PER_TICK)
            .map(|i| {
                let s = if (i / 50) % 2 == 0 { amplitude } else { -amplitude };
                [s, s]
            })
            .collect()
    }
}

impl Machine for StubMachine {
    fn write(&mut self, address: u16, value: u8) {
        if address == CUR_SFX_ID && value != SFX_FINISHED {
            self.triggers.push((value, self.peek(SFX_PRIORITY)));
            self.ticks_since_trigger = Some(0);
        }
        self.poke(address, value);
    }

    fn read(&mut self, address: u16) -> u8 {
        self.peek(address)
    }

    fn advance_one_tick(&mut self) {
        self.ticks += 1;
        if let Some(elapsed) = self.ticks_since_trigger.as_mut() {
            *elapsed += 1;
            if self.finish_after == Some(*elapsed) {
                self.memory[CUR_SFX_ID as usize] = SFX_FINISHED;
            }
        }
    }

    fn sample_audio_frame(&mut self) -> Vec<StereoFrame> {
        match (self.audio, self.ticks_since_trigger) {
            (StubAudio::Tone { .. }, None) | (StubAudio::Empty, _) => Vec::new(),
            (StubAudio::Tone { amplitude, loud_ticks }, Some(elapsed)) => {
                if elapsed <= loud_ticks {
                    Self::tone_chunk(amplitude)
                } else {
                    vec![[0, 0]; Self::SAMPLES_PER_TICK]
                }
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Encoder that copies the intermediate WAV to the output path.
#[derive(Debug)]
pub struct CopyEncoder {
    extension: String,
    fail: bool,
    calls: RefCell<Vec<String>>,
}

impl Default for CopyEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyEncoder {
    pub fn new() -> Self {
        Self {
            extension: "mp3".to_string(),
            fail: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Encoder that rejects every input, like ffmpeg exiting non-zero
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Effect names passed to [`AudioEncoder::encode`], in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AudioEncoder for CopyEncoder {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn encode(&self, name: &str, wav: &Path, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(name.to_string());
        if self.fail {
            return Err(ExtractError::EncodeFailed {
                name: name.to_string(),
                diagnostics: "stub encoder rejected input".to_string(),
            });
        }
        std::fs::copy(wav, output)?;
        Ok(())
    }
}
