//! Game Boy backend built on the `boytacean` emulator

use boytacean::gb::{AudioProvider, GameBoy, GameBoyMode};

use crate::error::{ExtractError, Result};
use crate::machine::{Machine, MachineOptions, StereoFrame};

/// Largest sample boytacean emits: four channels at volume 15
pub const MAX_APU_SAMPLE: u8 = 60;

/// Map one boytacean sample (`0..=60`, unsigned sum of channel volumes) into
/// the signed 8-bit domain.
///
/// The mapping is unipolar: silence stays at 0 so the trimmer still sees it
/// as silence, and full volume lands at 120.
pub fn to_signed_sample(sample: u8) -> i8 {
    (sample.min(MAX_APU_SAMPLE) * 2) as i8
}

/// Interleaved `[left, right, ...]` samples into stereo frames. A trailing
/// unpaired sample is dropped.
pub fn to_stereo_frames(samples: &[u8]) -> Vec<StereoFrame> {
    samples
        .chunks_exact(2)
        .map(|pair| [to_signed_sample(pair[0]), to_signed_sample(pair[1])])
        .collect()
}

/// DMG machine; one tick is one emulated video frame.
pub struct BoytaceanMachine {
    gb: GameBoy,
}

impl BoytaceanMachine {
    pub fn start(options: &MachineOptions) -> Result<Self> {
        let rom = options
            .rom
            .to_str()
            .ok_or_else(|| ExtractError::Machine(format!("non UTF-8 ROM path {:?}", options.rom)))?;

        let mut gb = GameBoy::new(Some(GameBoyMode::Dmg));
        gb.load(true)
            .map_err(|err| ExtractError::Machine(format!("boot failed: {err:?}")))?;
        gb.load_rom_file(rom, None)
            .map_err(|err| ExtractError::Machine(format!("cannot load {rom}: {err:?}")))?;
        gb.set_apu_enabled(options.audio_enabled);

        if options.sample_rate != 44_100 {
            tracing::warn!(
                "boytacean renders audio at 44100 Hz, requested {} Hz",
                options.sample_rate
            );
        }

        Ok(Self { gb })
    }
}

impl Machine for BoytaceanMachine {
    fn write(&mut self, address: u16, value: u8) {
        self.gb.write_memory(address, value);
    }

    fn read(&mut self, address: u16) -> u8 {
        self.gb.read_memory(address)
    }

    fn advance_one_tick(&mut self) {
        // Keep only the audio of the frame about to run
        self.gb.clear_audio_buffer();
        self.gb.next_frame();
    }

    fn sample_audio_frame(&mut self) -> Vec<StereoFrame> {
        let samples: Vec<u8> = self.gb.audio_buffer().iter().copied().collect();
        to_stereo_frames(&samples)
    }
}
