//! Sound-engine memory protocol of the target ROM
//!
//! These cells belong to the game's own sound driver (Pokémon Trading Card
//! Game, DMG build), not to the Game Boy hardware. The runner relies on them as
//! an external contract: a ROM build with a different WRAM layout will not be
//! detected and simply produces silence or the wrong effect.

use crate::machine::Machine;

/// `wCurSongID`: currently playing music track
pub const CUR_SONG_ID: u16 = 0xDD80;

/// `wCurSfxID`: writing an effect id here starts it; the driver writes
/// [`SFX_FINISHED`] back once the effect ends.
pub const CUR_SFX_ID: u16 = 0xDD82;

/// `wSfxPriority`: a new effect is only accepted when its priority wins
pub const SFX_PRIORITY: u16 = 0xDD83;

/// Music pause flag. Non-zero silences music while effects keep playing.
pub const MUSIC_PAUSE: u16 = 0xDDF2;

/// Value of [`CUR_SFX_ID`] when no effect is playing
pub const SFX_FINISHED: u8 = 0x80;

/// Highest effect priority
pub const MAX_PRIORITY: u8 = 0xFF;

/// Suppress background music, leaving effect playback audible.
pub fn pause_music(machine: &mut impl Machine) {
    machine.write(MUSIC_PAUSE, 1);
}

/// Mark the current effect as finished and drop its priority.
pub fn clear_effect(machine: &mut impl Machine) {
    machine.write(CUR_SFX_ID, SFX_FINISHED);
    machine.write(SFX_PRIORITY, 0x00);
}

/// Start effect `id`.
///
/// Priority is written first: the driver's arbitration rejects an id written
/// while a higher-priority effect is registered.
pub fn trigger_effect(machine: &mut impl Machine, id: u8) {
    machine.write(SFX_PRIORITY, MAX_PRIORITY);
    machine.write(CUR_SFX_ID, id);
}

/// Whether the driver reports the current effect as finished.
pub fn effect_finished(machine: &mut impl Machine) -> bool {
    machine.read(CUR_SFX_ID) == SFX_FINISHED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubMachine;

    #[test]
    fn test_trigger_writes_priority_before_id() {
        let mut machine = StubMachine::new();
        trigger_effect(&mut machine, 0x17);

        assert_eq!(machine.triggers(), &[(0x17, MAX_PRIORITY)]);
        assert_eq!(machine.peek(CUR_SFX_ID), 0x17);
    }

    #[test]
    fn test_clear_effect_reports_finished() {
        let mut machine = StubMachine::new();
        trigger_effect(&mut machine, 0x02);
        assert!(!effect_finished(&mut machine));

        clear_effect(&mut machine);
        assert!(effect_finished(&mut machine));
        assert_eq!(machine.peek(SFX_PRIORITY), 0);
    }

    #[test]
    fn test_pause_music_sets_flag() {
        let mut machine = StubMachine::new();
        pause_music(&mut machine);
        assert_eq!(machine.peek(MUSIC_PAUSE), 1);
    }
}
