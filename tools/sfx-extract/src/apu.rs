//! Game Boy sound hardware registers

use crate::machine::Machine;

// Channel 1 (square with sweep)
pub const NR10: u16 = 0xFF10; // sweep
pub const NR11: u16 = 0xFF11; // length / duty
pub const NR12: u16 = 0xFF12; // envelope
pub const NR13: u16 = 0xFF13; // frequency low
pub const NR14: u16 = 0xFF14; // frequency high / control

// Channel 2 (square)
pub const NR21: u16 = 0xFF16;
pub const NR22: u16 = 0xFF17;
pub const NR23: u16 = 0xFF18;
pub const NR24: u16 = 0xFF19;

// Channel 3 (wave)
pub const NR30: u16 = 0xFF1A; // DAC enable
pub const NR31: u16 = 0xFF1B;
pub const NR32: u16 = 0xFF1C;
pub const NR33: u16 = 0xFF1D;
pub const NR34: u16 = 0xFF1E;

// Channel 4 (noise)
pub const NR41: u16 = 0xFF20;
pub const NR42: u16 = 0xFF21;
pub const NR43: u16 = 0xFF22;
pub const NR44: u16 = 0xFF23;

// Control
pub const NR50: u16 = 0xFF24; // master volume
pub const NR51: u16 = 0xFF25; // panning
pub const NR52: u16 = 0xFF26; // master enable

/// Restart bit of the NRx4 control registers
pub const TRIGGER: u8 = 0x80;

/// NR50: volume 7 on both outputs
pub const MASTER_VOLUME_FULL: u8 = 0x77;

/// NR51: every channel routed to both speakers
pub const PAN_ALL_BOTH: u8 = 0xFF;

/// Force every sound channel into a silent, known configuration.
///
/// Channels keep envelope, duty and sweep state across notes, so a residual
/// setting from one effect leaks into the next capture unless it is reset.
/// Applying this twice leaves the registers as applying it once.
pub fn quiesce(machine: &mut impl Machine) {
    // Zero envelopes on the tone and noise channels
    machine.write(NR12, 0x00);
    machine.write(NR22, 0x00);
    machine.write(NR42, 0x00);

    // Wave channel output off
    machine.write(NR30, 0x00);

    // Restart so the silent envelope applies now, not after the note decays
    machine.write(NR14, TRIGGER);
    machine.write(NR24, TRIGGER);
    machine.write(NR44, TRIGGER);

    machine.write(NR10, 0x00);
    machine.write(NR11, 0x00);
    machine.write(NR21, 0x00);

    machine.write(NR50, MASTER_VOLUME_FULL);
    machine.write(NR51, PAN_ALL_BOTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubMachine;

    const SOUND_REGISTERS: std::ops::RangeInclusive<u16> = NR10..=NR52;

    fn register_snapshot(machine: &StubMachine) -> Vec<u8> {
        SOUND_REGISTERS.map(|addr| machine.peek(addr)).collect()
    }

    #[test]
    fn test_quiesce_silences_channels() {
        let mut machine = StubMachine::new();
        machine.poke(NR12, 0xF3);
        machine.poke(NR22, 0xA1);
        machine.poke(NR42, 0x71);
        machine.poke(NR30, 0x80);
        machine.poke(NR50, 0x11);

        quiesce(&mut machine);

        assert_eq!(machine.peek(NR12), 0);
        assert_eq!(machine.peek(NR22), 0);
        assert_eq!(machine.peek(NR42), 0);
        assert_eq!(machine.peek(NR30), 0);
        assert_eq!(machine.peek(NR14), TRIGGER);
        assert_eq!(machine.peek(NR24), TRIGGER);
        assert_eq!(machine.peek(NR44), TRIGGER);
        assert_eq!(machine.peek(NR50), MASTER_VOLUME_FULL);
        assert_eq!(machine.peek(NR51), PAN_ALL_BOTH);
    }

    #[test]
    fn test_quiesce_is_idempotent() {
        let mut machine = StubMachine::new();
        for (i, addr) in SOUND_REGISTERS.enumerate() {
            machine.poke(addr, (i as u8).wrapping_mul(37));
        }

        quiesce(&mut machine);
        let once = register_snapshot(&machine);
        quiesce(&mut machine);
        let twice = register_snapshot(&machine);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_quiesce_leaves_frequency_registers() {
        let mut machine = StubMachine::new();
        machine.poke(NR13, 0x42);
        machine.poke(NR23, 0x24);

        quiesce(&mut machine);

        assert_eq!(machine.peek(NR13), 0x42);
        assert_eq!(machine.peek(NR23), 0x24);
    }
}
