//! Sound effect catalog
//!
//! The reference table lists every effect id known to the sound driver with a
//! rough playback length. Lengths only size the capture window; the driver's
//! finished flag usually ends a capture earlier.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{ExtractError, Result};

/// Name prefix of catalog slots the game never plays
pub const UNUSED_PREFIX: &str = "unused";

/// One sound effect known to the ROM's sound driver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectDescriptor {
    /// Value written to the trigger cell
    pub id: u8,
    /// Output file stem
    pub name: String,
    /// Expected playback length in ticks
    #[serde(rename = "frames", alias = "estimated_duration_frames")]
    pub estimated_duration_frames: u32,
}

impl EffectDescriptor {
    pub fn new(id: u8, name: impl Into<String>, estimated_duration_frames: u32) -> Self {
        Self {
            id,
            name: name.into(),
            estimated_duration_frames,
        }
    }

    /// Slot the game never plays
    pub fn is_unused(&self) -> bool {
        self.name.starts_with(UNUSED_PREFIX)
    }
}

/// `(id, name, estimated ticks)` for every effect in the reference ROM
const REFERENCE_EFFECTS: &[(u8, &str, u32)] = &[
    (0x01, "cursor", 15),
    (0x02, "confirm", 20),
    (0x03, "cancel", 20),
    (0x04, "denied", 30),
    (0x05, "unused_05", 30),
    (0x06, "unused_06", 30),
    (0x07, "card_shuffle", 60),
    (0x08, "place_prize", 45),
    (0x09, "unused_09", 30),
    (0x0A, "unused_0a", 30),
    (0x0B, "coin_toss", 45),
    (0x0C, "warp", 60),
    (0x0D, "unused_0d", 30),
    (0x0E, "unused_0e", 30),
    (0x0F, "pokemon_dome_doors", 90),
    (0x10, "legendary_cards", 120),
    (0x11, "glow", 60),
    (0x12, "paralysis", 45),
    (0x13, "sleep", 60),
    (0x14, "confusion", 60),
    (0x15, "poison", 45),
    (0x16, "single_hit", 30),
    (0x17, "big_hit", 45),
    (0x18, "thunder_shock", 45),
    (0x19, "lightning", 60),
    (0x1A, "border_spark", 45),
    (0x1B, "big_lightning", 90),
    (0x1C, "small_flame", 45),
    (0x1D, "big_flame", 60),
    (0x1E, "fire_spin", 90),
    (0x1F, "dive_bomb", 60),
    (0x20, "water_jets", 60),
    (0x21, "water_gun", 45),
    (0x22, "whirlpool", 90),
    (0x23, "hydro_pump", 90),
    (0x24, "blizzard", 90),
    (0x25, "psychic", 60),
    (0x26, "leer", 45),
    (0x27, "beam", 60),
    (0x28, "hyper_beam", 120),
    (0x29, "rock_throw", 45),
    (0x2A, "stone_barrage", 60),
    (0x2B, "punch", 30),
    (0x2C, "stretch_kick", 45),
    (0x2D, "slash", 30),
    (0x2E, "sonicboom", 60),
    (0x2F, "fury_swipes", 60),
    (0x30, "drill", 90),
    (0x31, "pot_smash", 45),
    (0x32, "bonemerang", 60),
    (0x33, "seismic_toss", 90),
    (0x34, "needles", 45),
    (0x35, "white_gas", 60),
    (0x36, "powder", 45),
    (0x37, "goo", 60),
    (0x38, "bubbles", 60),
    (0x39, "string_shot", 60),
    (0x3A, "boyfriends", 60),
    (0x3B, "lure", 45),
    (0x3C, "toxic", 60),
    (0x3D, "confuse_ray", 60),
    (0x3E, "sing", 90),
    (0x3F, "supersonic", 60),
    (0x40, "petal_dance", 90),
    (0x41, "protect", 60),
    (0x42, "barrier", 60),
    (0x43, "speed", 45),
    (0x44, "whirlwind", 60),
    (0x45, "cry", 45),
    (0x46, "question_mark", 30),
    (0x47, "selfdestruct", 90),
    (0x48, "big_selfdestruct", 120),
    (0x49, "heal", 60),
    (0x4A, "drain", 60),
    (0x4B, "dark_gas", 60),
    (0x4C, "healing_wind", 90),
    (0x4D, "bench_whirlwind", 60),
    (0x4E, "expand", 60),
    (0x4F, "cat_punch", 45),
    (0x50, "thunder_wave", 60),
    (0x51, "firegiver", 120),
    (0x52, "thunderpunch", 60),
    (0x53, "fire_punch", 60),
    (0x54, "coin_toss_heads", 30),
    (0x55, "coin_toss_tails", 30),
    (0x56, "save_game", 60),
    (0x57, "player_walk_map", 30),
    (0x58, "intro_orb", 90),
    (0x59, "intro_orb_swoop", 60),
    (0x5A, "intro_orb_title", 90),
    (0x5B, "intro_orb_scatter", 60),
    (0x5C, "firegiver_start", 60),
    (0x5D, "receive_card_pop", 120),
    (0x5E, "pokemon_evolution", 120),
    (0x5F, "unused_5f", 30),
];

/// The built-in catalog, in trigger-id order.
pub fn reference_catalog() -> Vec<EffectDescriptor> {
    REFERENCE_EFFECTS
        .iter()
        .map(|&(id, name, frames)| EffectDescriptor::new(id, name, frames))
        .collect()
}

/// Check that ids and names are unique and names are usable as file stems.
pub fn validate_catalog(effects: &[EffectDescriptor]) -> Result<()> {
    if effects.is_empty() {
        return Err(ExtractError::Config("effect catalog is empty".into()));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for effect in effects {
        if effect.name.is_empty() {
            return Err(ExtractError::Config(format!(
                "effect {:#04x} has an empty name",
                effect.id
            )));
        }
        if effect.name.contains(['/', '\\']) || effect.name.starts_with('.') {
            return Err(ExtractError::Config(format!(
                "effect name {:?} is not a valid file stem",
                effect.name
            )));
        }
        if !ids.insert(effect.id) {
            return Err(ExtractError::Config(format!(
                "duplicate effect id {:#04x}",
                effect.id
            )));
        }
        if !names.insert(effect.name.as_str()) {
            return Err(ExtractError::Config(format!(
                "duplicate effect name {:?}",
                effect.name
            )));
        }
    }

    Ok(())
}
