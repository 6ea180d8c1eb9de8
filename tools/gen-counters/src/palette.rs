//! Counter kinds and their colors

use image::Rgba;

use crate::error::CounterError;

/// Parse `#RRGGBB` (leading `#` optional) into an opaque color.
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, CounterError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CounterError::InvalidColor(hex.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| CounterError::InvalidColor(hex.to_string()))
    };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

/// Solid fill colors of a coin: outer ring and inner face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub outer: Rgba<u8>,
    /// Slightly darker, for depth
    pub inner: Rgba<u8>,
}

impl Palette {
    pub fn from_hex(outer: &str, inner: &str) -> Result<Self, CounterError> {
        Ok(Self {
            outer: parse_hex_color(outer)?,
            inner: parse_hex_color(inner)?,
        })
    }
}

/// Status icons drawn on status counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Flame,
    Flask,
}

/// Every counter the card game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Burn,
    Poison,
    Damage10,
    Damage50,
    Damage100,
}

impl CounterKind {
    pub const ALL: [CounterKind; 5] = [
        CounterKind::Damage10,
        CounterKind::Damage50,
        CounterKind::Damage100,
        CounterKind::Burn,
        CounterKind::Poison,
    ];

    /// `(outer, inner)` hex colors
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            CounterKind::Burn => ("#E53935", "#C62828"),
            CounterKind::Poison => ("#4CAF50", "#388E3C"),
            CounterKind::Damage10 => ("#FFD54F", "#FFC107"),
            CounterKind::Damage50 => ("#FF9800", "#F57C00"),
            CounterKind::Damage100 => ("#F44336", "#C62828"),
        }
    }

    pub fn palette(self) -> Result<Palette, CounterError> {
        let (outer, inner) = self.colors();
        Palette::from_hex(outer, inner)
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CounterKind::Burn => "burn.png",
            CounterKind::Poison => "poison.png",
            CounterKind::Damage10 => "damage-10.png",
            CounterKind::Damage50 => "damage-50.png",
            CounterKind::Damage100 => "damage-100.png",
        }
    }

    /// Damage value printed on the face, if any
    pub fn damage(self) -> Option<u32> {
        match self {
            CounterKind::Damage10 => Some(10),
            CounterKind::Damage50 => Some(50),
            CounterKind::Damage100 => Some(100),
            CounterKind::Burn | CounterKind::Poison => None,
        }
    }

    pub fn icon(self) -> Option<StatusIcon> {
        match self {
            CounterKind::Burn => Some(StatusIcon::Flame),
            CounterKind::Poison => Some(StatusIcon::Flask),
            _ => None,
        }
    }
}
