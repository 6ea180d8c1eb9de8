//! Extraction configuration (`sfx-extract.toml`)
//!
//! Every field is optional; an empty file is the built-in configuration.
//!
//! ```toml
//! [timing]
//! warmup_ticks = 700
//!
//! [trim]
//! threshold = 2
//!
//! [encoder]
//! quality = 2
//!
//! [[effects]]
//! id = 2
//! name = "confirm"
//! frames = 20
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{EffectDescriptor, reference_catalog, validate_catalog};
use crate::encode::EncoderConfig;
use crate::error::{ExtractError, Result};
use crate::trim::TrimSettings;

/// Tick counts tuned against the reference ROM build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Unconditional ticks after power-on, enough to reach the title screen
    /// where the sound driver is initialized
    pub warmup_ticks: u32,
    /// Ticks after the initial quiesce
    pub settle_ticks: u32,
    /// Ticks after clearing the previous effect, before the trigger
    pub clear_ticks: u32,
    /// Added to each effect's estimated length to size the capture window
    pub record_margin_ticks: u32,
    /// The finished flag is only polled after this many capture ticks
    pub early_exit_after: u32,
    /// Ticks still captured once the effect reports finished
    pub tail_ticks: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            warmup_ticks: 700,
            settle_ticks: 60,
            clear_ticks: 15,
            record_margin_ticks: 30,
            early_exit_after: 10,
            tail_ticks: 15,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub timing: Timing,
    pub trim: TrimSettings,
    pub encoder: EncoderConfig,
    /// Replaces the reference catalog when present
    pub effects: Option<Vec<EffectDescriptor>>,
}

impl ExtractConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtractError::InputNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Effect catalog to extract, validated.
    pub fn catalog(&self) -> Result<Vec<EffectDescriptor>> {
        let catalog = match &self.effects {
            Some(effects) => effects.clone(),
            None => reference_catalog(),
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = ExtractConfig::parse("").unwrap();
        assert_eq!(config, ExtractConfig::default());
        assert_eq!(config.timing.warmup_ticks, 700);
        assert_eq!(config.trim.min_frames, 1000);
        assert_eq!(config.encoder.extension, "mp3");
        assert_eq!(config.catalog().unwrap().len(), 95);
    }

    #[test]
    fn test_partial_override() {
        let config = ExtractConfig::parse(
            r#"
            [timing]
            warmup_ticks = 900

            [trim]
            threshold = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.warmup_ticks, 900);
        assert_eq!(config.timing.settle_ticks, 60);
        assert_eq!(config.trim.threshold, 4);
        assert_eq!(config.trim.lead_in_frames, 100);
    }

    #[test]
    fn test_custom_catalog() {
        let config = ExtractConfig::parse(
            r#"
            [[effects]]
            id = 2
            name = "confirm"
            frames = 20

            [[effects]]
            id = 0x16
            name = "single_hit"
            estimated_duration_frames = 30
            "#,
        )
        .unwrap();

        let catalog = config.catalog().unwrap();
        assert_eq!(
            catalog,
            vec![
                EffectDescriptor::new(0x02, "confirm", 20),
                EffectDescriptor::new(0x16, "single_hit", 30),
            ]
        );
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let config = ExtractConfig::parse(
            r#"
            [[effects]]
            id = 2
            name = "confirm"
            frames = 20

            [[effects]]
            id = 2
            name = "cancel"
            frames = 20
            "#,
        )
        .unwrap();
        assert!(matches!(config.catalog(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ExtractConfig::parse("[timing\nwarmup_ticks = ");
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExtractConfig::load(Path::new("/nonexistent/sfx-extract.toml"));
        assert!(matches!(result, Err(ExtractError::InputNotFound(_))));
    }
}
