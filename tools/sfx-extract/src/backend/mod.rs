//! Concrete emulation backends
//!
//! Backends are cargo features; `boytacean` is on by default. A build with
//! `--no-default-features` can still run the library against any [`Machine`]
//! implementation, but the `extract-sfx` binary has nothing to boot.

#[cfg(feature = "boytacean")]
pub mod boytacean;

use crate::error::Result;
#[cfg(not(feature = "boytacean"))]
use crate::error::ExtractError;
use crate::machine::{Machine, MachineOptions};

/// Name of the backend compiled into this build, if any
pub fn backend_name() -> Option<&'static str> {
    if cfg!(feature = "boytacean") {
        Some("boytacean")
    } else {
        None
    }
}

/// Start the compiled-in emulation backend.
#[cfg(feature = "boytacean")]
pub fn start_machine(options: &MachineOptions) -> Result<Box<dyn Machine>> {
    Ok(Box::new(boytacean::BoytaceanMachine::start(options)?))
}

/// Start the compiled-in emulation backend.
#[cfg(not(feature = "boytacean"))]
pub fn start_machine(options: &MachineOptions) -> Result<Box<dyn Machine>> {
    tracing::debug!("No backend available for {}", options.rom.display());
    Err(ExtractError::DependencyMissing(
        "emulation backend (rebuild with `--features boytacean`)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_matches_features() {
        assert_eq!(backend_name().is_some(), cfg!(feature = "boytacean"));
    }

    #[cfg(not(feature = "boytacean"))]
    #[test]
    fn test_missing_backend_reported() {
        assert_eq!(backend_name(), None);
        let result = start_machine(&MachineOptions::headless_audio("game.gb"));
        assert!(matches!(result, Err(ExtractError::DependencyMissing(_))));
    }
}
