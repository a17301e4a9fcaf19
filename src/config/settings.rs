//! Configuration settings for the SAT solver layer

use crate::error::{Result as SolverResult, SolverError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Solver configuration applied to an engine before any clause is loaded
///
/// All integer fields accept any non-negative value. A propagation limit of
/// 0 means "unbounded" and is never forwarded to an engine as a literal
/// limit of zero (which would mean "stop immediately").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Seed for the engine's random number generator
    pub seed: u64,
    /// Engine verbosity level (0 = silent)
    pub verbosity: u32,
    /// Bound on search effort; 0 means no limit
    pub propagation_limit: u64,
    /// Policy for each variable's initial trial truth value
    pub phase_init: PhaseInit,
}

/// The initial-phase heuristic used before search begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseInit {
    #[serde(rename = "false")]
    False,
    #[serde(rename = "true")]
    True,
    #[serde(rename = "Jeroslow-Wang")]
    JeroslowWang,
    #[serde(rename = "random")]
    Random,
}

impl PhaseInit {
    /// Parse one of the four recognized phase names (case-sensitive)
    pub fn from_name(name: &str) -> SolverResult<Self> {
        match name {
            "false" => Ok(PhaseInit::False),
            "true" => Ok(PhaseInit::True),
            "Jeroslow-Wang" => Ok(PhaseInit::JeroslowWang),
            "random" => Ok(PhaseInit::Random),
            other => Err(SolverError::InvalidConfiguration(other.to_string())),
        }
    }

    /// The canonical name of this heuristic
    pub fn name(&self) -> &'static str {
        match self {
            PhaseInit::False => "false",
            PhaseInit::True => "true",
            PhaseInit::JeroslowWang => "Jeroslow-Wang",
            PhaseInit::Random => "random",
        }
    }
}

impl std::fmt::Display for PhaseInit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            verbosity: 0,
            propagation_limit: 0,
            phase_init: PhaseInit::JeroslowWang,
        }
    }
}

impl SolverConfig {
    /// Build a configuration from raw caller-supplied fields
    ///
    /// The phase name is validated here, before any engine is allocated, so
    /// a malformed configuration never leaves a partially constructed engine
    /// behind.
    pub fn from_raw(
        seed: u64,
        verbosity: u32,
        propagation_limit: u64,
        phase_name: &str,
    ) -> SolverResult<Self> {
        Ok(Self {
            seed,
            verbosity,
            propagation_limit,
            phase_init: PhaseInit::from_name(phase_name)?,
        })
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SolverConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save a configuration to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
