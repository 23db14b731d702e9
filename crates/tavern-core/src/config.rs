//! Configuration loading and typed config structures for the tavern
//! simulation.
//!
//! Grounded on `emergence-core/src/config.rs`'s loader shape: a
//! `#[serde(default)]`-annotated nested struct per concern, a `ConfigError`
//! enum distinguishing I/O from parse failures, and `from_file`/`parse`
//! entry points. The teacher's economy/population/infrastructure sections
//! have no counterpart here; the sections below are §A.6's enumerated
//! configuration options instead.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tavern_types::NeedKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Top-level simulation configuration.
///
/// All fields have sensible defaults matching §A.6's enumerated options, so
/// an empty YAML document (`{}`) parses to [`SimulationConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Episodic memory capacity and decay.
    #[serde(default)]
    pub memory: tavern_agent::MemoryConfig,

    /// Per-need decay rate overrides.
    #[serde(default)]
    pub needs: NeedsConfig,

    /// Social graph and gossip tuning.
    #[serde(default)]
    pub social: SocialConfig,

    /// Personality drift tuning.
    #[serde(default)]
    pub personality: PersonalityConfig,

    /// Tick-loop ordering.
    #[serde(default)]
    pub tick: TickConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

/// Per-need decay rate overrides (§A.6 `needs.decay_rates`).
///
/// Kinds absent from `decay_rates` keep the default rate
/// [`tavern_agent::default_decay_rate`] assigns their kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeedsConfig {
    /// Overrides, keyed by need kind.
    #[serde(default)]
    pub decay_rates: BTreeMap<NeedKind, f64>,
}

/// Social graph and gossip-sweep tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialConfig {
    /// Whether the gossip-propagation sweep runs each tick.
    #[serde(default = "default_gossip_sweep_enabled")]
    pub gossip_sweep_enabled: bool,

    /// Per-interaction familiarity gain rate.
    #[serde(default = "default_familiarity_gain_rate")]
    pub familiarity_gain_rate: f64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            gossip_sweep_enabled: default_gossip_sweep_enabled(),
            familiarity_gain_rate: default_familiarity_gain_rate(),
        }
    }
}

const fn default_gossip_sweep_enabled() -> bool {
    true
}

const fn default_familiarity_gain_rate() -> f64 {
    0.05
}

/// Personality drift tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityConfig {
    /// Whether trait drift is enabled. Off by default: §A.2 defines
    /// personality as stable over a simulation's lifetime unless a host
    /// opts in.
    #[serde(default = "default_drift_enabled")]
    pub drift_enabled: bool,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            drift_enabled: default_drift_enabled(),
        }
    }
}

const fn default_drift_enabled() -> bool {
    false
}

/// Ordering the tick loop visits agents in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentOrder {
    /// Ascending `agent_id` order, the deterministic default.
    AscendingAgentId,
    /// Round-robin starting from the agent after the one last stepped.
    RoundRobin,
}

impl Default for AgentOrder {
    fn default() -> Self {
        Self::AscendingAgentId
    }
}

/// Tick-loop ordering configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Which order agents are stepped in.
    #[serde(default)]
    pub agent_order: AgentOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_defaults() {
        let config = SimulationConfig::parse("{}").expect("empty doc parses");
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.memory.capacity, 1000);
        assert!((config.memory.half_life_hours - 24.0).abs() < f64::EPSILON);
        assert!(config.social.gossip_sweep_enabled);
        assert!((config.social.familiarity_gain_rate - 0.05).abs() < f64::EPSILON);
        assert!(!config.personality.drift_enabled);
        assert_eq!(config.tick.agent_order, AgentOrder::AscendingAgentId);
    }

    #[test]
    fn needs_decay_override_parses() {
        let yaml = "needs:\n  decay_rates:\n    hunger: 0.1\n";
        let config = SimulationConfig::parse(yaml).expect("parses");
        assert_eq!(config.needs.decay_rates.get(&NeedKind::Hunger), Some(&0.1));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = SimulationConfig::parse("memory: [this is not a mapping").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimulationConfig::from_file(Path::new("/nonexistent/tavern-config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn round_robin_order_parses() {
        let yaml = "tick:\n  agent_order: round_robin\n";
        let config = SimulationConfig::parse(yaml).expect("parses");
        assert_eq!(config.tick.agent_order, AgentOrder::RoundRobin);
    }
}
