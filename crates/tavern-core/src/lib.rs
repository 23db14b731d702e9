//! The world: agent arena, tick loop, configuration, and telemetry for the
//! tavern cognitive-core simulation.
//!
//! # Modules
//!
//! - [`config`] -- [`config::SimulationConfig`] loading from YAML into
//!   strongly-typed, defaulted sections.
//! - [`world`] -- [`world::World`], the agent arena and shared social state.
//! - [`tick`] -- [`tick::run_tick`], the per-tick cognitive cycle and the
//!   cross-agent social/gossip phases that follow it.

#![forbid(unsafe_code)]

pub mod config;
pub mod tick;
pub mod world;

pub use config::{AgentOrder, ConfigError, NeedsConfig, PersonalityConfig, SimulationConfig, SocialConfig, TickConfig};
pub use tick::{run_tick, TickSummary};
pub use world::World;
