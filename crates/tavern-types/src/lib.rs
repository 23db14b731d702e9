//! Shared type definitions for the tavern cognitive simulation.
//!
//! This crate is the single source of truth for the types that cross
//! crate boundaries: entity identifiers, the tagged-variant kind enums the
//! kernel dispatches over, the boundary types that carry a tick's
//! perception in and an agent's requested action out, the non-propagating
//! telemetry channel of §A.7, and the host-facing error type.
//!
//! # Modules
//!
//! - [`ids`] -- type-safe UUIDv7 wrappers for every entity identifier
//! - [`enums`] -- tagged-variant kinds (needs, emotions, beliefs, goals, ...)
//! - [`boundary`] -- [`WorldSnapshot`], [`Action`], [`ActionOutcome`]
//! - [`telemetry`] -- the in-cycle, non-propagating diagnostic channel
//! - [`error`] -- [`CoreError`], for host-facing fallible operations

pub mod boundary;
pub mod enums;
pub mod error;
pub mod ids;
pub mod telemetry;

pub use boundary::{Action, ActionOutcome, LearnedFact, WorldSnapshot};
pub use enums::{
    BeliefKind, ConversationQuality, EmotionKind, GoalKind, GoalStatus, NeedKind, PerceptionKind,
    RelationshipType, ReputationAspect,
};
pub use error::CoreError;
pub use ids::{ActionId, AgentId, ConversationId, GoalId, PlanId};
pub use telemetry::{TelemetryChannel, TelemetryEvent, TelemetryKind};
