//! Host-facing fallible operations.
//!
//! These errors are distinct from the in-cycle [`crate::TelemetryKind`]
//! taxonomy of §A.7: they cover operations a *host* calls directly (world
//! construction, configuration loading, explicit goal cancellation) where a
//! `Result` is the right shape because the caller is outside the tick loop
//! and can reasonably handle failure.

use thiserror::Error;

use crate::ids::{AgentId, GoalId};

/// Errors a host can observe from calls into the cognitive core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The named agent does not exist in the world's arena.
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),

    /// The named goal does not exist for the given agent.
    #[error("unknown goal {goal} for agent {agent}")]
    UnknownGoal {
        /// The agent the goal was looked up on.
        agent: AgentId,
        /// The goal id that was not found.
        goal: GoalId,
    },

    /// Two agents in the same world were given the same display name.
    #[error("duplicate agent name: {0}")]
    DuplicateName(String),
}
