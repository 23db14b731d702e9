//! The three value types that cross the cognitive core's boundary: a
//! [`WorldSnapshot`] comes in once per tick, an [`Action`] goes out, and an
//! [`ActionOutcome`] comes back in asynchronously once the world has
//! resolved a previously emitted action.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, AgentId};

/// Per-tick, per-agent view of the world, as defined by the host.
///
/// The core never mutates this; it is read once during the perception step
/// of the kernel cycle (§A.4.1 step 2) and then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// The agent's current location.
    pub location: String,
    /// Other agents visible at the agent's location.
    pub agents_present: Vec<AgentId>,
    /// Free-text descriptions of events the agent can perceive this tick.
    pub recent_events: Vec<String>,
    /// Optional availability of named items at the agent's location.
    pub item_availability: BTreeMap<String, bool>,
    /// Absolute game time, in hours, at the moment of this snapshot.
    pub time_hours: f64,
    /// Elapsed game time, in hours, since the previous snapshot.
    pub dt_hours: f64,
}

/// A single primitive step, the unit both [`crate::Plan`] sequences are made
/// of and what the kernel emits from `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for this emitted action.
    pub action_id: ActionId,
    /// Opaque command string the world interprets; the core never parses it.
    pub command: String,
    /// Human-readable description of what this action does.
    pub description: String,
    /// Conditions that must hold before this action can be attempted.
    pub preconditions: Vec<String>,
    /// Effects the agent expects this action to produce.
    pub expected_effects: Vec<String>,
    /// Estimated time cost, in game hours.
    pub estimated_time_hours: f64,
    /// Named resource costs (amount per resource name).
    pub resource_cost: BTreeMap<String, f64>,
    /// Subjective risk of this action, in [0, 1].
    pub risk: f64,
}

impl Action {
    /// Construct a zero-cost, zero-risk action with only a command and
    /// description set, covering the common case of idle/status actions.
    #[must_use]
    pub fn simple(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action_id: ActionId::new(),
            command: command.into(),
            description: description.into(),
            preconditions: Vec::new(),
            expected_effects: Vec::new(),
            estimated_time_hours: 0.0,
            resource_cost: BTreeMap::new(),
            risk: 0.0,
        }
    }
}

/// A fact the world reports the agent learned while resolving an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedFact {
    /// The semantic-memory topic this fact updates.
    pub topic: String,
    /// The fact's content.
    pub content: String,
    /// Confidence in this fact, in [0, 1].
    pub confidence: f64,
}

/// The resolution of a previously emitted [`Action`], delivered
/// asynchronously (possibly several ticks later).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// The action this outcome resolves.
    pub action_id: ActionId,
    /// Whether the action succeeded.
    pub success: bool,
    /// Human-readable description of what happened.
    pub description: String,
    /// Facts learned as a side effect, if any.
    pub learned: Vec<LearnedFact>,
}
