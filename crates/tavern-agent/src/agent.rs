//! The `Agent` aggregate: every subsystem bundled behind one identity, plus
//! the small set of host-facing accessors that do not belong to any single
//! subsystem.

use serde::{Deserialize, Serialize};

use tavern_types::AgentId;

use crate::beliefs::BeliefSystem;
use crate::emotions::EmotionalState;
use crate::goals::GoalHierarchy;
use crate::memory::{EpisodicMemory, MemoryConfig, SemanticMemory};
use crate::needs::{create_standard_drives, Drive, Needs};
use crate::personality::Personality;

/// One simulated agent: identity, personality, and every piece of mutable
/// cognitive state the kernel cycle reads and writes each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier.
    pub agent_id: AgentId,
    /// Display name.
    pub name: String,
    /// Current location, as reported by the most recent [`tavern_types::WorldSnapshot`].
    pub location: String,
    /// Free-text description of what the agent is currently doing, for host
    /// display purposes only -- the kernel never reads it back.
    pub activity: String,
    /// Absolute game time, in hours, this agent's state was last integrated to.
    pub game_time: f64,
    /// Fixed (per §A.3) trait scalars and values.
    pub personality: Personality,
    /// Homeostatic needs.
    pub needs: Needs,
    /// Coarse motivations aggregating need urgency.
    pub drives: Vec<Drive>,
    /// Active emotions and the mood they aggregate into.
    pub emotional_state: EmotionalState,
    /// Beliefs about the world and theory-of-mind models of other agents.
    pub beliefs: BeliefSystem,
    /// Recalled experiences.
    pub episodic: EpisodicMemory,
    /// Topic-keyed facts.
    pub semantic: SemanticMemory,
    /// Goals and the single active plan.
    pub goals: GoalHierarchy,
}

impl Agent {
    /// Construct a fresh agent: full needs, neutral mood, the six standard
    /// drives, and empty belief/memory/goal stores.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>, personality: Personality) -> Self {
        Self {
            agent_id: AgentId::new(),
            name: name.into(),
            location: location.into(),
            activity: "idle".to_string(),
            game_time: 0.0,
            personality,
            needs: Needs::new(),
            drives: create_standard_drives(),
            emotional_state: EmotionalState::new(),
            beliefs: BeliefSystem::new(),
            episodic: EpisodicMemory::new(MemoryConfig::default()),
            semantic: SemanticMemory::new(),
            goals: GoalHierarchy::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_agent_starts_fully_satisfied_and_idle() {
        let agent = Agent::new("Alice", "main_hall", Personality::archetype("merchant"));
        assert_eq!(agent.needs.get_overall_wellbeing(), 1.0);
        assert!(agent.goals.active_goal().is_none());
        assert_eq!(agent.drives.len(), 6);
    }
}
