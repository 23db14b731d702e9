//! The `World`: the agent arena, shared social state, telemetry channel,
//! and the RNG the gossip sweep and idle-action tie-break draw from.
//!
//! Grounded on `emergence-core/src/tick.rs`'s `SimulationState`, trimmed to
//! what a cognitive core (as opposed to a full physical-world simulation)
//! actually owns: agents, not locations, resources, or weather.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tavern_agent::Agent;
use tavern_social::{ConversationOutcome, ConversationStore, ReputationNetwork, SocialGraph};
use tavern_types::{AgentId, ConversationId, ConversationQuality, CoreError, TelemetryChannel};

use crate::config::SimulationConfig;

/// Owns every agent and every piece of shared social state for one running
/// simulation.
#[derive(Debug)]
pub struct World {
    agents: BTreeMap<AgentId, Agent>,
    /// Shared relationship graph.
    pub social_graph: SocialGraph,
    /// Shared conversation store.
    pub conversations: ConversationStore,
    /// Shared reputation network.
    pub reputation: ReputationNetwork,
    /// Non-propagating in-cycle telemetry (§A.7).
    pub telemetry: TelemetryChannel,
    /// Deterministic RNG, seeded at construction.
    pub rng: StdRng,
    /// Configuration this world was built with.
    pub config: SimulationConfig,
    /// Number of ticks run so far.
    pub tick: u64,
}

impl World {
    /// Construct an empty world with the given config and RNG seed.
    #[must_use]
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self {
            agents: BTreeMap::new(),
            social_graph: SocialGraph::new(),
            conversations: ConversationStore::new(),
            reputation: ReputationNetwork::new(),
            telemetry: TelemetryChannel::new(),
            rng: StdRng::seed_from_u64(seed),
            config,
            tick: 0,
        }
    }

    /// Add an agent to the arena.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateName`] if another agent already holds
    /// that display name.
    pub fn add_agent(&mut self, agent: Agent) -> Result<AgentId, CoreError> {
        if self.agents.values().any(|existing| existing.name == agent.name) {
            return Err(CoreError::DuplicateName(agent.name));
        }
        let id = agent.agent_id;
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Read-only access to an agent.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Mutable access to an agent.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Mutable access to an agent alongside the (disjoint) telemetry
    /// channel, for callers that need both at once without the borrow
    /// checker seeing a conflict through `&mut self` (the tick loop).
    pub(crate) fn agent_and_telemetry_mut(&mut self, id: AgentId) -> (Option<&mut Agent>, &TelemetryChannel) {
        (self.agents.get_mut(&id), &self.telemetry)
    }

    /// Every agent id currently in the arena, in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    /// Number of agents in the arena.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Cancel an agent's goal from outside the tick loop (§A.5): transitions
    /// it to ABANDONED, clears the active plan if it was the active goal,
    /// and leaves history intact.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAgent`] if `agent_id` is not in the
    /// arena, or [`CoreError::UnknownGoal`] if the agent has no such goal.
    pub fn abandon_goal(&mut self, agent_id: AgentId, goal_id: tavern_types::GoalId, now: f64) -> Result<(), CoreError> {
        let agent = self.agent_mut(agent_id).ok_or(CoreError::UnknownAgent(agent_id))?;
        if agent.goals.abandon(goal_id, now) {
            Ok(())
        } else {
            Err(CoreError::UnknownGoal { agent: agent_id, goal: goal_id })
        }
    }

    /// End a conversation and apply its outcome to the social graph and, for
    /// deep conversations, every pair's theory-of-mind confidence (§A.4.8).
    /// Returns the outcome applied, or `None` if `id` names no conversation.
    pub fn end_conversation(&mut self, id: ConversationId, now: f64) -> Option<ConversationOutcome> {
        let outcome = self.conversations.end(id, now)?;
        self.apply_conversation_outcome(&outcome, now);
        Some(outcome)
    }

    /// Apply a conversation's relationship deltas and ToM confidence bumps
    /// to every pair of participants. Grounded on
    /// `social_dynamics.py:258,277-278`'s per-pair relationship update.
    fn apply_conversation_outcome(&mut self, outcome: &ConversationOutcome, now: f64) {
        let participants = &outcome.participants;
        for (index_a, &a) in participants.iter().enumerate() {
            for (index_b, &b) in participants.iter().enumerate() {
                if index_b <= index_a {
                    continue;
                }

                let (affinity_delta, trust_delta) = match outcome.quality {
                    ConversationQuality::Positive => (0.1 * outcome.depth, 0.05 * outcome.depth),
                    ConversationQuality::Negative => (-0.1 * outcome.depth, -0.05 * outcome.depth),
                    ConversationQuality::Neutral => (0.0, 0.0),
                };
                let relationship = self.social_graph.get_or_create_mut(a, b);
                relationship.apply_interaction("conversation", now, affinity_delta, trust_delta, 0.0);
                if outcome.shared_secret {
                    relationship.record_shared_secret(format!("secret shared at game time {now:.2}"));
                }

                if outcome.depth > 0.7 {
                    if let Some(agent_b) = self.agent_mut(b) {
                        agent_b.beliefs.get_theory_of_mind(a).bump_confidence(0.1);
                    }
                    if let Some(agent_a) = self.agent_mut(a) {
                        agent_a.beliefs.get_theory_of_mind(b).bump_confidence(0.1);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavern_agent::Personality;

    fn plain_personality() -> Personality {
        Personality::new(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new())
    }

    #[test]
    fn duplicate_agent_name_is_rejected() {
        let mut world = World::new(SimulationConfig::default(), 1);
        world.add_agent(Agent::new("Gene", "tavern", plain_personality())).expect("first insert succeeds");
        let err = world.add_agent(Agent::new("Gene", "tavern", plain_personality())).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(name) if name == "Gene"));
    }

    #[test]
    fn abandon_goal_rejects_unknown_agent() {
        let mut world = World::new(SimulationConfig::default(), 1);
        let err = world.abandon_goal(AgentId::new(), tavern_types::GoalId::new(), 0.0).unwrap_err();
        assert!(matches!(err, CoreError::UnknownAgent(_)));
    }

    #[test]
    fn s3_conversation_deepens_friendship_and_theory_of_mind() {
        let mut world = World::new(SimulationConfig::default(), 1);
        let a = world.add_agent(Agent::new("Alice", "tavern", plain_personality())).expect("insert succeeds");
        let b = world.add_agent(Agent::new("Bob", "tavern", plain_personality())).expect("insert succeeds");

        {
            let relationship = world.social_graph.get_or_create_mut(a, b);
            relationship.affinity = 0.55;
            relationship.trust = 0.4;
            relationship.respect = 0.3;
            relationship.familiarity = 0.6;
        }

        let id = world.conversations.start(vec![a, b], "feelings", 0.0);
        // 8 turns: the scenario's own floor is depth >= 0.6 (6 turns), but
        // the ToM bump only fires past depth > 0.7 (§A.4.8); two extra turns
        // clear that bar without changing any of the scenario's other
        // lower-bound expectations.
        for _ in 0..8 {
            world.conversations.get_mut(id).expect("exists").exchange(a, "I feel hope about this", "warm", 0.0);
        }
        let outcome = world.end_conversation(id, 1.0).expect("conversation existed");

        assert_eq!(outcome.quality, ConversationQuality::Positive);
        assert!(outcome.depth >= 0.6);

        let relationship = world.social_graph.get(a, b).expect("relationship exists");
        assert!(relationship.affinity >= 0.55 + 0.1 * 0.6 - 1e-9);
        assert_eq!(relationship.relationship_type, tavern_types::RelationshipType::Friend);

        let tom_of_b = world.agent(a).expect("agent exists").beliefs.theory_of_mind(b).expect("tom exists");
        assert!((tom_of_b.model_confidence - 0.4).abs() < 1e-9);
        let tom_of_a = world.agent(b).expect("agent exists").beliefs.theory_of_mind(a).expect("tom exists");
        assert!((tom_of_a.model_confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = World::new(SimulationConfig::default(), 42);
        let mut b = World::new(SimulationConfig::default(), 42);
        let draws_a: Vec<f64> = (0..5).map(|_| rand::Rng::random(&mut a.rng)).collect();
        let draws_b: Vec<f64> = (0..5).map(|_| rand::Rng::random(&mut b.rng)).collect();
        assert_eq!(draws_a, draws_b);
    }
}
