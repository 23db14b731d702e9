//! The tick loop: outcome integration, the per-agent cognitive cycle, and
//! the cross-agent social/gossip phases that must run after every agent has
//! stepped (§A.5's ordering guarantees).
//!
//! Grounded on `emergence-core/src/tick.rs`'s `run_tick` shape: a summary
//! struct returned by value, `tracing` spans at phase boundaries, agents
//! visited in a fixed deterministic order.

use std::collections::BTreeMap;

use tavern_agent::{integrate_outcome, step};
use tavern_social::GossipEvent;
use tavern_types::{Action, ActionOutcome, AgentId, WorldSnapshot};
use tracing::debug;

use crate::config::AgentOrder;
use crate::world::World;

/// Summary of one tick's execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The action each agent emitted this tick, if any.
    pub actions: BTreeMap<AgentId, Action>,
    /// Gossip produced by this tick's propagation sweep.
    pub gossip_events: Vec<GossipEvent>,
}

/// Run one tick: integrate any pending outcomes from the previous tick,
/// step every agent's cognitive cycle in order, then run the cross-agent
/// social phases.
///
/// `snapshots` must contain an entry for every agent the host wants stepped
/// this tick; agents without a snapshot are skipped. `pending_outcomes`
/// carries the result of actions emitted in the previous tick, applied
/// before this tick's step 1 per §A.5.
pub fn run_tick(
    world: &mut World,
    snapshots: &BTreeMap<AgentId, WorldSnapshot>,
    pending_outcomes: &BTreeMap<AgentId, ActionOutcome>,
) -> TickSummary {
    world.tick += 1;
    let tick = world.tick;
    debug!(tick, agents = snapshots.len(), "tick started");

    let order = agent_order(world, snapshots);

    for &agent_id in &order {
        if let Some(outcome) = pending_outcomes.get(&agent_id) {
            if let Some(agent) = world.agent_mut(agent_id) {
                integrate_outcome(agent, outcome);
            }
        }
    }

    let mut actions = BTreeMap::new();
    for &agent_id in &order {
        let Some(snapshot) = snapshots.get(&agent_id) else { continue };
        let (agent, telemetry) = world.agent_and_telemetry_mut(agent_id);
        let Some(agent) = agent else { continue };
        if let Some(action) = step(agent, snapshot, telemetry) {
            actions.insert(agent_id, action);
        }
    }

    let now = snapshots.values().map(|snapshot| snapshot.time_hours).fold(0.0, f64::max);
    let gossip_events = if world.config.social.gossip_sweep_enabled {
        run_gossip_sweep(world, now)
    } else {
        Vec::new()
    };

    debug!(tick, actions = actions.len(), gossip = gossip_events.len(), "tick finished");

    TickSummary { tick, actions, gossip_events }
}

fn agent_order(world: &World, snapshots: &BTreeMap<AgentId, WorldSnapshot>) -> Vec<AgentId> {
    match world.config.tick.agent_order {
        AgentOrder::AscendingAgentId => snapshots.keys().copied().collect(),
        AgentOrder::RoundRobin => {
            let mut ids: Vec<AgentId> = world.agent_ids().filter(|id| snapshots.contains_key(id)).collect();
            let start = usize::try_from(world.tick).unwrap_or(0) % ids.len().max(1);
            ids.rotate_left(start.min(ids.len().saturating_sub(1)));
            ids
        }
    }
}

/// Runs after every agent's `step` for this tick (§A.5): rolls the gossip
/// propagation sweep, applies each resulting event to the reputation
/// network, and logs it against the source/listener relationship (§C.5).
fn run_gossip_sweep(world: &mut World, now: f64) -> Vec<GossipEvent> {
    const GOSSIP_FREQUENCY: f64 = 0.3;
    let events = world.reputation.gossip_propagation_sweep(&world.social_graph, GOSSIP_FREQUENCY, now, &mut world.rng);
    for event in &events {
        world.reputation.receive_gossip(event.listener, event.subject, event.aspect, event.gossip_score, event.source_credibility, now);
        let sharer = event.source.to_string();
        let summary = format!("{:?} of {}: {:.2}", event.aspect, event.subject, event.gossip_score);
        world.social_graph.get_or_create_mut(event.source, event.listener).record_gossip_shared(&sharer, summary);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use tavern_agent::{Agent, Personality};

    fn plain_personality() -> Personality {
        Personality::new(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new())
    }

    fn snapshot(agents_present: Vec<AgentId>) -> WorldSnapshot {
        WorldSnapshot {
            location: "tavern".to_string(),
            agents_present,
            recent_events: Vec::new(),
            item_availability: BTreeMap::new(),
            time_hours: 1.0,
            dt_hours: 1.0,
        }
    }

    #[test]
    fn tick_steps_every_snapshotted_agent_and_increments_counter() {
        let mut world = World::new(SimulationConfig::default(), 7);
        let agent = Agent::new("Gene", "tavern", plain_personality());
        let id = world.add_agent(agent).expect("insert succeeds");

        let mut snapshots = BTreeMap::new();
        snapshots.insert(id, snapshot(Vec::new()));

        let summary = run_tick(&mut world, &snapshots, &BTreeMap::new());
        assert_eq!(summary.tick, 1);
        assert_eq!(world.tick, 1);
        assert!(summary.actions.contains_key(&id));
    }

    #[test]
    fn agent_without_a_snapshot_is_skipped() {
        let mut world = World::new(SimulationConfig::default(), 7);
        let agent = Agent::new("Gene", "tavern", plain_personality());
        world.add_agent(agent).expect("insert succeeds");

        let summary = run_tick(&mut world, &BTreeMap::new(), &BTreeMap::new());
        assert!(summary.actions.is_empty());
    }

    #[test]
    fn disabling_gossip_sweep_emits_no_events() {
        let mut config = SimulationConfig::default();
        config.social.gossip_sweep_enabled = false;
        let mut world = World::new(config, 7);
        let summary = run_tick(&mut world, &BTreeMap::new(), &BTreeMap::new());
        assert!(summary.gossip_events.is_empty());
    }
}
