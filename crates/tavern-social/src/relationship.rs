//! The shared relationship graph: one [`Relationship`] per unordered pair of
//! agents, plus the observation-intake rules that mutate it.
//!
//! Grounded on `emergence-agents/src/social.rs`'s per-pair relationship
//! shape, restructured into the global `SocialGraph` the snapshot-then-
//! serial-commit policy requires rather than a per-agent owned view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tavern_types::{AgentId, RelationshipType};

/// Ring-buffer capacity shared by interaction history, shared secrets, and
/// gossip-received lists (§C.5).
pub const RING_CAPACITY: usize = 20;

fn push_capped(list: &mut Vec<String>, item: String) {
    list.push(item);
    if list.len() > RING_CAPACITY {
        list.remove(0);
    }
}

/// Classify a relationship's type from its three affective scalars and
/// familiarity, in the fixed order §A.4.7 specifies.
#[must_use]
pub fn classify(affinity: f64, trust: f64, respect: f64, familiarity: f64) -> RelationshipType {
    if familiarity < 0.2 {
        RelationshipType::Stranger
    } else if affinity < -0.5 {
        RelationshipType::Enemy
    } else if affinity > 0.7 && trust > 0.6 {
        RelationshipType::Ally
    } else if affinity > 0.5 {
        RelationshipType::Friend
    } else if respect > 0.6 && affinity.abs() < 0.3 {
        RelationshipType::Rival
    } else {
        RelationshipType::Acquaintance
    }
}

/// A dyadic relationship between two agents, keyed unordered in [`SocialGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Positive/negative affect, in `[-1, 1]`.
    pub affinity: f64,
    /// Confidence the two agents place in each other, in `[-1, 1]`.
    pub trust: f64,
    /// Esteem, in `[-1, 1]`.
    pub respect: f64,
    /// How well the two agents know each other, in `[0, 1]`. Monotonic
    /// non-decreasing (§A.8 property 2).
    pub familiarity: f64,
    /// Cached classification; recomputed at every write.
    pub relationship_type: RelationshipType,
    /// Free-text log of recorded interactions, most recent last.
    pub interactions: Vec<String>,
    /// Absolute game time of the most recent interaction.
    pub last_time: f64,
    /// Secrets exchanged between these two agents (§C.5).
    pub shared_secrets: Vec<String>,
    /// Gossip this pair has exchanged, as `"{sharer}: {summary}"` entries (§C.5).
    pub gossip_shared: Vec<String>,
}

impl Default for Relationship {
    fn default() -> Self {
        Self {
            affinity: 0.0,
            trust: 0.0,
            respect: 0.0,
            familiarity: 0.0,
            relationship_type: classify(0.0, 0.0, 0.0, 0.0),
            interactions: Vec::new(),
            last_time: 0.0,
            shared_secrets: Vec::new(),
            gossip_shared: Vec::new(),
        }
    }
}

impl Relationship {
    /// A fresh, neutral relationship.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply raw deltas to affinity/trust/respect, bump familiarity with
    /// diminishing returns, reclassify, and record the interaction.
    ///
    /// **Invariant:** `familiarity` never decreases (§A.8 property 2).
    pub fn apply_interaction(&mut self, description: impl Into<String>, now: f64, affinity_delta: f64, trust_delta: f64, respect_delta: f64) {
        self.affinity = (self.affinity + affinity_delta).clamp(-1.0, 1.0);
        self.trust = (self.trust + trust_delta).clamp(-1.0, 1.0);
        self.respect = (self.respect + respect_delta).clamp(-1.0, 1.0);
        self.familiarity = (self.familiarity + 0.05 * (1.0 - self.familiarity)).clamp(0.0, 1.0);
        self.last_time = now;
        push_capped(&mut self.interactions, description.into());
        self.relationship_type = classify(self.affinity, self.trust, self.respect, self.familiarity);
    }

    /// Append a gossip entry, capped at [`RING_CAPACITY`].
    pub fn record_gossip_shared(&mut self, sharer: &str, summary: impl Into<String>) {
        push_capped(&mut self.gossip_shared, format!("{sharer}: {}", summary.into()));
    }

    /// Append a shared secret, capped at [`RING_CAPACITY`].
    pub fn record_shared_secret(&mut self, summary: impl Into<String>) {
        push_capped(&mut self.shared_secrets, summary.into());
    }
}

/// The fixed keyword -> (`affinity`, `trust`, `respect`) delta rule set of
/// §A.4.7's observation intake. `fairness_valued` governs the "steal"/"theft"
/// branch: an observer who values fairness reacts more harshly.
#[must_use]
pub fn observation_deltas(action: &str, fairness_valued: bool) -> (f64, f64, f64) {
    let lowered = action.to_lowercase();
    if lowered.contains("steal") || lowered.contains("theft") {
        let affinity = if fairness_valued { -0.15 } else { -0.05 };
        (affinity, -0.2, 0.0)
    } else if lowered.contains("help") {
        (0.1, 0.0, 0.05)
    } else if lowered.contains("share") || lowered.contains("give") {
        (0.1, 0.05, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// Unordered pair key for [`SocialGraph`].
type PairKey = (AgentId, AgentId);

fn pair_key(a: AgentId, b: AgentId) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Aggregate counts over a [`SocialGraph`] (§C.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAnalysis {
    /// Total relationships tracked.
    pub total_relationships: usize,
    /// Count of relationships per [`RelationshipType`], keyed by its debug name.
    pub by_type: BTreeMap<String, usize>,
    /// Relationships with `affinity > 0.7 && trust > 0.6` (ally-grade bonds).
    pub strong_bonds: usize,
    /// Relationships with `affinity < -0.5` (enemy-grade conflicts).
    pub conflicts: usize,
    /// Number of connected components over the `affinity > 0.3` subgraph.
    pub cluster_count: usize,
    /// Size of the largest such cluster.
    pub largest_cluster_size: usize,
}

/// The shared, world-owned relationship graph: one [`Relationship`] per
/// unordered pair, created lazily on first dyadic event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialGraph {
    relationships: BTreeMap<PairKey, Relationship>,
}

impl SocialGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the relationship between `a` and `b`, if one
    /// has been recorded.
    #[must_use]
    pub fn get(&self, a: AgentId, b: AgentId) -> Option<&Relationship> {
        self.relationships.get(&pair_key(a, b))
    }

    /// Mutable access to the relationship between `a` and `b`, creating a
    /// fresh one if this is their first recorded interaction.
    pub fn get_or_create_mut(&mut self, a: AgentId, b: AgentId) -> &mut Relationship {
        self.relationships.entry(pair_key(a, b)).or_default()
    }

    /// All tracked relationships, keyed by their unordered pair.
    pub fn all(&self) -> impl Iterator<Item = (&(AgentId, AgentId), &Relationship)> {
        self.relationships.iter()
    }

    /// Apply §A.4.7's observation-intake rule set: `observer` witnessed
    /// `subject` perform `action`.
    pub fn record_observation(&mut self, observer: AgentId, subject: AgentId, action: &str, fairness_valued: bool, now: f64) {
        let (affinity_delta, trust_delta, respect_delta) = observation_deltas(action, fairness_valued);
        let relationship = self.get_or_create_mut(observer, subject);
        relationship.apply_interaction(action, now, affinity_delta, trust_delta, respect_delta);
    }

    /// Connected components over the subgraph of relationships with
    /// `affinity > 0.3`, via depth-first search (§C.4).
    #[must_use]
    pub fn social_clusters(&self) -> Vec<Vec<AgentId>> {
        let mut adjacency: BTreeMap<AgentId, Vec<AgentId>> = BTreeMap::new();
        for (&(a, b), relationship) in &self.relationships {
            if relationship.affinity > 0.3 {
                adjacency.entry(a).or_default().push(b);
                adjacency.entry(b).or_default().push(a);
            }
        }

        let mut visited = std::collections::BTreeSet::new();
        let mut clusters = Vec::new();
        for &start in adjacency.keys() {
            if visited.contains(&start) {
                continue;
            }
            let mut cluster = Vec::new();
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                if !visited.insert(node) {
                    continue;
                }
                cluster.push(node);
                if let Some(neighbors) = adjacency.get(&node) {
                    for &neighbor in neighbors {
                        if !visited.contains(&neighbor) {
                            stack.push(neighbor);
                        }
                    }
                }
            }
            cluster.sort();
            clusters.push(cluster);
        }
        clusters
    }

    /// Aggregate counts over the whole graph (§C.4).
    #[must_use]
    pub fn analyze(&self) -> SocialAnalysis {
        let mut by_type = BTreeMap::new();
        let mut strong_bonds = 0;
        let mut conflicts = 0;
        for relationship in self.relationships.values() {
            *by_type.entry(format!("{:?}", relationship.relationship_type)).or_insert(0) += 1;
            if relationship.affinity > 0.7 && relationship.trust > 0.6 {
                strong_bonds += 1;
            }
            if relationship.affinity < -0.5 {
                conflicts += 1;
            }
        }
        let clusters = self.social_clusters();
        let largest_cluster_size = clusters.iter().map(Vec::len).max().unwrap_or(0);
        SocialAnalysis {
            total_relationships: self.relationships.len(),
            by_type,
            strong_bonds,
            conflicts,
            cluster_count: clusters.len(),
            largest_cluster_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s2_observation_sours_affinity() {
        let mut graph = SocialGraph::new();
        let observer = AgentId::new();
        let target = AgentId::new();
        graph.record_observation(observer, target, "steal purse", true, 1.0);
        let relationship = graph.get(observer, target).expect("relationship exists");
        assert!((relationship.affinity - (-0.15)).abs() < 1e-9);
        assert!((relationship.trust - (-0.2)).abs() < 1e-9);
        assert!((relationship.familiarity - 0.05).abs() < 1e-9);
        assert_eq!(relationship.relationship_type, RelationshipType::Stranger);
    }

    #[test]
    fn gossip_and_secret_logs_are_capped_and_populated() {
        let mut relationship = Relationship::new();
        assert!(relationship.gossip_shared.is_empty());
        assert!(relationship.shared_secrets.is_empty());

        for i in 0..(RING_CAPACITY + 5) {
            relationship.record_gossip_shared("agent_a", format!("item {i}"));
            relationship.record_shared_secret(format!("secret {i}"));
        }
        assert_eq!(relationship.gossip_shared.len(), RING_CAPACITY);
        assert_eq!(relationship.shared_secrets.len(), RING_CAPACITY);
        assert!(relationship.gossip_shared.last().expect("non-empty").starts_with("agent_a: "));
    }

    #[test]
    fn familiarity_never_decreases() {
        let mut relationship = Relationship::new();
        relationship.apply_interaction("chat", 0.0, 0.0, 0.0, 0.0);
        let after_first = relationship.familiarity;
        relationship.apply_interaction("chat again", 1.0, -0.5, 0.0, 0.0);
        assert!(relationship.familiarity >= after_first);
    }

    #[test]
    fn relationship_type_is_a_pure_function_of_scalars() {
        let relationship = Relationship {
            affinity: 0.8,
            trust: 0.7,
            respect: 0.0,
            familiarity: 0.9,
            ..Relationship::new()
        };
        assert_eq!(
            classify(relationship.affinity, relationship.trust, relationship.respect, relationship.familiarity),
            RelationshipType::Ally
        );
    }

    #[test]
    fn pair_key_is_order_independent() {
        let mut graph = SocialGraph::new();
        let a = AgentId::new();
        let b = AgentId::new();
        graph.get_or_create_mut(a, b).apply_interaction("met", 0.0, 0.1, 0.0, 0.0);
        assert_eq!(graph.get(a, b), graph.get(b, a));
    }

    #[test]
    fn clusters_group_high_affinity_components() {
        let mut graph = SocialGraph::new();
        let a = AgentId::new();
        let b = AgentId::new();
        let c = AgentId::new();
        graph.get_or_create_mut(a, b).apply_interaction("close", 0.0, 0.8, 0.0, 0.0);
        graph.get_or_create_mut(b, c).apply_interaction("close", 0.0, 0.6, 0.0, 0.0);
        let clusters = graph.social_clusters();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }
}
