//! The reputation network: per-observer, per-subject, per-aspect opinions,
//! updated from witnessed actions and propagated by gossip.
//!
//! Grounded on `emergence-agents/src/reputation.rs`'s
//! tag/observation/profile shape, restructured around the EMA score update
//! and gossip-alignment rules §A.4.9 specifies.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tavern_types::{AgentId, ReputationAspect};

use crate::relationship::{SocialGraph, RING_CAPACITY};

/// Default weight applied to a witnessed-directly observation's confidence
/// gain.
pub const WITNESS_CONFIDENCE_BOOST: f64 = 0.3;

/// The fixed action-type -> aspect-delta table of §A.4.9.
#[must_use]
pub fn action_aspect_deltas(action_type: &str) -> Vec<(ReputationAspect, f64)> {
    match action_type {
        "help_npc" => vec![(ReputationAspect::Generosity, 0.3), (ReputationAspect::Trustworthiness, 0.2)],
        "break_promise" => vec![(ReputationAspect::Trustworthiness, -0.4), (ReputationAspect::Reliability, -0.3)],
        "win_fight" => vec![(ReputationAspect::CombatSkill, 0.4)],
        "lose_fight" => vec![(ReputationAspect::CombatSkill, -0.2)],
        "keep_promise" => vec![(ReputationAspect::Reliability, 0.2), (ReputationAspect::Trustworthiness, 0.1)],
        "trade_fairly" => vec![(ReputationAspect::BusinessAcumen, 0.2), (ReputationAspect::Honesty, 0.1)],
        "tell_lie" => vec![(ReputationAspect::Honesty, -0.3), (ReputationAspect::Trustworthiness, -0.2)],
        _ => Vec::new(),
    }
}

/// One observer's opinion of one subject's standing on one aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationOpinion {
    /// Current opinion, in `[-1, 1]`.
    pub score: f64,
    /// Confidence in this opinion, in `[0, 1]`.
    pub confidence: f64,
    /// How this opinion was formed: `"direct"` or `"gossip"`.
    pub source: String,
    /// Absolute game time this opinion was last updated.
    pub last_updated: f64,
    /// Free-text log of the experiences behind this opinion.
    pub experiences: Vec<String>,
}

impl Default for ReputationOpinion {
    fn default() -> Self {
        Self {
            score: 0.0,
            confidence: 0.1,
            source: "direct".to_string(),
            last_updated: 0.0,
            experiences: Vec::new(),
        }
    }
}

impl ReputationOpinion {
    fn push_experience(&mut self, entry: String) {
        self.experiences.push(entry);
        if self.experiences.len() > RING_CAPACITY {
            self.experiences.remove(0);
        }
    }
}

/// Per-profession aspect weighting used by [`ReputationNetwork::overall_opinion`] (§C.6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NpcReputationProfile {
    importance: HashMap<ReputationAspect, f64>,
}

impl NpcReputationProfile {
    /// An empty profile; every aspect defaults to importance `1.0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the importance weight of `aspect` for this profile.
    pub fn set_aspect_importance(&mut self, aspect: ReputationAspect, importance: f64) {
        self.importance.insert(aspect, importance.max(0.0));
    }

    /// The importance weight for `aspect`, defaulting to `1.0`.
    #[must_use]
    pub fn importance(&self, aspect: ReputationAspect) -> f64 {
        self.importance.get(&aspect).copied().unwrap_or(1.0)
    }

    /// The `merchant` archetype: cares about honesty and business acumen.
    #[must_use]
    pub fn merchant() -> Self {
        let mut profile = Self::new();
        profile.set_aspect_importance(ReputationAspect::Honesty, 2.0);
        profile.set_aspect_importance(ReputationAspect::BusinessAcumen, 2.0);
        profile
    }

    /// The `guard` archetype: cares about authority and combat skill.
    #[must_use]
    pub fn guard() -> Self {
        let mut profile = Self::new();
        profile.set_aspect_importance(ReputationAspect::RespectForAuthority, 2.0);
        profile.set_aspect_importance(ReputationAspect::CombatSkill, 2.0);
        profile
    }
}

/// Coarse reputation-level bucketing of an overall opinion (§C.6).
#[must_use]
pub fn reputation_bucket(overall: f64) -> &'static str {
    match overall {
        score if score >= 0.7 => "hero",
        score if score >= 0.4 => "respected",
        score if score >= 0.15 => "trusted",
        score if score > -0.15 => "unknown",
        score if score > -0.5 => "suspicious",
        _ => "notorious",
    }
}

/// One piece of gossip a dyad's sweep produced, pending application via
/// [`ReputationNetwork::receive_gossip`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipEvent {
    /// Who is passing the gossip along.
    pub source: AgentId,
    /// Who receives it.
    pub listener: AgentId,
    /// Who the gossip is about.
    pub subject: AgentId,
    /// Which aspect the gossip concerns.
    pub aspect: ReputationAspect,
    /// The source's own opinion score being shared.
    pub gossip_score: f64,
    /// How credible the listener considers the source, in `[0, 1]`.
    pub source_credibility: f64,
}

/// The shared, world-owned reputation network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationNetwork {
    opinions: HashMap<(AgentId, AgentId, ReputationAspect), ReputationOpinion>,
}

impl ReputationNetwork {
    /// An empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to `observer`'s opinion of `subject` on `aspect`.
    #[must_use]
    pub fn opinion(&self, observer: AgentId, subject: AgentId, aspect: ReputationAspect) -> Option<&ReputationOpinion> {
        self.opinions.get(&(observer, subject, aspect))
    }

    /// Apply a directly witnessed action: `observer` saw `subject` perform
    /// `action_type`. Updates every aspect the action maps to via an EMA.
    pub fn record_observation(&mut self, observer: AgentId, subject: AgentId, action_type: &str, now: f64) {
        for (aspect, delta) in action_aspect_deltas(action_type) {
            let opinion = self.opinions.entry((observer, subject, aspect)).or_default();
            let weight = (0.3 + 0.4 * opinion.confidence).clamp(0.0, 1.0);
            let target = (opinion.score + delta).clamp(-1.0, 1.0);
            opinion.score = (opinion.score * (1.0 - weight) + target * weight).clamp(-1.0, 1.0);
            opinion.confidence = (opinion.confidence + WITNESS_CONFIDENCE_BOOST).min(1.0);
            opinion.source = "direct".to_string();
            opinion.last_updated = now;
            opinion.push_experience(action_type.to_string());
        }
    }

    /// Apply a piece of received gossip to `listener`'s opinion of
    /// `subject` on `aspect`, per §A.4.9's alignment rule.
    pub fn receive_gossip(
        &mut self,
        listener: AgentId,
        subject: AgentId,
        aspect: ReputationAspect,
        gossip_score: f64,
        source_credibility: f64,
        now: f64,
    ) {
        let opinion = self.opinions.entry((listener, subject, aspect)).or_default();
        let weight = (0.1 * source_credibility).clamp(0.0, 1.0);
        let alignment = (opinion.score - gossip_score).abs();
        opinion.score = (opinion.score * (1.0 - weight) + gossip_score * weight).clamp(-1.0, 1.0);
        opinion.confidence = if alignment < 0.3 {
            (opinion.confidence + 0.05).min(1.0)
        } else {
            (opinion.confidence - 0.1).max(0.1)
        };
        opinion.source = "gossip".to_string();
        opinion.last_updated = now;
        opinion.push_experience(format!("gossip about {aspect:?}"));
    }

    /// `observer`'s overall opinion of `subject`: a confidence- and
    /// importance-weighted average across every aspect tracked, per §A.4.9.
    #[must_use]
    pub fn overall_opinion(&self, observer: AgentId, subject: AgentId, profile: Option<&NpcReputationProfile>) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (&(opinion_observer, opinion_subject, aspect), opinion) in &self.opinions {
            if opinion_observer != observer || opinion_subject != subject {
                continue;
            }
            let importance = profile.map_or(1.0, |profile| profile.importance(aspect));
            let weight = importance * opinion.confidence;
            weighted_sum += opinion.score * weight;
            weight_total += weight;
        }
        if weight_total <= 0.0 {
            0.0
        } else {
            weighted_sum / weight_total
        }
    }

    /// The gossip propagation sweep of §A.5: for every relationship with
    /// `affinity > 0.2, familiarity > 0.3`, each of the pair independently
    /// rolls to gossip about whichever subject/aspect they hold their
    /// strongest opinion on, scaled by recency of interaction.
    pub fn gossip_propagation_sweep(
        &self,
        social_graph: &SocialGraph,
        gossip_frequency: f64,
        now: f64,
        rng: &mut impl Rng,
    ) -> Vec<GossipEvent> {
        let mut events = Vec::new();
        for (&(a, b), relationship) in social_graph.all() {
            if relationship.affinity <= 0.2 || relationship.familiarity <= 0.3 {
                continue;
            }
            let hours_since = now - relationship.last_time;
            let probability = if hours_since > 24.0 {
                gossip_frequency * 1.5
            } else if hours_since < 2.0 {
                gossip_frequency * 0.3
            } else {
                gossip_frequency
            };
            for (source, listener) in [(a, b), (b, a)] {
                if rng.random::<f64>() < probability.clamp(0.0, 1.0) {
                    if let Some(event) = self.strongest_opinion_event(source, listener) {
                        events.push(event);
                    }
                }
            }
        }
        events
    }

    fn strongest_opinion_event(&self, source: AgentId, listener: AgentId) -> Option<GossipEvent> {
        let ((_, subject, aspect), opinion) = self
            .opinions
            .iter()
            .filter(|((observer, _, _), _)| *observer == source)
            .max_by(|(_, a), (_, b)| {
                (a.confidence * a.score.abs()).total_cmp(&(b.confidence * b.score.abs()))
            })?;
        Some(GossipEvent {
            source,
            listener,
            subject: *subject,
            aspect: *aspect,
            gossip_score: opinion.score,
            source_credibility: self.overall_opinion(listener, source, None).mul_add(0.5, 0.5).clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s4_gossip_matches_literal_example() {
        let mut network = ReputationNetwork::new();
        let observer = AgentId::new();
        let subject = AgentId::new();
        let listener = AgentId::new();
        network.opinions.insert(
            (observer, subject, ReputationAspect::Trustworthiness),
            ReputationOpinion {
                score: 0.6,
                confidence: 0.7,
                source: "direct".to_string(),
                last_updated: 0.0,
                experiences: Vec::new(),
            },
        );
        network.receive_gossip(listener, subject, ReputationAspect::Trustworthiness, 0.6, 0.5, 1.0);
        let opinion = network.opinion(listener, subject, ReputationAspect::Trustworthiness).expect("opinion formed");
        assert!((opinion.score - 0.03).abs() < 1e-9);
        assert!((opinion.confidence - 0.1).abs() < 1e-9);
    }

    #[test]
    fn direct_observation_raises_confidence() {
        let mut network = ReputationNetwork::new();
        let observer = AgentId::new();
        let subject = AgentId::new();
        network.record_observation(observer, subject, "help_npc", 0.0);
        let opinion = network.opinion(observer, subject, ReputationAspect::Generosity).expect("opinion formed");
        assert!(opinion.score > 0.0);
        assert!(opinion.confidence > 0.1);
    }

    #[test]
    fn reputation_bucket_thresholds() {
        assert_eq!(reputation_bucket(0.8), "hero");
        assert_eq!(reputation_bucket(-0.8), "notorious");
        assert_eq!(reputation_bucket(0.0), "unknown");
    }

    #[test]
    fn profile_importance_skews_overall_opinion() {
        let mut network = ReputationNetwork::new();
        let observer = AgentId::new();
        let subject = AgentId::new();
        network.record_observation(observer, subject, "trade_fairly", 0.0);
        network.record_observation(observer, subject, "win_fight", 0.0);
        let merchant = NpcReputationProfile::merchant();
        let uniform = network.overall_opinion(observer, subject, None);
        let weighted = network.overall_opinion(observer, subject, Some(&merchant));
        assert_ne!(uniform, weighted);
    }
}
