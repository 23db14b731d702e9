//! Beliefs, confidence updates, and per-agent theory of mind.
//!
//! Grounded on `beliefs.py`: a `Belief` accumulates supporting/contradicting
//! evidence into a confidence scalar; `TheoryOfMind` is a lightweight model
//! of one other agent's traits, goals, and emotions, updated from a fixed
//! keyword rule set; `BeliefSystem` owns both stores, keyed respectively by
//! subject and `target_agent_id`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tavern_types::{AgentId, BeliefKind};

/// Evidence lists are capped at this many most-recent entries (§A.4.4).
pub const MAX_EVIDENCE_ENTRIES: usize = 32;

/// Confidence at or above this is "strong".
pub const STRONG_THRESHOLD: f64 = 0.7;
/// Confidence at or below this is "weak".
pub const WEAK_THRESHOLD: f64 = 0.3;

/// A single belief about a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    /// What kind of belief this is.
    pub kind: BeliefKind,
    /// What/who the belief is about.
    pub subject: String,
    /// The belief's content.
    pub content: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Evidence strings that support this belief.
    pub supporting: Vec<String>,
    /// Evidence strings that contradict this belief.
    pub contradicting: Vec<String>,
    /// Absolute game time this belief was formed.
    pub formed_at: f64,
    /// Absolute game time this belief was last updated.
    pub last_updated: f64,
    /// How many times this belief has been updated with new evidence.
    pub update_count: u32,
}

impl Belief {
    /// Construct a belief at the given initial confidence.
    #[must_use]
    pub fn new(
        kind: BeliefKind,
        subject: impl Into<String>,
        content: impl Into<String>,
        confidence: f64,
        now: f64,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            content: content.into(),
            confidence: confidence.clamp(0.0, 1.0),
            supporting: Vec::new(),
            contradicting: Vec::new(),
            formed_at: now,
            last_updated: now,
            update_count: 0,
        }
    }

    /// Update confidence from a piece of evidence with weight `w`.
    ///
    /// Supporting: `confidence += w * (1 - confidence) * 0.5`.
    /// Contradicting: `confidence -= w * confidence * 0.5`.
    pub fn update_confidence(&mut self, supports: bool, weight: f64, evidence: impl Into<String>, now: f64) {
        let evidence = evidence.into();
        if supports {
            self.confidence += weight * (1.0 - self.confidence) * 0.5;
            push_capped(&mut self.supporting, evidence);
        } else {
            self.confidence -= weight * self.confidence * 0.5;
            push_capped(&mut self.contradicting, evidence);
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self.update_count += 1;
        self.last_updated = now;
    }

    /// Whether this belief is held strongly.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.confidence >= STRONG_THRESHOLD
    }

    /// Whether this belief is held weakly.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.confidence <= WEAK_THRESHOLD
    }
}

fn push_capped(list: &mut Vec<String>, item: String) {
    list.push(item);
    if list.len() > MAX_EVIDENCE_ENTRIES {
        list.remove(0);
    }
}

/// A model of another agent's traits, goals, and emotions, keyed by that
/// agent's id in [`BeliefSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryOfMind {
    /// Perceived trait name -> strength.
    pub perceived_traits: HashMap<String, f64>,
    /// Perceived goals, as free text.
    pub perceived_goals: Vec<String>,
    /// Perceived emotion kind name -> intensity.
    pub perceived_emotions: HashMap<String, f64>,
    /// Confidence in this model overall, in `[0, 1]`.
    pub model_confidence: f64,
}

impl Default for TheoryOfMind {
    fn default() -> Self {
        Self {
            perceived_traits: HashMap::new(),
            perceived_goals: Vec::new(),
            perceived_emotions: HashMap::new(),
            model_confidence: 0.3,
        }
    }
}

impl TheoryOfMind {
    /// A fresh model with default confidence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust estimate = `trustworthy * model_confidence + 0.5 * (1 - model_confidence)`.
    #[must_use]
    pub fn get_trust_estimate(&self) -> f64 {
        let trustworthy = self.perceived_traits.get("trustworthy").copied().unwrap_or(0.5);
        (trustworthy * self.model_confidence + 0.5 * (1.0 - self.model_confidence)).clamp(0.0, 1.0)
    }

    /// A coarse behavior prediction for `situation`, grounded on
    /// `beliefs.py::TheoryOfMind.predict_behavior`. Observable only.
    #[must_use]
    pub fn predict_behavior(&self, _situation: &str) -> &'static str {
        let helpful = self.perceived_traits.get("helpful").copied().unwrap_or(0.5);
        let trustworthy = self.perceived_traits.get("trustworthy").copied().unwrap_or(0.5);
        if helpful > 0.6 && trustworthy > 0.6 {
            "likely to be honest and helpful"
        } else if helpful < 0.3 || trustworthy < 0.3 {
            "might take risky or unethical actions"
        } else {
            "behavior uncertain, need more information"
        }
    }

    /// Apply the fixed keyword update rule set to an observation of this
    /// agent's behavior.
    pub fn update_from_observation(&mut self, observation: &str) {
        let lowered = observation.to_lowercase();
        if lowered.contains("refused") {
            let entry = self.perceived_traits.entry("helpful".to_string()).or_insert(0.5);
            *entry = (*entry - 0.1).max(0.0);
        }
        if lowered.contains("helped") || lowered.contains("donated") {
            let entry = self.perceived_traits.entry("generous".to_string()).or_insert(0.5);
            *entry = (*entry + 0.1).min(1.0);
        }
        if lowered.contains("lied") || lowered.contains("deceived") {
            let entry = self.perceived_traits.entry("trustworthy".to_string()).or_insert(0.5);
            *entry = (*entry - 0.2).max(0.0);
        }
        if let Some(topic) = lowered.strip_prefix("asked about ") {
            let goal = format!("learn about {topic}");
            if !self.perceived_goals.contains(&goal) {
                self.perceived_goals.push(goal);
            }
        }
        self.model_confidence = (self.model_confidence + 0.01).min(0.9);
    }

    /// Raise model confidence by `amount`, capped at `1.0`. Used by deep
    /// conversations (§A.4.8), distinct from the `0.9` cap
    /// `update_from_observation` applies to noisy behavioral updates.
    pub fn bump_confidence(&mut self, amount: f64) {
        self.model_confidence = (self.model_confidence + amount).min(1.0);
    }
}

/// Owns the belief store and per-agent theory-of-mind models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefSystem {
    beliefs: HashMap<String, Vec<Belief>>,
    mental_models: HashMap<AgentId, TheoryOfMind>,
}

/// Read-only counts over a [`BeliefSystem`], grounded on
/// `beliefs.py::BeliefSystem.get_summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefSummary {
    /// Total beliefs tracked across all subjects.
    pub total_beliefs: usize,
    /// Count of beliefs with `confidence >= STRONG_THRESHOLD`.
    pub strong_beliefs: usize,
    /// Number of distinct subjects tracked.
    pub subjects_tracked: usize,
    /// Number of agents this system has a theory-of-mind model for.
    pub agents_modeled: usize,
}

impl BeliefSystem {
    /// An empty belief system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new belief, indexed by its subject.
    pub fn add_belief(&mut self, belief: Belief) {
        self.beliefs.entry(belief.subject.clone()).or_default().push(belief);
    }

    /// All beliefs about a subject.
    #[must_use]
    pub fn get_beliefs_about(&self, subject: &str) -> &[Belief] {
        self.beliefs.get(subject).map_or(&[], |beliefs| beliefs.as_slice())
    }

    /// The strongest (highest-confidence) belief about a subject.
    #[must_use]
    pub fn get_belief(&self, subject: &str) -> Option<&Belief> {
        self.get_beliefs_about(subject)
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Mutable access to the strongest belief about a subject.
    pub fn get_belief_mut(&mut self, subject: &str) -> Option<&mut Belief> {
        self.beliefs
            .get_mut(subject)?
            .iter_mut()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Whether the strongest belief about `subject` is held above `min_confidence`.
    #[must_use]
    pub fn believes(&self, subject: &str, min_confidence: f64) -> bool {
        self.get_belief(subject).is_some_and(|belief| belief.confidence >= min_confidence)
    }

    /// The theory-of-mind model for `agent`, creating a default one if
    /// absent.
    pub fn get_theory_of_mind(&mut self, agent: AgentId) -> &mut TheoryOfMind {
        self.mental_models.entry(agent).or_default()
    }

    /// Read-only access to the theory-of-mind model for `agent`, if any.
    #[must_use]
    pub fn theory_of_mind(&self, agent: AgentId) -> Option<&TheoryOfMind> {
        self.mental_models.get(&agent)
    }

    /// Apply an observation of `agent`'s behavior to their mental model.
    pub fn update_mental_model(&mut self, agent: AgentId, observation: &str) {
        self.get_theory_of_mind(agent).update_from_observation(observation);
    }

    /// Every belief with confidence at or above `min_confidence`, most
    /// confident first.
    #[must_use]
    pub fn strongest_beliefs(&self, min_confidence: f64) -> Vec<&Belief> {
        let mut beliefs: Vec<&Belief> = self
            .beliefs
            .values()
            .flatten()
            .filter(|belief| belief.confidence >= min_confidence)
            .collect();
        beliefs.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        beliefs
    }

    /// Summary counts over this belief system.
    #[must_use]
    pub fn summary(&self) -> BeliefSummary {
        let total_beliefs = self.beliefs.values().map(Vec::len).sum();
        let strong_beliefs = self
            .beliefs
            .values()
            .flatten()
            .filter(|belief| belief.is_strong())
            .count();
        BeliefSummary {
            total_beliefs,
            strong_beliefs,
            subjects_tracked: self.beliefs.len(),
            agents_modeled: self.mental_models.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_update_matches_formula() {
        let mut belief = Belief::new(BeliefKind::Fact, "weather", "it will rain", 0.5, 0.0);
        belief.update_confidence(true, 0.1, "saw clouds", 1.0);
        assert!((belief.confidence - (0.5 + 0.1 * 0.5 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn confidence_never_escapes_bounds() {
        let mut belief = Belief::new(BeliefKind::Fact, "x", "y", 0.05, 0.0);
        for _ in 0..50 {
            belief.update_confidence(false, 0.9, "contradiction", 0.0);
        }
        assert!(belief.confidence >= 0.0);
    }

    #[test]
    fn evidence_list_is_capped() {
        let mut belief = Belief::new(BeliefKind::Fact, "x", "y", 0.5, 0.0);
        for i in 0..(MAX_EVIDENCE_ENTRIES + 10) {
            belief.update_confidence(true, 0.01, format!("evidence {i}"), 0.0);
        }
        assert_eq!(belief.supporting.len(), MAX_EVIDENCE_ENTRIES);
    }

    #[test]
    fn theory_of_mind_keyword_rules() {
        let mut tom = TheoryOfMind::new();
        tom.update_from_observation("refused to help the merchant");
        assert!(tom.perceived_traits.get("helpful").copied().unwrap_or(0.5) < 0.5);
        tom.update_from_observation("helped a stranger in need");
        assert!(tom.perceived_traits.get("generous").copied().unwrap_or(0.5) > 0.5);
        tom.update_from_observation("lied about the gold");
        assert!(tom.perceived_traits.get("trustworthy").copied().unwrap_or(0.5) < 0.5);
        tom.update_from_observation("asked about the ruins");
        assert!(tom.perceived_goals.contains(&"learn about the ruins".to_string()));
    }

    #[test]
    fn model_confidence_caps_at_point_nine() {
        let mut tom = TheoryOfMind::new();
        for _ in 0..100 {
            tom.update_from_observation("helped someone");
        }
        assert!(tom.model_confidence <= 0.9);
    }

    #[test]
    fn bump_confidence_caps_at_one() {
        let mut tom = TheoryOfMind::new();
        tom.bump_confidence(0.1);
        assert!((tom.model_confidence - 0.4).abs() < 1e-9);
        for _ in 0..20 {
            tom.bump_confidence(0.5);
        }
        assert!((tom.model_confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn strongest_belief_is_argmax_confidence() {
        let mut system = BeliefSystem::new();
        system.add_belief(Belief::new(BeliefKind::Fact, "bob", "is kind", 0.4, 0.0));
        system.add_belief(Belief::new(BeliefKind::Fact, "bob", "is generous", 0.9, 0.0));
        let strongest = system.get_belief("bob").expect("belief exists");
        assert_eq!(strongest.content, "is generous");
    }

    #[test]
    fn summary_counts_subjects_and_strong_beliefs() {
        let mut system = BeliefSystem::new();
        system.add_belief(Belief::new(BeliefKind::Fact, "bob", "is kind", 0.9, 0.0));
        system.add_belief(Belief::new(BeliefKind::Fact, "alice", "likes tea", 0.2, 0.0));
        let summary = system.summary();
        assert_eq!(summary.total_beliefs, 2);
        assert_eq!(summary.strong_beliefs, 1);
        assert_eq!(summary.subjects_tracked, 2);
    }
}
