//! Property tests over §A.8's universal invariants: scalar closure,
//! familiarity monotonicity, relationship-type purity, goal urgency
//! boundaries, decay-at-zero-dt, and appraisal intensity bounds.

use proptest::prelude::*;
use tavern_agent::{Belief, Goal, Need, Personality};
use tavern_agent::{EmotionalState, Outcome};
use tavern_social::{classify, Relationship};
use tavern_types::{BeliefKind, GoalKind, NeedKind};

fn unit() -> impl Strategy<Value = f64> {
    0.0..=1.0
}

fn signed_unit() -> impl Strategy<Value = f64> {
    -1.0..=1.0
}

proptest! {
    /// Invariant 1 (partial, `Need`): decay never pushes level outside `[0, 1]`.
    #[test]
    fn need_level_stays_in_unit_interval(start in unit(), dt in 0.0..200.0f64) {
        let mut need = Need::new(NeedKind::Hunger, start);
        need.update(dt, dt);
        prop_assert!((0.0..=1.0).contains(&need.level));
    }

    /// Boundary: decay with `dt = 0` is a no-op on the level.
    #[test]
    fn zero_dt_decay_is_a_no_op(start in unit()) {
        let mut need = Need::new(NeedKind::Hunger, start);
        need.update(0.0, 0.0);
        prop_assert!((need.level - start).abs() < 1e-12);
    }

    /// Invariant 1 (`Relationship`): affinity/trust/respect stay in `[-1, 1]`,
    /// familiarity stays in `[0, 1]`, after any sequence of deltas.
    #[test]
    fn relationship_scalars_stay_closed(
        affinity_delta in signed_unit(),
        trust_delta in signed_unit(),
        respect_delta in signed_unit(),
    ) {
        let mut relationship = Relationship::new();
        relationship.apply_interaction("event", 0.0, affinity_delta, trust_delta, respect_delta);
        prop_assert!((-1.0..=1.0).contains(&relationship.affinity));
        prop_assert!((-1.0..=1.0).contains(&relationship.trust));
        prop_assert!((-1.0..=1.0).contains(&relationship.respect));
        prop_assert!((0.0..=1.0).contains(&relationship.familiarity));
    }

    /// Invariant 2: familiarity never decreases, across any sequence of
    /// interactions including ones that sour affinity/trust/respect.
    #[test]
    fn familiarity_is_monotonic_across_a_sequence(
        deltas in prop::collection::vec((signed_unit(), signed_unit(), signed_unit()), 1..20),
    ) {
        let mut relationship = Relationship::new();
        let mut last_familiarity = relationship.familiarity;
        for (i, (a, t, r)) in deltas.into_iter().enumerate() {
            let now = f64::from(u32::try_from(i).unwrap_or(0));
            relationship.apply_interaction("event", now, a, t, r);
            prop_assert!(relationship.familiarity >= last_familiarity);
            last_familiarity = relationship.familiarity;
        }
    }

    /// Invariant 4: the cached `relationship_type` is always the pure
    /// classification of the current scalars.
    #[test]
    fn relationship_type_matches_pure_classification(
        affinity_delta in signed_unit(),
        trust_delta in signed_unit(),
        respect_delta in signed_unit(),
    ) {
        let mut relationship = Relationship::new();
        relationship.apply_interaction("event", 0.0, affinity_delta, trust_delta, respect_delta);
        let expected = classify(relationship.affinity, relationship.trust, relationship.respect, relationship.familiarity);
        prop_assert_eq!(relationship.relationship_type, expected);
    }

    /// Invariant 1 (`Belief`): confidence stays in `[0, 1]` regardless of
    /// supporting/contradicting evidence weight.
    #[test]
    fn belief_confidence_stays_closed(initial in unit(), supports in any::<bool>(), weight in unit()) {
        let mut belief = Belief::new(BeliefKind::Fact, "subject", "content", initial, 0.0);
        belief.update_confidence(supports, weight, "evidence", 1.0);
        prop_assert!((0.0..=1.0).contains(&belief.confidence));
    }

    /// Goal urgency is always within `[0, 1]`, and an overdue deadline
    /// saturates it at `1.0`.
    #[test]
    fn goal_urgency_stays_closed_and_overdue_saturates(priority in unit(), overdue_by in 0.0..100.0f64) {
        let mut goal = Goal::new("do a thing", GoalKind::Achievement, priority, "done", Vec::new(), 0.0);
        prop_assert!((0.0..=1.0).contains(&goal.urgency(0.0)));
        goal.deadline = Some(-overdue_by);
        prop_assert!((goal.urgency(0.0) - 1.0).abs() < 1e-12);
    }

    /// Invariant 7: a positive appraisal triggers JOY with intensity in
    /// `[0.3, 0.3 + 0.7 * relevance]` when the multiplier is identity.
    #[test]
    fn positive_appraisal_joy_intensity_matches_relevance(relevance in unit()) {
        let mut state = EmotionalState::new();
        state.appraise_event(Outcome::Positive, 0.0, relevance, |_| 1.0, "event", 0.0);
        let joy = state.get_dominant_emotion().expect("an emotion was triggered");
        let expected = 0.3 + 0.7 * relevance;
        prop_assert!(joy.intensity >= 0.3 - 1e-9);
        prop_assert!((joy.intensity - expected).abs() < 1e-9);
    }
}

fn plain_personality() -> Personality {
    Personality::new(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new())
}

#[test]
fn personality_trait_construction_always_clamps_into_unit_interval() {
    let personality = Personality::new(2.0, -1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new());
    for trait_value in [
        personality.openness,
        personality.conscientiousness,
        personality.extraversion,
        personality.agreeableness,
        personality.neuroticism,
        personality.risk_tolerance,
        personality.optimism,
        personality.patience,
    ] {
        assert!((0.0..=1.0).contains(&trait_value));
    }
    let _ = plain_personality();
}
