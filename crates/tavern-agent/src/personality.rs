//! Personality traits, values, and the pure functions derived from them.
//!
//! Personality is immutable per tick (§A.3): nothing in this module mutates
//! a `Personality` in place. The only way traits change is a "profound
//! experience" event, which is out of scope here.

use serde::{Deserialize, Serialize};

use crate::emotions::EmotionKind;

/// A single named value with a strength in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    /// Short name of the value, e.g. `"fairness"`.
    pub name: String,
    /// How strongly the agent holds this value, in `[0, 1]`.
    pub strength: f64,
    /// Free-text description.
    pub description: String,
}

impl Value {
    /// Construct a value, clamping `strength` into `[0, 1]`.
    #[must_use]
    pub fn new(name: impl Into<String>, strength: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strength: strength.clamp(0.0, 1.0),
            description: description.into(),
        }
    }
}

/// Big Five trait scalars plus three derived dispositions, all in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// Openness to experience.
    pub openness: f64,
    /// Conscientiousness.
    pub conscientiousness: f64,
    /// Extraversion.
    pub extraversion: f64,
    /// Agreeableness.
    pub agreeableness: f64,
    /// Neuroticism.
    pub neuroticism: f64,
    /// Willingness to accept risk.
    pub risk_tolerance: f64,
    /// General expectation that things will turn out well.
    pub optimism: f64,
    /// Tolerance for delayed gratification.
    pub patience: f64,
    /// Ordered list of values the agent holds.
    pub values: Vec<Value>,
}

/// Named decision biases derived purely from trait scalars.
///
/// Grounded on `personality.py::get_decision_bias`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionBias {
    /// Preference for novelty over the familiar.
    pub prefer_new_experiences: f64,
    /// Preference for planning ahead over improvising.
    pub prefer_planning: f64,
    /// Preference for resolving problems socially.
    pub prefer_social_solutions: f64,
    /// Preference for low-risk options.
    pub prefer_safe_options: f64,
    /// Baseline expectation that outcomes will be positive.
    pub expect_positive_outcomes: f64,
    /// Tendency to deliberate before acting.
    pub deliberate_before_acting: f64,
    /// Tendency to worry about downstream consequences.
    pub worry_about_consequences: f64,
    /// Baseline trust extended to others.
    pub trust_others: f64,
}

impl Personality {
    /// Construct a personality, clamping every scalar trait into `[0, 1]`.
    #[must_use]
    pub fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        neuroticism: f64,
        risk_tolerance: f64,
        optimism: f64,
        patience: f64,
        values: Vec<Value>,
    ) -> Self {
        Self {
            openness: openness.clamp(0.0, 1.0),
            conscientiousness: conscientiousness.clamp(0.0, 1.0),
            extraversion: extraversion.clamp(0.0, 1.0),
            agreeableness: agreeableness.clamp(0.0, 1.0),
            neuroticism: neuroticism.clamp(0.0, 1.0),
            risk_tolerance: risk_tolerance.clamp(0.0, 1.0),
            optimism: optimism.clamp(0.0, 1.0),
            patience: patience.clamp(0.0, 1.0),
            values,
        }
    }

    /// Decision biases derived from this personality's trait scalars.
    #[must_use]
    pub fn decision_bias(&self) -> DecisionBias {
        DecisionBias {
            prefer_new_experiences: self.openness,
            prefer_planning: self.conscientiousness,
            prefer_social_solutions: ((self.extraversion + self.agreeableness) / 2.0)
                .clamp(0.0, 1.0),
            prefer_safe_options: 1.0 - self.risk_tolerance,
            expect_positive_outcomes: self.optimism,
            deliberate_before_acting: self.patience,
            worry_about_consequences: self.neuroticism,
            trust_others: self.agreeableness,
        }
    }

    /// The `[0.5, 1.5]`-clamped multiplier this personality applies to a
    /// freshly appraised emotion's base intensity.
    ///
    /// Grounded on `personality.py::influences_emotion`.
    #[must_use]
    pub fn emotion_multiplier(&self, kind: EmotionKind) -> f64 {
        let raw = match kind {
            EmotionKind::Joy | EmotionKind::Hope | EmotionKind::Pride | EmotionKind::Gratitude => {
                1.0 + 0.3 * self.optimism - 0.2 * self.neuroticism
            }
            EmotionKind::Fear | EmotionKind::Anxiety => 1.0 + 0.4 * self.neuroticism,
            EmotionKind::Anger | EmotionKind::Frustration => {
                1.0 + 0.3 * self.neuroticism - 0.2 * self.agreeableness
            }
            EmotionKind::Sadness | EmotionKind::Despair | EmotionKind::Grief => {
                1.0 + 0.2 * self.neuroticism
            }
            EmotionKind::Trust => 1.0 + 0.3 * self.agreeableness,
            EmotionKind::Loneliness => 1.0 + 0.3 * self.extraversion,
            EmotionKind::Surprise | EmotionKind::Disgust | EmotionKind::Anticipation => 1.0,
            EmotionKind::Shame | EmotionKind::Guilt => 1.0 + 0.2 * self.conscientiousness,
        };
        raw.clamp(0.5, 1.5)
    }

    /// How well an action's description aligns with this personality's
    /// values, in `[-1, 1]`. Positive means the action is value-congruent.
    ///
    /// Grounded on `personality.py::evaluate_action_alignment`.
    #[must_use]
    pub fn evaluate_action_alignment(&self, action_description: &str) -> f64 {
        let lowered = action_description.to_lowercase();
        if self.values.is_empty() {
            return 0.0;
        }
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for value in &self.values {
            let mentioned = lowered.contains(&value.name.to_lowercase());
            let contribution = if mentioned { 1.0 } else { 0.0 };
            weighted_sum += contribution * value.strength;
            weight_total += value.strength;
        }
        if weight_total <= 0.0 {
            0.0
        } else {
            (weighted_sum / weight_total).clamp(-1.0, 1.0)
        }
    }

    /// A named archetype matching `personality.py::create_personality_archetype`.
    ///
    /// Unrecognized names fall back to a neutral personality with no values.
    #[must_use]
    pub fn archetype(name: &str) -> Self {
        match name {
            "merchant" => Self::new(
                0.5,
                0.7,
                0.7,
                0.4,
                0.3,
                0.6,
                0.6,
                0.5,
                vec![
                    Value::new("wealth", 0.8, "accumulating prosperity"),
                    Value::new("reputation", 0.6, "being known as fair to deal with"),
                ],
            ),
            "scholar" => Self::new(
                0.9,
                0.6,
                0.3,
                0.5,
                0.4,
                0.3,
                0.5,
                0.8,
                vec![
                    Value::new("knowledge", 0.9, "understanding the world"),
                    Value::new("truth", 0.7, "accuracy over comfort"),
                ],
            ),
            "warrior" => Self::new(
                0.4,
                0.6,
                0.5,
                0.3,
                0.3,
                0.8,
                0.5,
                0.4,
                vec![
                    Value::new("honor", 0.8, "keeping one's word in battle"),
                    Value::new("strength", 0.7, "physical prowess"),
                ],
            ),
            "rogue" => Self::new(
                0.7,
                0.3,
                0.5,
                0.2,
                0.4,
                0.9,
                0.4,
                0.3,
                vec![
                    Value::new("freedom", 0.8, "answering to no one"),
                    Value::new("opportunity", 0.7, "taking advantage when it appears"),
                ],
            ),
            "healer" => Self::new(
                0.6,
                0.7,
                0.4,
                0.9,
                0.3,
                0.2,
                0.7,
                0.7,
                vec![
                    Value::new("compassion", 0.9, "relieving suffering"),
                    Value::new("fairness", 0.6, "treating all equally"),
                ],
            ),
            _ => Self::new(0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_traits() {
        let personality = Personality::new(1.5, -0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, Vec::new());
        assert_eq!(personality.openness, 1.0);
        assert_eq!(personality.conscientiousness, 0.0);
    }

    #[test]
    fn decision_bias_mirrors_traits() {
        let personality = Personality::new(0.8, 0.6, 0.4, 0.2, 0.1, 0.9, 0.7, 0.3, Vec::new());
        let bias = personality.decision_bias();
        assert_eq!(bias.prefer_new_experiences, 0.8);
        assert_eq!(bias.prefer_planning, 0.6);
        assert!((bias.prefer_safe_options - 0.1).abs() < 1e-9);
    }

    #[test]
    fn emotion_multiplier_stays_in_bounds() {
        let personality = Personality::new(0.5, 0.5, 0.5, 0.5, 1.0, 0.5, 1.0, 0.5, Vec::new());
        for kind in EmotionKind::ALL {
            let multiplier = personality.emotion_multiplier(kind);
            assert!((0.5..=1.5).contains(&multiplier));
        }
    }

    #[test]
    fn action_alignment_rewards_matching_values() {
        let personality = Personality::new(
            0.5,
            0.5,
            0.5,
            0.5,
            0.5,
            0.5,
            0.5,
            0.5,
            vec![Value::new("fairness", 0.9, "")],
        );
        let aligned = personality.evaluate_action_alignment("settle the dispute with fairness");
        let unrelated = personality.evaluate_action_alignment("go to sleep");
        assert!(aligned > unrelated);
    }

    #[test]
    fn archetypes_are_distinct() {
        let merchant = Personality::archetype("merchant");
        let scholar = Personality::archetype("scholar");
        assert!(merchant.risk_tolerance > scholar.risk_tolerance - 0.5);
        assert_ne!(merchant.values.len(), 0);
        assert_eq!(Personality::archetype("unknown").values.len(), 0);
    }
}
