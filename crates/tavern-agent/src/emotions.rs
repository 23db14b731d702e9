//! Transient emotions, the slower-moving mood they aggregate into, and
//! appraisal of incoming events.
//!
//! Grounded on `emotions.py`: `Emotion` decays linearly and is "active"
//! above a fixed threshold; `Mood` tracks toward a target derived from
//! active emotions via a fixed valence/arousal table; `EmotionalState`
//! bundles both and exposes the appraisal entry point plus the
//! risk-tolerance and social-behavior modifiers §A.4.3 requires.

use serde::{Deserialize, Serialize};

pub use tavern_types::EmotionKind;

/// Below this intensity an emotion is considered inactive.
pub const ACTIVE_THRESHOLD: f64 = 0.1;

/// How much mood leaks into fresh perception valence (§A.4.1 step 3).
pub const MOOD_PERCEPTION_INFLUENCE: f64 = 0.2;

/// The `(valence, arousal)` contribution of a fully-intense instance of each
/// emotion kind, used to compute mood's moving target.
#[must_use]
pub const fn emotion_valence_arousal(kind: EmotionKind) -> (f64, f64) {
    match kind {
        EmotionKind::Joy => (1.0, 0.5),
        EmotionKind::Trust => (0.6, 0.2),
        EmotionKind::Fear => (-0.7, 0.8),
        EmotionKind::Surprise => (0.1, 0.7),
        EmotionKind::Sadness => (-0.8, -0.3),
        EmotionKind::Disgust => (-0.6, 0.3),
        EmotionKind::Anger => (-0.5, 0.8),
        EmotionKind::Anticipation => (0.3, 0.4),
        EmotionKind::Anxiety => (-0.6, 0.6),
        EmotionKind::Hope => (0.6, 0.4),
        EmotionKind::Despair => (-0.9, -0.4),
        EmotionKind::Pride => (0.7, 0.3),
        EmotionKind::Shame => (-0.7, 0.1),
        EmotionKind::Gratitude => (0.8, 0.2),
        EmotionKind::Loneliness => (-0.6, -0.2),
        EmotionKind::Grief => (-0.9, -0.5),
        EmotionKind::Frustration => (-0.5, 0.6),
        EmotionKind::Guilt => (-0.6, 0.1),
    }
}

/// A single transient emotion instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    /// Which emotion this is.
    pub kind: EmotionKind,
    /// Current intensity, in `[0, 1]`.
    pub intensity: f64,
    /// Decay rate, intensity lost per game hour.
    pub decay_per_hour: f64,
    /// What triggered this emotion, free text.
    pub trigger: String,
    /// Absolute game time the emotion was last triggered.
    pub trigger_time: f64,
}

impl Emotion {
    /// Construct a fresh emotion instance.
    #[must_use]
    pub fn new(kind: EmotionKind, intensity: f64, trigger: impl Into<String>, now: f64) -> Self {
        Self {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            decay_per_hour: 0.15,
            trigger: trigger.into(),
            trigger_time: now,
        }
    }

    /// Decay linearly over `dt_hours`.
    pub fn update(&mut self, dt_hours: f64) {
        self.intensity = (self.intensity - self.decay_per_hour * dt_hours).clamp(0.0, 1.0);
    }

    /// Raise intensity by `amount`, clamped to `1.0`, and record the trigger.
    pub fn intensify(&mut self, amount: f64, trigger: impl Into<String>, now: f64) {
        self.intensity = (self.intensity + amount).clamp(0.0, 1.0);
        self.trigger = trigger.into();
        self.trigger_time = now;
    }

    /// Lower intensity by `amount`, clamped to `0.0`.
    pub fn diminish(&mut self, amount: f64) {
        self.intensity = (self.intensity - amount).clamp(0.0, 1.0);
    }

    /// Whether this emotion is currently above [`ACTIVE_THRESHOLD`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.intensity >= ACTIVE_THRESHOLD
    }
}

/// The slow-moving two-axis mood an agent's active emotions aggregate into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    /// Positive/negative axis, in `[-1, 1]`.
    pub valence: f64,
    /// Calm/excited axis, in `[-1, 1]`.
    pub arousal: f64,
    /// How quickly mood tracks its target each hour, in `[0, 1]`.
    pub change_rate: f64,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            valence: 0.0,
            arousal: 0.0,
            change_rate: 0.1,
        }
    }
}

impl Mood {
    /// Move mood toward the intensity-weighted target of `active_emotions`.
    pub fn update_from_emotions(&mut self, active_emotions: &[Emotion], dt_hours: f64) {
        let (target_valence, target_arousal) = Self::target(active_emotions);
        let step = (self.change_rate * dt_hours).clamp(0.0, 1.0);
        self.valence = (self.valence + step * (target_valence - self.valence)).clamp(-1.0, 1.0);
        self.arousal = (self.arousal + step * (target_arousal - self.arousal)).clamp(-1.0, 1.0);
    }

    fn target(active_emotions: &[Emotion]) -> (f64, f64) {
        let mut valence_sum = 0.0;
        let mut arousal_sum = 0.0;
        let mut weight_total = 0.0;
        for emotion in active_emotions.iter().filter(|emotion| emotion.is_active()) {
            let (valence, arousal) = emotion_valence_arousal(emotion.kind);
            valence_sum += valence * emotion.intensity;
            arousal_sum += arousal * emotion.intensity;
            weight_total += emotion.intensity;
        }
        if weight_total <= 0.0 {
            (0.0, 0.0)
        } else {
            (valence_sum / weight_total, arousal_sum / weight_total)
        }
    }

    /// A short human-readable mood descriptor.
    #[must_use]
    pub fn get_mood_descriptor(&self) -> &'static str {
        match (self.valence, self.arousal) {
            (v, a) if v > 0.3 && a > 0.3 => "excited",
            (v, a) if v > 0.3 && a <= 0.3 => "content",
            (v, a) if v < -0.3 && a > 0.3 => "agitated",
            (v, a) if v < -0.3 && a <= 0.3 => "downcast",
            _ => "neutral",
        }
    }

    /// Mood leaks into fresh perception valence: `v += 0.2 * mood.valence`.
    #[must_use]
    pub fn influences_perception(&self, base_valence: f64) -> f64 {
        (base_valence + MOOD_PERCEPTION_INFLUENCE * self.valence).clamp(-1.0, 1.0)
    }
}

/// Bundles an agent's active emotions and mood, and hosts appraisal plus the
/// downstream modifier functions of §A.4.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    emotions: Vec<Emotion>,
    /// The agent's current mood.
    pub mood: Mood,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            emotions: Vec::new(),
            mood: Mood::default(),
        }
    }
}

impl EmotionalState {
    /// A fresh, neutral emotional state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decay every tracked emotion and update mood; prune inactive emotions
    /// that have also fully decayed to zero.
    pub fn update(&mut self, dt_hours: f64) {
        for emotion in &mut self.emotions {
            emotion.update(dt_hours);
        }
        self.mood.update_from_emotions(&self.emotions, dt_hours);
        self.emotions.retain(|emotion| emotion.intensity > 0.0);
    }

    /// Trigger (or intensify, if already present) an emotion of the given
    /// kind.
    pub fn trigger(&mut self, kind: EmotionKind, amount: f64, trigger: impl Into<String>, now: f64) {
        let trigger = trigger.into();
        if let Some(existing) = self.emotions.iter_mut().find(|emotion| emotion.kind == kind) {
            existing.intensify(amount, trigger, now);
        } else {
            self.emotions.push(Emotion::new(kind, amount, trigger, now));
        }
    }

    /// All tracked emotions, active or not.
    #[must_use]
    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// The currently active emotion with the highest intensity, if any.
    #[must_use]
    pub fn get_dominant_emotion(&self) -> Option<&Emotion> {
        self.emotions
            .iter()
            .filter(|emotion| emotion.is_active())
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
    }

    /// Appraise an event tuple into emotion triggers via the fixed OCC-style
    /// table (§A.4.3), scaled by `emotion_multiplier` if the caller's
    /// personality supplies one.
    pub fn appraise_event(
        &mut self,
        outcome: Outcome,
        unexpectedness: f64,
        personal_relevance: f64,
        multiplier: impl Fn(EmotionKind) -> f64,
        trigger: impl Into<String>,
        now: f64,
    ) {
        let trigger = trigger.into();
        let base_intensity = (0.3 + 0.7 * personal_relevance.clamp(0.0, 1.0)).clamp(0.0, 1.0);
        match outcome {
            Outcome::Positive => {
                let amount = base_intensity * multiplier(EmotionKind::Joy);
                self.trigger(EmotionKind::Joy, amount, trigger.clone(), now);
            }
            Outcome::Negative => {
                let amount = base_intensity * multiplier(EmotionKind::Sadness);
                self.trigger(EmotionKind::Sadness, amount, trigger.clone(), now);
            }
        }
        if unexpectedness > 0.5 {
            let amount = (unexpectedness * multiplier(EmotionKind::Surprise)).clamp(0.0, 1.0);
            self.trigger(EmotionKind::Surprise, amount, trigger, now);
        }
    }

    /// Risk-tolerance modifier: base `1.0`, FEAR subtracts up to `0.3`,
    /// ANXIETY up to `0.2`, ANGER adds up to `0.2`, JOY adds up to `0.15`;
    /// clamped to `[0.5, 1.5]`.
    #[must_use]
    pub fn influences_risk_tolerance(&self) -> f64 {
        let mut modifier: f64 = 1.0;
        for emotion in self.emotions.iter().filter(|emotion| emotion.is_active()) {
            modifier += match emotion.kind {
                EmotionKind::Fear => -0.3 * emotion.intensity,
                EmotionKind::Anxiety => -0.2 * emotion.intensity,
                EmotionKind::Anger => 0.2 * emotion.intensity,
                EmotionKind::Joy => 0.15 * emotion.intensity,
                _ => 0.0,
            };
        }
        modifier.clamp(0.5, 1.5)
    }

    /// Social behavior modifiers derived from active emotions.
    #[must_use]
    pub fn influences_social_behavior(&self) -> SocialModifiers {
        let mut modifiers = SocialModifiers::default();
        for emotion in self.emotions.iter().filter(|emotion| emotion.is_active()) {
            match emotion.kind {
                EmotionKind::Joy | EmotionKind::Gratitude => {
                    modifiers.friendliness += 0.2 * emotion.intensity;
                }
                EmotionKind::Anger | EmotionKind::Disgust => {
                    modifiers.friendliness -= 0.3 * emotion.intensity;
                }
                EmotionKind::Trust => modifiers.trust += 0.3 * emotion.intensity,
                EmotionKind::Fear | EmotionKind::Anxiety => {
                    modifiers.openness -= 0.2 * emotion.intensity;
                }
                _ => {}
            }
        }
        modifiers.clamp();
        modifiers
    }
}

/// Coarse outcome valence fed into [`EmotionalState::appraise_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Outcome favored the agent.
    Positive,
    /// Outcome disfavored the agent.
    Negative,
}

/// Friendliness/openness/trust deltas derived from active emotions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialModifiers {
    /// Delta to apply to outgoing friendliness.
    pub friendliness: f64,
    /// Delta to apply to openness toward new information/relationships.
    pub openness: f64,
    /// Delta to apply to baseline trust extended to others.
    pub trust: f64,
}

impl SocialModifiers {
    fn clamp(&mut self) {
        self.friendliness = self.friendliness.clamp(-1.0, 1.0);
        self.openness = self.openness.clamp(-1.0, 1.0);
        self.trust = self.trust.clamp(-1.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_becomes_inactive_below_threshold() {
        let mut emotion = Emotion::new(EmotionKind::Joy, 0.15, "test", 0.0);
        emotion.diminish(0.1);
        assert!(!emotion.is_active());
    }

    #[test]
    fn decay_with_zero_dt_is_a_no_op() {
        let mut emotion = Emotion::new(EmotionKind::Joy, 0.5, "test", 0.0);
        emotion.update(0.0);
        assert_eq!(emotion.intensity, 0.5);
    }

    #[test]
    fn appraisal_roundtrip_matches_invariant_seven() {
        let mut state = EmotionalState::new();
        state.appraise_event(Outcome::Positive, 0.0, 0.8, |_| 1.0, "good news", 0.0);
        let joy = state
            .emotions()
            .iter()
            .find(|emotion| emotion.kind == EmotionKind::Joy)
            .expect("joy should have been triggered");
        assert!(joy.intensity >= 0.3 && joy.intensity <= 0.3 + 0.7 * 0.8);
    }

    #[test]
    fn risk_tolerance_modifier_stays_in_bounds() {
        let mut state = EmotionalState::new();
        state.trigger(EmotionKind::Fear, 1.0, "threat", 0.0);
        let modifier = state.influences_risk_tolerance();
        assert!((0.5..=1.5).contains(&modifier));
    }

    #[test]
    fn mood_tracks_toward_target_over_time() {
        let mut mood = Mood::default();
        let emotions = vec![Emotion::new(EmotionKind::Joy, 1.0, "test", 0.0)];
        mood.update_from_emotions(&emotions, 1.0);
        assert!(mood.valence > 0.0);
    }

    #[test]
    fn perception_influence_applies_mood_constant() {
        let mood = Mood {
            valence: 1.0,
            arousal: 0.0,
            change_rate: 0.1,
        };
        assert!((mood.influences_perception(0.0) - 0.2).abs() < 1e-9);
    }
}
