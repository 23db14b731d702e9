//! Tagged-variant kinds shared across the cognitive core.
//!
//! The source this crate is modeled on uses class hierarchies and duck
//! typing to distinguish need/emotion/goal variants. In Rust that collapses
//! to plain enums with per-variant lookup tables kept next to the type that
//! consumes them (decay rates in `tavern-agent::needs`, mood contributions in
//! `tavern-agent::emotions`, and so on) rather than virtual methods.

use serde::{Deserialize, Serialize};

/// Categories of physiological and psychological need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NeedKind {
    /// Physiological: hunger for food.
    Hunger,
    /// Physiological: thirst for drink.
    Thirst,
    /// Physiological: need for sleep/rest.
    Rest,
    /// Physiological: freedom from physical threat.
    Safety,
    /// Physiological: bodily wellness.
    Health,
    /// Psychological: social connection.
    Belonging,
    /// Psychological: accomplishing goals.
    Achievement,
    /// Psychological: self-determination.
    Autonomy,
    /// Psychological: feeling capable.
    Competence,
    /// Psychological: learning and novelty.
    Curiosity,
    /// Social: being valued by others.
    Respect,
    /// Social: close relationships.
    Intimacy,
    /// Social: meaningful existence.
    Purpose,
}

impl NeedKind {
    /// All need kinds, in a fixed, stable order.
    pub const ALL: [Self; 13] = [
        Self::Hunger,
        Self::Thirst,
        Self::Rest,
        Self::Safety,
        Self::Health,
        Self::Belonging,
        Self::Achievement,
        Self::Autonomy,
        Self::Competence,
        Self::Curiosity,
        Self::Respect,
        Self::Intimacy,
        Self::Purpose,
    ];

    /// Lowercase identifier used in goal descriptions and test fixtures.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hunger => "hunger",
            Self::Thirst => "thirst",
            Self::Rest => "rest",
            Self::Safety => "safety",
            Self::Health => "health",
            Self::Belonging => "belonging",
            Self::Achievement => "achievement",
            Self::Autonomy => "autonomy",
            Self::Competence => "competence",
            Self::Curiosity => "curiosity",
            Self::Respect => "respect",
            Self::Intimacy => "intimacy",
            Self::Purpose => "purpose",
        }
    }
}

/// Plutchik primary emotions plus the derived secondary emotions the
/// kernel's appraisal and mood tables reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmotionKind {
    /// Primary: positive outcome.
    Joy,
    /// Primary: confidence in another.
    Trust,
    /// Primary: anticipated harm.
    Fear,
    /// Primary: unexpected event.
    Surprise,
    /// Primary: loss or negative outcome.
    Sadness,
    /// Primary: aversion.
    Disgust,
    /// Primary: blocked goal or violation.
    Anger,
    /// Primary: expectation of a future event.
    Anticipation,
    /// Derived: fear + anticipation.
    Anxiety,
    /// Derived: anticipation + joy.
    Hope,
    /// Derived: sadness + fear.
    Despair,
    /// Derived: joy + anticipation.
    Pride,
    /// Derived: sadness + disgust.
    Shame,
    /// Derived: joy + trust.
    Gratitude,
    /// Derived: unmet belonging.
    Loneliness,
    /// Derived: prolonged sadness.
    Grief,
    /// Derived: blocked intention.
    Frustration,
    /// Derived: self-directed disgust.
    Guilt,
}

impl EmotionKind {
    /// All emotion kinds, in a fixed, stable order.
    pub const ALL: [Self; 18] = [
        Self::Joy,
        Self::Trust,
        Self::Fear,
        Self::Surprise,
        Self::Sadness,
        Self::Disgust,
        Self::Anger,
        Self::Anticipation,
        Self::Anxiety,
        Self::Hope,
        Self::Despair,
        Self::Pride,
        Self::Shame,
        Self::Gratitude,
        Self::Loneliness,
        Self::Grief,
        Self::Frustration,
        Self::Guilt,
    ];
}

/// Categories of belief content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BeliefKind {
    /// A claimed fact about the world.
    Fact,
    /// A probabilistic expectation.
    Probability,
    /// A personal preference.
    Preference,
    /// A claimed capability.
    Ability,
    /// A social norm.
    Norm,
    /// A belief about another agent's goal.
    GoalOfOther,
    /// A belief about another agent's trait.
    TraitOfOther,
}

/// Categories of goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    /// Maintain life and health.
    Survival,
    /// Accomplish something.
    Achievement,
    /// Keep something in a desired state.
    Maintenance,
    /// Relationship or social goal.
    Social,
    /// Learn or discover.
    Exploration,
    /// Prevent something.
    Avoidance,
}

/// The status of a goal in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Not yet pursued.
    Pending,
    /// Currently being pursued.
    Active,
    /// Successfully completed.
    Achieved,
    /// Could not be achieved.
    Failed,
    /// Given up on.
    Abandoned,
    /// Cannot be pursued right now.
    Blocked,
}

impl GoalStatus {
    /// A goal is "complete" once it has left the pending/active/blocked flow.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Achieved | Self::Failed | Self::Abandoned)
    }

    /// A goal is "open" while it is still pending or actively pursued.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Active | Self::Blocked)
    }
}

/// Derived classification of a dyadic relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// No meaningful familiarity yet.
    Stranger,
    /// Some familiarity, no strong feeling either way.
    Acquaintance,
    /// Positive affinity.
    Friend,
    /// Strong positive affinity and trust.
    Ally,
    /// Competitive but not hostile.
    Rival,
    /// Hostile.
    Enemy,
}

/// Aspects of reputation tracked per observer/subject pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReputationAspect {
    /// Can this agent be relied on to tell the truth and keep commitments.
    Trustworthiness,
    /// Willingness to give to others.
    Generosity,
    /// Skill in physical confrontation.
    CombatSkill,
    /// Skill in trade and commerce.
    BusinessAcumen,
    /// Charisma in social settings.
    SocialCharm,
    /// Consistency in following through.
    Reliability,
    /// Truthfulness.
    Honesty,
    /// Perceived material wealth.
    Wealth,
    /// Skill at resolving difficult situations.
    ProblemSolving,
    /// Deference to established authority.
    RespectForAuthority,
}

impl ReputationAspect {
    /// All reputation aspects, in a fixed, stable order.
    pub const ALL: [Self; 10] = [
        Self::Trustworthiness,
        Self::Generosity,
        Self::CombatSkill,
        Self::BusinessAcumen,
        Self::SocialCharm,
        Self::Reliability,
        Self::Honesty,
        Self::Wealth,
        Self::ProblemSolving,
        Self::RespectForAuthority,
    ];
}

/// The tag of a perception extracted from a [`crate::WorldSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerceptionKind {
    /// The agent's location changed since the last snapshot.
    LocationChange,
    /// Another agent is present at the agent's location.
    AgentPresent,
    /// A world event occurred.
    Event,
    /// An item's availability was reported.
    ItemAvailability,
}

/// Coarse classification of a completed conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConversationQuality {
    /// Low tension, meaningful depth.
    Positive,
    /// Neither clearly positive nor negative.
    Neutral,
    /// High tension.
    Negative,
}
