//! The social graph, conversation store, and reputation network shared
//! across every agent in a world.
//!
//! Grounded on `emergence-agents/src/{social,reputation}.rs`, restructured
//! from per-agent owned views into the global shared-state shape the
//! snapshot-then-serial-commit concurrency policy requires: one
//! [`relationship::SocialGraph`], one [`conversation::ConversationStore`],
//! and one [`reputation::ReputationNetwork`] owned by the world.

#![forbid(unsafe_code)]

pub mod conversation;
pub mod relationship;
pub mod reputation;

pub use conversation::{Conversation, ConversationOutcome, ConversationStore, Exchange};
pub use relationship::{classify, observation_deltas, Relationship, SocialAnalysis, SocialGraph, RING_CAPACITY};
pub use reputation::{
    action_aspect_deltas, reputation_bucket, GossipEvent, NpcReputationProfile, ReputationNetwork,
    ReputationOpinion, WITNESS_CONFIDENCE_BOOST,
};
