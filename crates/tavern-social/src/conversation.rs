//! Multi-turn conversations: content-heuristic depth/tension/intimacy
//! tracking and the relationship deltas a conversation's end applies.
//!
//! Grounded on `emergence-agents/src/social.rs`'s interaction logging,
//! extended with the turn-by-turn heuristics §A.4.8 specifies.

use serde::{Deserialize, Serialize};
use tavern_types::{AgentId, ConversationId, ConversationQuality};

const DEEPENING_WORDS: [&str; 5] = ["secret", "truth", "feel", "fear", "hope"];
const CONFLICT_WORDS: [&str; 4] = ["angry", "disagree", "wrong", "lie"];

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Who spoke.
    pub speaker: AgentId,
    /// What was said.
    pub content: String,
    /// Free-text tone descriptor (e.g. `"warm"`, `"curt"`).
    pub tone: String,
    /// Absolute game time of this turn.
    pub ts: f64,
}

/// A multi-turn exchange between two or more agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Stable identifier.
    pub conversation_id: ConversationId,
    /// Who is party to this conversation.
    pub participants: Vec<AgentId>,
    /// Free-text subject.
    pub topic: String,
    /// Turns taken so far, in order.
    pub exchanges: Vec<Exchange>,
    /// Absolute game time this conversation began.
    pub started_at: f64,
    /// Absolute game time this conversation ended, if it has.
    pub ended_at: Option<f64>,
    /// Whether this conversation is still accepting exchanges.
    pub is_active: bool,
    /// Accumulated depth, in `[0, 1]`.
    pub depth: f64,
    /// Accumulated tension, in `[0, 1]`.
    pub tension: f64,
    /// Accumulated intimacy, in `[0, 1]`.
    pub intimacy: f64,
}

impl Conversation {
    /// Start a new, active conversation.
    #[must_use]
    pub fn start(participants: Vec<AgentId>, topic: impl Into<String>, now: f64) -> Self {
        Self {
            conversation_id: ConversationId::new(),
            participants,
            topic: topic.into(),
            exchanges: Vec::new(),
            started_at: now,
            ended_at: None,
            is_active: true,
            depth: 0.0,
            tension: 0.0,
            intimacy: 0.0,
        }
    }

    /// Append a turn and apply the fixed content-heuristic deltas of §A.4.8.
    /// A no-op (aside from recording the turn) once the conversation has
    /// ended.
    pub fn exchange(&mut self, speaker: AgentId, content: impl Into<String>, tone: impl Into<String>, now: f64) {
        let content = content.into();
        let lowered = content.to_lowercase();
        if DEEPENING_WORDS.iter().any(|word| lowered.contains(word)) {
            self.depth = (self.depth + 0.1).min(1.0);
            self.intimacy = (self.intimacy + 0.1).min(1.0);
        }
        if CONFLICT_WORDS.iter().any(|word| lowered.contains(word)) {
            self.tension = (self.tension + 0.15).min(1.0);
        }
        self.exchanges.push(Exchange {
            speaker,
            content,
            tone: tone.into(),
            ts: now,
        });
    }

    /// Classify quality from the accumulated depth/tension, per §A.4.8.
    #[must_use]
    pub fn classify_quality(&self) -> ConversationQuality {
        if self.tension > 0.6 {
            ConversationQuality::Negative
        } else if self.tension < 0.3 && self.depth > 0.5 {
            ConversationQuality::Positive
        } else {
            ConversationQuality::Neutral
        }
    }

    /// End the conversation, returning the quality it classified to.
    pub fn end(&mut self, now: f64) -> ConversationQuality {
        self.is_active = false;
        self.ended_at = Some(now);
        self.classify_quality()
    }

    /// Whether this conversation's topic suggests a secret was shared,
    /// per §C.5.
    #[must_use]
    pub fn topic_mentions_secret(&self) -> bool {
        self.topic.to_lowercase().contains("secret")
    }
}

/// Result of ending a conversation, carrying everything a caller needs to
/// apply relationship deltas and theory-of-mind updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationOutcome {
    /// Who took part.
    pub participants: Vec<AgentId>,
    /// How the conversation classified.
    pub quality: ConversationQuality,
    /// Final depth reached.
    pub depth: f64,
    /// Whether a secret-sharing summary should be recorded for every pair.
    pub shared_secret: bool,
}

/// Owns every conversation that has ever taken place, active or archived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationStore {
    conversations: std::collections::HashMap<ConversationId, Conversation>,
}

impl ConversationStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new conversation and return its id.
    pub fn start(&mut self, participants: Vec<AgentId>, topic: impl Into<String>, now: f64) -> ConversationId {
        let conversation = Conversation::start(participants, topic, now);
        let id = conversation.conversation_id;
        self.conversations.insert(id, conversation);
        id
    }

    /// Mutable access to a conversation by id.
    pub fn get_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.conversations.get_mut(&id)
    }

    /// Read-only access to a conversation by id.
    #[must_use]
    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.get(&id)
    }

    /// End a conversation and return the outcome a caller should apply to
    /// the social graph and participants' theory-of-mind models.
    pub fn end(&mut self, id: ConversationId, now: f64) -> Option<ConversationOutcome> {
        let conversation = self.conversations.get_mut(&id)?;
        let quality = conversation.end(now);
        Some(ConversationOutcome {
            participants: conversation.participants.clone(),
            quality,
            depth: conversation.depth,
            shared_secret: conversation.topic_mentions_secret(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_conversation_deepens_friendship() {
        let mut conversation = Conversation::start(vec![AgentId::new(), AgentId::new()], "feelings", 0.0);
        let speaker = conversation.participants[0];
        for _ in 0..6 {
            conversation.exchange(speaker, "I feel hope about this", "warm", 0.0);
        }
        assert!(conversation.depth >= 0.6);
        assert_eq!(conversation.tension, 0.0);
        let quality = conversation.end(1.0);
        assert_eq!(quality, ConversationQuality::Positive);
    }

    #[test]
    fn conflict_words_raise_tension_to_negative() {
        let mut conversation = Conversation::start(vec![AgentId::new(), AgentId::new()], "dispute", 0.0);
        let speaker = conversation.participants[0];
        for _ in 0..5 {
            conversation.exchange(speaker, "you are wrong and I am angry", "sharp", 0.0);
        }
        assert_eq!(conversation.end(1.0), ConversationQuality::Negative);
    }

    #[test]
    fn secret_topic_is_detected() {
        let conversation = Conversation::start(vec![AgentId::new()], "a dark secret", 0.0);
        assert!(conversation.topic_mentions_secret());
    }

    #[test]
    fn store_round_trips_start_exchange_end() {
        let mut store = ConversationStore::new();
        let a = AgentId::new();
        let b = AgentId::new();
        let id = store.start(vec![a, b], "weather", 0.0);
        store.get_mut(id).expect("exists").exchange(a, "hope it's sunny", "light", 1.0);
        let outcome = store.end(id, 2.0).expect("conversation existed");
        assert_eq!(outcome.participants, vec![a, b]);
    }
}
