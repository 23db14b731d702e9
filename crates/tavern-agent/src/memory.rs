//! Episodic and semantic memory.
//!
//! Implements the memory system of §A.4.5: an episodic ring bounded by
//! capacity, evicted by lowest accessibility, and a semantic key-value store
//! overwritten by topic.
//!
//! ## Accessibility
//!
//! [`Memory::accessibility`] combines importance, recency (exponential decay
//! with a configurable half-life), emotional intensity, and access count
//! into a single `[0, 1]` score that governs both recall ordering and
//! eviction.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the episodic memory ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Maximum number of episodic memories retained (default 1000).
    pub capacity: usize,
    /// Half-life, in game hours, governing recency decay (default 24.0).
    pub half_life_hours: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            half_life_hours: 24.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Memory entry
// ---------------------------------------------------------------------------

/// A single episodic or semantic memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// Stable id derived from content and timestamp at creation.
    pub id: u64,
    /// Free-text content.
    pub content: String,
    /// Absolute game time this memory was formed.
    pub timestamp: f64,
    /// Where this memory was formed, if known.
    pub location: Option<String>,
    /// Agent ids present when this memory was formed.
    pub participants: Vec<String>,
    /// Emotional valence at formation time, in `[-1, 1]`.
    pub emotional_valence: f64,
    /// Emotional intensity at formation time, in `[0, 1]`.
    pub emotional_intensity: f64,
    /// Importance, in `[0, 1]`. For semantic memories this is confidence.
    pub importance: f64,
    /// Number of times this memory has been recalled.
    pub access_count: u32,
    /// Absolute game time this memory was last recalled.
    pub last_accessed: f64,
}

impl Memory {
    /// Construct a new memory with `access_count = 0` and
    /// `last_accessed = timestamp`.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        timestamp: f64,
        location: Option<String>,
        participants: Vec<String>,
        emotional_valence: f64,
        emotional_intensity: f64,
        importance: f64,
    ) -> Self {
        let content = content.into();
        let id = stable_id(&content, timestamp);
        Self {
            id,
            content,
            timestamp,
            location,
            participants,
            emotional_valence: emotional_valence.clamp(-1.0, 1.0),
            emotional_intensity: emotional_intensity.clamp(0.0, 1.0),
            importance: importance.clamp(0.0, 1.0),
            access_count: 0,
            last_accessed: timestamp,
        }
    }

    /// Composite accessibility score governing recall order and eviction.
    ///
    /// `0.4*importance + 0.3*recency + 0.2*emotional_intensity +
    /// 0.1*min(1, access_count/10)`, where
    /// `recency = 0.5^((now - last_accessed) / half_life_hours)`.
    #[must_use]
    pub fn accessibility(&self, now: f64, half_life_hours: f64) -> f64 {
        let elapsed = (now - self.last_accessed).max(0.0);
        let recency = if half_life_hours <= 0.0 {
            0.0
        } else {
            0.5_f64.powf(elapsed / half_life_hours)
        };
        let access_term = (f64::from(self.access_count) / 10.0).min(1.0);
        0.4 * self.importance + 0.3 * recency + 0.2 * self.emotional_intensity + 0.1 * access_term
    }

    /// Touch this memory: bump access count, set `last_accessed`, and nudge
    /// importance up slightly.
    pub fn touch(&mut self, now: f64) {
        self.last_accessed = now;
        self.access_count += 1;
        self.importance = (self.importance + 0.01).min(1.0);
    }
}

/// A deterministic id derived from content and timestamp, matching
/// `hash(content || timestamp)` from §A.4.5.
#[must_use]
fn stable_id(content: &str, timestamp: f64) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    content.hash(&mut hasher);
    timestamp.to_bits().hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Episodic memory
// ---------------------------------------------------------------------------

/// The bounded episodic memory ring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodicMemory {
    memories: Vec<Memory>,
    config: MemoryConfigStored,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct MemoryConfigStored {
    capacity: usize,
    half_life_hours: f64,
}

impl Default for MemoryConfigStored {
    fn default() -> Self {
        let config = MemoryConfig::default();
        Self {
            capacity: config.capacity,
            half_life_hours: config.half_life_hours,
        }
    }
}

impl EpisodicMemory {
    /// An empty ring using the given configuration.
    #[must_use]
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            memories: Vec::new(),
            config: MemoryConfigStored {
                capacity: config.capacity,
                half_life_hours: config.half_life_hours,
            },
        }
    }

    /// Number of memories currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memories.len()
    }

    /// Whether the ring currently holds no memories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Add a memory, evicting the lowest-accessibility entry if this would
    /// exceed capacity. Ties broken by earlier `last_accessed` (the later
    /// one wins, per the boundary behavior in §A.8).
    pub fn add(&mut self, memory: Memory, now: f64) {
        self.memories.push(memory);
        if self.memories.len() > self.config.capacity {
            self.evict_to_capacity(now);
        }
    }

    fn evict_to_capacity(&mut self, now: f64) {
        let half_life = self.config.half_life_hours;
        let capacity = self.config.capacity;
        self.memories.sort_by(|a, b| {
            let score_a = a.accessibility(now, half_life);
            let score_b = b.accessibility(now, half_life);
            score_b
                .total_cmp(&score_a)
                .then_with(|| b.last_accessed.total_cmp(&a.last_accessed))
        });
        self.memories.truncate(capacity);
    }

    /// Recall memories from the last `hours` of game time, most accessible
    /// first, capped at `limit`. Touches every returned memory.
    pub fn recall_recent(&mut self, now: f64, hours: f64, limit: usize) -> Vec<Memory> {
        let cutoff = now - hours;
        let half_life = self.config.half_life_hours;
        let ranked = self.rank_by(limit, |memory| memory.timestamp >= cutoff, |memory| {
            memory.accessibility(now, half_life)
        });
        self.touch_and_collect(ranked, now)
    }

    /// Recall memories mentioning `subject` as a case-insensitive substring
    /// of content, participants, or location. Touches every returned memory.
    pub fn recall_about(&mut self, subject: &str, now: f64, limit: usize) -> Vec<Memory> {
        let needle = subject.to_lowercase();
        let half_life = self.config.half_life_hours;
        let ranked = self.rank_by(
            limit,
            |memory| memory_mentions(memory, &needle),
            |memory| memory.accessibility(now, half_life),
        );
        self.touch_and_collect(ranked, now)
    }

    /// Recall memories by emotional intensity, optionally filtered by
    /// valence sign, sorted by `intensity * accessibility` descending.
    /// Touches every returned memory.
    pub fn recall_emotional(
        &mut self,
        now: f64,
        valence_sign: Option<bool>,
        min_intensity: f64,
        limit: usize,
    ) -> Vec<Memory> {
        let half_life = self.config.half_life_hours;
        let ranked = self.rank_by(
            limit,
            |memory| {
                memory.emotional_intensity >= min_intensity
                    && valence_sign
                        .map_or(true, |positive| (memory.emotional_valence >= 0.0) == positive)
            },
            |memory| memory.emotional_intensity * memory.accessibility(now, half_life),
        );
        self.touch_and_collect(ranked, now)
    }

    /// Collect the indices of memories matching `keep`, ranked descending by
    /// `score`, capped at `limit`.
    fn rank_by(
        &self,
        limit: usize,
        keep: impl Fn(&Memory) -> bool,
        score: impl Fn(&Memory) -> f64,
    ) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = self
            .memories
            .iter()
            .enumerate()
            .filter(|(_, memory)| keep(memory))
            .map(|(index, memory)| (index, score(memory)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);
        scored.into_iter().map(|(index, _)| index).collect()
    }

    fn touch_and_collect(&mut self, indices: Vec<usize>, now: f64) -> Vec<Memory> {
        let mut result = Vec::with_capacity(indices.len());
        for index in indices {
            if let Some(memory) = self.memories.get_mut(index) {
                memory.touch(now);
                result.push(memory.clone());
            }
        }
        result
    }

    /// All memories, without touching any of them. Intended for tests and
    /// introspection.
    #[must_use]
    pub fn all(&self) -> &[Memory] {
        &self.memories
    }
}

fn memory_mentions(memory: &Memory, needle: &str) -> bool {
    if memory.content.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(location) = &memory.location {
        if location.to_lowercase().contains(needle) {
            return true;
        }
    }
    memory.participants.iter().any(|participant| participant.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Semantic memory
// ---------------------------------------------------------------------------

/// A topic-keyed semantic memory store; writes overwrite by topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticMemory {
    facts: std::collections::HashMap<String, Memory>,
}

impl SemanticMemory {
    /// An empty semantic store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (overwriting any existing entry for this topic) a fact.
    pub fn set(&mut self, topic: impl Into<String>, content: impl Into<String>, confidence: f64, now: f64) {
        let topic = topic.into();
        let memory = Memory::new(content, now, None, Vec::new(), 0.0, 0.0, confidence);
        self.facts.insert(topic, memory);
    }

    /// Look up a fact by topic.
    #[must_use]
    pub fn get(&self, topic: &str) -> Option<&Memory> {
        self.facts.get(topic)
    }

    /// Number of distinct topics tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the store currently holds no facts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(importance: f64, now: f64, last_accessed: f64) -> Memory {
        let mut memory = Memory::new("an event happened", now, None, Vec::new(), 0.0, 0.0, importance);
        memory.last_accessed = last_accessed;
        memory
    }

    #[test]
    fn accessibility_decays_with_recency() {
        let memory = memory_with(0.5, 0.0, 0.0);
        let fresh = memory.accessibility(0.0, 24.0);
        let stale = memory.accessibility(48.0, 24.0);
        assert!(fresh > stale);
    }

    #[test]
    fn touch_bumps_access_count_and_importance() {
        let mut memory = memory_with(0.5, 0.0, 0.0);
        memory.touch(1.0);
        assert_eq!(memory.access_count, 1);
        assert!((memory.importance - 0.51).abs() < 1e-9);
        assert_eq!(memory.last_accessed, 1.0);
    }

    #[test]
    fn s6_eviction_keeps_top_accessibility() {
        let mut ring = EpisodicMemory::new(MemoryConfig {
            capacity: 3,
            half_life_hours: 24.0,
        });
        for importance in [0.9, 0.5, 0.5, 0.1] {
            ring.add(Memory::new("event", 0.0, None, Vec::new(), 0.0, 0.0, importance), 0.0);
        }
        assert_eq!(ring.len(), 3);
        assert!(ring.all().iter().all(|memory| memory.importance > 0.1));
    }

    #[test]
    fn recall_about_is_idempotent_up_to_ties() {
        let mut ring = EpisodicMemory::new(MemoryConfig::default());
        ring.add(Memory::new("met the blacksmith", 0.0, None, Vec::new(), 0.0, 0.0, 0.5), 0.0);
        ring.add(Memory::new("bought bread", 1.0, None, Vec::new(), 0.0, 0.0, 0.5), 1.0);
        let first = ring.recall_about("blacksmith", 2.0, 5);
        let second = ring.recall_about("blacksmith", 2.0, 5);
        let first_ids: Vec<u64> = first.iter().map(|memory| memory.id).collect();
        let second_ids: Vec<u64> = second.iter().map(|memory| memory.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn recall_recent_filters_by_timestamp() {
        let mut ring = EpisodicMemory::new(MemoryConfig::default());
        ring.add(Memory::new("old event", 0.0, None, Vec::new(), 0.0, 0.0, 0.5), 0.0);
        ring.add(Memory::new("new event", 100.0, None, Vec::new(), 0.0, 0.0, 0.5), 100.0);
        let recalled = ring.recall_recent(100.0, 10.0, 10);
        assert_eq!(recalled.len(), 1);
        assert_eq!(recalled[0].content, "new event");
    }

    #[test]
    fn recall_emotional_filters_by_valence_sign() {
        let mut ring = EpisodicMemory::new(MemoryConfig::default());
        ring.add(Memory::new("happy event", 0.0, None, Vec::new(), 0.8, 0.7, 0.5), 0.0);
        ring.add(Memory::new("sad event", 0.0, None, Vec::new(), -0.8, 0.7, 0.5), 0.0);
        let positive = ring.recall_emotional(0.0, Some(true), 0.1, 10);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].content, "happy event");
    }

    #[test]
    fn semantic_memory_overwrites_by_topic() {
        let mut semantic = SemanticMemory::new();
        semantic.set("bakery", "sells bread", 0.5, 0.0);
        semantic.set("bakery", "sells bread and pies", 0.9, 1.0);
        assert_eq!(semantic.len(), 1);
        assert_eq!(semantic.get("bakery").expect("fact exists").content, "sells bread and pies");
    }
}
