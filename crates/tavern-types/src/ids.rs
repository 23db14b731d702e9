//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity addressed across crate boundaries gets a strongly-typed id
//! so the compiler catches accidental mixing (an agent id passed where a
//! goal id is expected, etc). IDs use UUID v7 (time-ordered) so that sorting
//! by id also sorts by creation order, which the kernel relies on for
//! deterministic tie-breaking (§A.4.1's "prefer earlier `created_at`" reads
//! as "prefer the lexicographically smaller id" wherever ids are v7).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent.
    AgentId
}

define_id! {
    /// Unique identifier for a goal in an agent's goal hierarchy.
    GoalId
}

define_id! {
    /// Unique identifier for a plan bound to a goal.
    PlanId
}

define_id! {
    /// Unique identifier for a conversation between agents.
    ConversationId
}

define_id! {
    /// Unique identifier for an action requested of the world.
    ActionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let agent = AgentId::new();
        let goal = GoalId::new();
        // Different types -- the compiler enforces no mixing.
        assert_ne!(agent.into_inner(), Uuid::nil());
        assert_ne!(goal.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = AgentId::new();
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: AgentId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(original, restored);
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = AgentId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn ids_sort_in_creation_order() {
        let first = AgentId::new();
        let second = AgentId::new();
        assert!(first < second, "UUIDv7 ids should sort by creation time");
    }
}
