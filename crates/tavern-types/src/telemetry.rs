//! The non-propagating error channel of §A.7.
//!
//! Four conditions never surface as a `Result::Err` from inside the kernel
//! cycle: an out-of-range scalar after a mutation, a reference to an
//! unknown agent/goal/subject, a goal transition that violates the state
//! machine, and an agent with nothing to do. Each is instead recorded here
//! so tests (and, optionally, logs) can observe it without the kernel's
//! public contract becoming fallible.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// One of the four non-propagating error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryKind {
    /// A scalar escaped its declared range after a public mutation.
    InvariantViolation,
    /// An operation named an id or subject that does not exist.
    UnknownReference,
    /// A state transition was rejected by the governing state machine.
    ConflictingUpdate,
    /// An agent had no open goals and no urgent needs.
    Starvation,
}

/// A single recorded telemetry event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// The subsystem that raised this event (e.g. `"goals"`, `"memory"`).
    pub component: &'static str,
    /// Which of the four kinds this event represents.
    pub kind: TelemetryKind,
    /// A short, human-readable detail string.
    pub detail: String,
}

/// An append-only log of [`TelemetryEvent`]s, owned by the [`World`](crate)
/// for the lifetime of the simulation.
///
/// Interior mutability via a `Mutex` lets subsystems record events through a
/// shared reference, matching how the rest of the shared social state
/// (§A.5) is accessed.
#[derive(Debug, Default)]
pub struct TelemetryChannel {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl TelemetryChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn record(&self, component: &'static str, kind: TelemetryKind, detail: impl Into<String>) {
        let event = TelemetryEvent {
            component,
            kind,
            detail: detail.into(),
        };
        match kind {
            TelemetryKind::InvariantViolation | TelemetryKind::ConflictingUpdate => {
                tracing::warn!(component, detail = %event.detail, kind = ?kind, "telemetry");
            }
            TelemetryKind::UnknownReference | TelemetryKind::Starvation => {
                tracing::debug!(component, detail = %event.detail, kind = ?kind, "telemetry");
            }
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Drain all recorded events, leaving the channel empty. Intended for
    /// test assertions.
    #[must_use]
    pub fn drain(&self) -> Vec<TelemetryEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |mut events| std::mem::take(&mut events))
    }

    /// The number of events currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map_or(0, |events| events.len())
    }

    /// Whether the channel currently holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_drains() {
        let channel = TelemetryChannel::new();
        channel.record("goals", TelemetryKind::Starvation, "no open goals");
        assert_eq!(channel.len(), 1);
        let drained = channel.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, TelemetryKind::Starvation);
        assert!(channel.is_empty());
    }
}
