//! Element change notifications delivered to registered listeners.

use sir_core::AgentId;

use crate::Pedestrian;

/// What a listener can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// A pedestrian entered the topography.
    Added,
    /// A pedestrian left the topography.
    Removed,
}

/// A queued change to the topography's pedestrian set.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementEvent {
    /// A pedestrian entered; its state at insertion travels with the event.
    Added(Pedestrian),

    /// The pedestrian is gone from the topography; its final state travels
    /// with the event.
    Removed(Pedestrian),
}

impl ElementEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            ElementEvent::Added(_) => ListenerKind::Added,
            ElementEvent::Removed(_) => ListenerKind::Removed,
        }
    }

    pub fn agent(&self) -> AgentId {
        match self {
            ElementEvent::Added(p) | ElementEvent::Removed(p) => p.id,
        }
    }
}
