//! The `Topography`: scenario bounds plus the live pedestrian set.

use std::collections::BTreeMap;

use sir_core::{AgentId, CoreError, CoreResult, Point, Rect, SourceId};

use crate::{ElementEvent, ListenerKind, Pedestrian};

// ── TopographyAttributes ──────────────────────────────────────────────────────

/// Scenario-level settings that spatial consumers read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TopographyAttributes {
    /// Side length of a linked-cells bucket in metres.  Default: 0.5.
    pub bounding_box_width: f64,
}

impl Default for TopographyAttributes {
    fn default() -> Self {
        Self { bounding_box_width: 0.5 }
    }
}

// ── Topography ────────────────────────────────────────────────────────────────

/// Bounds, attributes and pedestrians of one scenario.
///
/// Pedestrians are keyed by `AgentId` and always iterate in ascending ID
/// order, so every pass a model makes over them is reproducible.  IDs are
/// handed out sequentially and never reused.
///
/// Create via [`TopographyBuilder`][crate::TopographyBuilder].
#[derive(Debug)]
pub struct Topography {
    bounds:      Rect,
    attributes:  TopographyAttributes,
    pedestrians: BTreeMap<AgentId, Pedestrian>,
    next_id:     u32,

    listen_added:   bool,
    listen_removed: bool,
    events:         Vec<ElementEvent>,
}

impl Topography {
    pub(crate) fn new(bounds: Rect, attributes: TopographyAttributes) -> Self {
        Self {
            bounds,
            attributes,
            pedestrians: BTreeMap::new(),
            next_id: 0,
            listen_added: false,
            listen_removed: false,
            events: Vec::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn attributes(&self) -> &TopographyAttributes {
        &self.attributes
    }

    /// Number of pedestrians currently present.
    pub fn len(&self) -> usize {
        self.pedestrians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pedestrians.is_empty()
    }

    // ── Pedestrian access ─────────────────────────────────────────────────

    pub fn pedestrian(&self, id: AgentId) -> Option<&Pedestrian> {
        self.pedestrians.get(&id)
    }

    pub fn pedestrian_mut(&mut self, id: AgentId) -> Option<&mut Pedestrian> {
        self.pedestrians.get_mut(&id)
    }

    /// All pedestrians in ascending `AgentId` order.
    pub fn pedestrians(&self) -> impl Iterator<Item = &Pedestrian> + '_ {
        self.pedestrians.values()
    }

    /// Mutable access to all pedestrians in ascending `AgentId` order.
    pub fn pedestrians_mut(&mut self) -> impl Iterator<Item = &mut Pedestrian> + '_ {
        self.pedestrians.values_mut()
    }

    /// All pedestrian IDs in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.pedestrians.keys().copied()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place a new scenario pedestrian at `position` and return its ID.
    pub fn add_pedestrian(&mut self, position: Point) -> AgentId {
        self.insert(Pedestrian::new(self.peek_id(), position))
    }

    /// Place a pedestrian spawned by `source`.
    pub fn spawn_pedestrian(&mut self, source: SourceId, position: Point) -> AgentId {
        self.insert(Pedestrian::new(self.peek_id(), position).with_source(source))
    }

    fn peek_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    fn insert(&mut self, pedestrian: Pedestrian) -> AgentId {
        let id = pedestrian.id;
        self.next_id += 1;
        if self.listen_added {
            self.events.push(ElementEvent::Added(pedestrian.clone()));
        }
        self.pedestrians.insert(id, pedestrian);
        id
    }

    /// Remove a pedestrian and return its final state.
    ///
    /// # Errors
    ///
    /// [`CoreError::AgentNotFound`] if no such pedestrian is present.
    pub fn remove_pedestrian(&mut self, id: AgentId) -> CoreResult<Pedestrian> {
        let pedestrian = self
            .pedestrians
            .remove(&id)
            .ok_or(CoreError::AgentNotFound(id))?;
        if self.listen_removed {
            self.events.push(ElementEvent::Removed(pedestrian.clone()));
        }
        Ok(pedestrian)
    }

    /// Move a pedestrian to `to`.
    ///
    /// # Errors
    ///
    /// [`CoreError::AgentNotFound`] if no such pedestrian is present.
    pub fn move_pedestrian(&mut self, id: AgentId, to: Point) -> CoreResult<()> {
        let pedestrian = self
            .pedestrians
            .get_mut(&id)
            .ok_or(CoreError::AgentNotFound(id))?;
        pedestrian.position = to;
        Ok(())
    }

    // ── Listeners ─────────────────────────────────────────────────────────

    /// Start queueing events of `kind`.
    ///
    /// Returns `false` (and changes nothing) if a listener for `kind` is
    /// already registered; each kind has at most one listener.
    pub fn register_listener(&mut self, kind: ListenerKind) -> bool {
        let slot = self.listener_slot(kind);
        !std::mem::replace(slot, true)
    }

    /// Stop queueing events of `kind` and drop any still pending.
    ///
    /// Returns `false` if no listener for `kind` was registered.
    pub fn deregister_listener(&mut self, kind: ListenerKind) -> bool {
        let was = std::mem::replace(self.listener_slot(kind), false);
        self.events.retain(|e| e.kind() != kind);
        was
    }

    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::Added => self.listen_added,
            ListenerKind::Removed => self.listen_removed,
        }
    }

    fn listener_slot(&mut self, kind: ListenerKind) -> &mut bool {
        match kind {
            ListenerKind::Added => &mut self.listen_added,
            ListenerKind::Removed => &mut self.listen_removed,
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
