//! The `GroupModel` trait — the host simulator's view of a group model.

use std::collections::{BTreeMap, BTreeSet};

use sir_agent::{ElementEvent, Pedestrian, Topography};
use sir_core::{AgentId, GroupId, SimRng, SourceId};

use crate::ModelResult;

/// A set of pedestrians managed together by a group model.
pub trait Group {
    fn id(&self) -> GroupId;

    /// Number of members.
    fn size(&self) -> usize;

    fn contains(&self, agent: AgentId) -> bool;

    /// Members in ascending ID order.
    fn members(&self) -> &BTreeSet<AgentId>;
}

/// Decides how large the next group spawned by a source should be.
pub trait GroupSizeDeterminator {
    fn next_group_size(&mut self) -> usize;
}

impl<F: FnMut() -> usize> GroupSizeDeterminator for F {
    fn next_group_size(&mut self) -> usize {
        self()
    }
}

/// Pluggable group model driven by the host simulator.
///
/// # Lifecycle
///
/// ```text
/// initialize ─► pre_loop ─► (events + update)* ─► post_loop
/// ```
///
/// `pre_loop` registers the model as the topography's added/removed listener
/// and `post_loop` deregisters it.  Between the two, the host drains the
/// topography's event queue into [`handle_event`](Self::handle_event) before
/// every [`update`](Self::update), so the model always sees a pedestrian's
/// arrival before it sees the pedestrian in an update.
pub trait GroupModel {
    /// Model-specific attribute block read at initialisation.
    type Attributes;

    type Group: Group;

    /// One-time setup.  Takes ownership of the run's random stream.
    fn initialize(
        &mut self,
        attributes: Self::Attributes,
        topography: &Topography,
        rng:        SimRng,
    ) -> ModelResult<()>;

    fn pre_loop(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()>;

    fn post_loop(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()>;

    /// Advance the model to `sim_time_secs`.
    fn update(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()>;

    fn element_added(&mut self, pedestrian: &Pedestrian) -> ModelResult<()>;

    fn element_removed(&mut self, pedestrian: &Pedestrian) -> ModelResult<()>;

    /// The group `agent` currently belongs to.
    fn get_group(&self, agent: AgentId) -> ModelResult<&Self::Group>;

    fn groups_by_id(&self) -> &BTreeMap<GroupId, Self::Group>;

    fn register_group_size_determinator(
        &mut self,
        source:       SourceId,
        determinator: Box<dyn GroupSizeDeterminator>,
    );

    /// Size of the next group `source` should spawn.
    fn next_group_for_source(&mut self, source: SourceId) -> usize;

    /// Route a queued topography event to the matching listener method.
    fn handle_event(&mut self, event: &ElementEvent) -> ModelResult<()> {
        match event {
            ElementEvent::Added(p) => self.element_added(p),
            ElementEvent::Removed(p) => self.element_removed(p),
        }
    }
}
