//! `SirGroupModel` — the epidemic group model.
//!
//! # Tick algorithm
//!
//! Every call to [`update`](GroupModel::update) with a non-empty topography:
//!
//! 1. counts the tick towards the current interval;
//! 2. indexes the positions of all Infected pedestrians in the linked-cells
//!    grid;
//! 3. adds, for every Susceptible pedestrian, the number of infected
//!    neighbours within `infection_max_distance` to its exposure.
//!
//! Once at least [`INTERVAL_SECS`] have passed since the last interval
//! boundary, the interval closes:
//!
//! 4. **recovery pass**: each Infected pedestrian recovers with probability
//!    `recovery_rate`;
//! 5. **infection pass**: each Susceptible pedestrian runs
//!    `exposure / ticks_in_interval` Bernoulli trials with probability
//!    `infection_rate`, becoming Infected on the first success; its exposure
//!    is reset either way;
//! 6. the boundary moves to the current time.
//!
//! Steps 2–3 read compartments as they were when the tick began.  Both passes
//! visit pedestrians in ascending `AgentId` order and draw from the single
//! model-owned [`SimRng`], so a seed fixes the whole epidemic.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use sir_agent::{ListenerKind, Pedestrian, Topography};
use sir_core::{AgentId, GroupId, Point, SimRng, SourceId};
use sir_spatial::LinkedCellsGrid;
use tracing::{debug, info, warn};

use crate::{
    GroupModel, GroupRegistry, GroupSizeDeterminator, ModelError, ModelResult, SirGroup, SirParams,
    SirType, UNLIMITED,
};

/// Length of one infection/recovery interval in simulated seconds.
pub const INTERVAL_SECS: f64 = 1.0;

// ── Counters ──────────────────────────────────────────────────────────────────

/// Running compartment totals.
///
/// `susceptible + infected + recovered` always equals the number of
/// pedestrians the model tracks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SirCounts {
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,

    /// Pedestrians infected on arrival.  Never decremented: it measures
    /// progress towards `infections_at_start`.
    pub initially_infected: usize,
}

impl SirCounts {
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }

    fn slot(&mut self, kind: SirType) -> &mut usize {
        match kind {
            SirType::Susceptible => &mut self.susceptible,
            SirType::Infected => &mut self.infected,
            SirType::Recovered => &mut self.recovered,
        }
    }

    fn transfer(&mut self, from: SirType, to: SirType) {
        let src = self.slot(from);
        *src = src.saturating_sub(1);
        *self.slot(to) += 1;
    }
}

#[derive(Clone, Debug, Default)]
struct ModelState {
    counts:              SirCounts,
    last_interval_secs:  f64,
    updates_in_interval: u32,
}

// ── SirGroupModel ─────────────────────────────────────────────────────────────

/// Susceptible → Infected → Recovered group model.
///
/// Construct with [`SirGroupModel::new`], then drive it through the
/// [`GroupModel`] lifecycle.  Every method that needs randomness or the
/// spatial index returns [`ModelError::NotInitialized`] before
/// [`initialize`](GroupModel::initialize).
#[derive(Default)]
pub struct SirGroupModel {
    params:        SirParams,
    registry:      GroupRegistry,
    state:         ModelState,
    rng:           Option<SimRng>,
    grid:          Option<LinkedCellsGrid<AgentId>>,
    determinators: FxHashMap<SourceId, Box<dyn GroupSizeDeterminator>>,
}

impl SirGroupModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &SirParams {
        &self.params
    }

    /// Swap in new epidemic attributes mid-run.  Groups, counters and the
    /// current interval are kept; the next draw uses the new rates.
    pub fn set_params(&mut self, params: SirParams) -> ModelResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn counts(&self) -> SirCounts {
        self.state.counts
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Simulated time of the most recent interval boundary.
    pub fn last_interval_secs(&self) -> f64 {
        self.state.last_interval_secs
    }

    /// Ticks counted since the most recent interval boundary.
    pub fn updates_in_interval(&self) -> u32 {
        self.state.updates_in_interval
    }

    /// Compartment of `agent`.
    pub fn sir_type_of(&self, agent: AgentId) -> ModelResult<SirType> {
        self.registry.kind_of(agent)
    }

    pub fn has_source(&self, source: SourceId) -> bool {
        self.determinators.contains_key(&source)
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Pick a compartment for a pedestrian seen for the first time.
    ///
    /// One uniform draw is consumed per pedestrian even when the start-up
    /// quota alone already forces the infection.
    fn assign_new_agent(&mut self, agent: AgentId) -> ModelResult<SirType> {
        if self.registry.is_tracked(agent) {
            return Err(ModelError::AlreadyAssigned(agent));
        }
        let rng = self.rng.as_mut().ok_or(ModelError::NotInitialized)?;
        let r = rng.next_f64();
        let counts = &mut self.state.counts;
        let forced = counts.initially_infected < self.params.infections_at_start as usize;

        let kind = if r < self.params.infection_rate || forced {
            counts.infected += 1;
            counts.initially_infected += 1;
            SirType::Infected
        } else {
            counts.susceptible += 1;
            SirType::Susceptible
        };
        self.registry.assign(agent, kind)?;
        Ok(kind)
    }

    // ── Interval rollover ─────────────────────────────────────────────────

    fn close_interval(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        let rng = self.rng.as_mut().ok_or(ModelError::NotInitialized)?;
        let ids: Vec<AgentId> = topography.agent_ids().collect();

        let mut recoveries = 0usize;
        for &id in &ids {
            if self.registry.kind_of(id)? != SirType::Infected {
                continue;
            }
            if rng.next_f64() < self.params.recovery_rate {
                self.registry.reassign(id, SirType::Recovered.group_id())?;
                self.state.counts.transfer(SirType::Infected, SirType::Recovered);
                recoveries += 1;
            }
        }

        let ticks = self.state.updates_in_interval.max(1);
        let mut infections = 0usize;
        for &id in &ids {
            if self.registry.kind_of(id)? != SirType::Susceptible {
                continue;
            }
            let Some(pedestrian) = topography.pedestrian_mut(id) else {
                continue;
            };
            let trials = pedestrian.exposure / ticks;
            pedestrian.exposure = 0;
            for _ in 0..trials {
                if rng.next_f64() < self.params.infection_rate {
                    self.registry.reassign(id, SirType::Infected.group_id())?;
                    self.state.counts.transfer(SirType::Susceptible, SirType::Infected);
                    infections += 1;
                    break;
                }
            }
        }

        debug!(
            t = sim_time_secs,
            ticks,
            recoveries,
            infections,
            counts = ?self.state.counts,
            "SIR interval closed"
        );
        self.state.updates_in_interval = 0;
        self.state.last_interval_secs = sim_time_secs;
        Ok(())
    }
}

impl fmt::Debug for SirGroupModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SirGroupModel")
            .field("params", &self.params)
            .field("counts", &self.state.counts)
            .field("last_interval_secs", &self.state.last_interval_secs)
            .field("updates_in_interval", &self.state.updates_in_interval)
            .field("initialized", &self.rng.is_some())
            .finish_non_exhaustive()
    }
}

// ── GroupModel ────────────────────────────────────────────────────────────────

impl GroupModel for SirGroupModel {
    type Attributes = SirParams;
    type Group = SirGroup;

    /// Validate `attributes`, size the spatial index from the topography
    /// bounds and cell width, and reset all state.
    fn initialize(
        &mut self,
        attributes: SirParams,
        topography: &Topography,
        rng:        SimRng,
    ) -> ModelResult<()> {
        attributes.validate()?;
        let grid = LinkedCellsGrid::new(topography.bounds(), topography.attributes().bounding_box_width)?;

        info!(params = ?attributes, "SIR group model initialised");
        self.params = attributes;
        self.registry = GroupRegistry::new();
        self.state = ModelState::default();
        self.rng = Some(rng);
        self.grid = Some(grid);
        Ok(())
    }

    /// Assign every pedestrian already in the scenario, then listen for
    /// arrivals and departures.
    fn pre_loop(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        for kind in [ListenerKind::Added, ListenerKind::Removed] {
            if topography.has_listener(kind) {
                return Err(ModelError::ListenerConflict(kind));
            }
        }
        if self.rng.is_none() {
            return Err(ModelError::NotInitialized);
        }

        let initial: Vec<AgentId> = topography
            .agent_ids()
            .filter(|&id| !self.registry.is_tracked(id))
            .collect();
        for id in &initial {
            self.assign_new_agent(*id)?;
        }

        topography.register_listener(ListenerKind::Added);
        topography.register_listener(ListenerKind::Removed);
        info!(
            t = sim_time_secs,
            initial = initial.len(),
            counts = ?self.state.counts,
            "SIR listeners registered"
        );
        Ok(())
    }

    fn post_loop(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        topography.deregister_listener(ListenerKind::Added);
        topography.deregister_listener(ListenerKind::Removed);
        info!(t = sim_time_secs, counts = ?self.state.counts, "SIR listeners deregistered");
        Ok(())
    }

    fn update(&mut self, sim_time_secs: f64, topography: &mut Topography) -> ModelResult<()> {
        if topography.is_empty() {
            return Ok(());
        }
        self.state.updates_in_interval += 1;

        // Snapshot compartments before anything moves.
        let mut infected = Vec::new();
        let mut susceptible = Vec::new();
        for p in topography.pedestrians() {
            match self.registry.kind_of(p.id)? {
                SirType::Infected => infected.push((p.position, p.id)),
                SirType::Susceptible => susceptible.push((p.id, p.position)),
                SirType::Recovered => {}
            }
        }

        let grid = self.grid.as_mut().ok_or(ModelError::NotInitialized)?;
        grid.build(infected);
        let exposures = count_exposures(grid, &susceptible, self.params.infection_max_distance);
        for ((id, _), seen) in susceptible.iter().zip(exposures) {
            if let Some(p) = topography.pedestrian_mut(*id) {
                p.exposure = p.exposure.saturating_add(u32::try_from(seen).unwrap_or(u32::MAX));
            }
        }

        if sim_time_secs >= self.state.last_interval_secs + INTERVAL_SECS {
            self.close_interval(sim_time_secs, topography)?;
        }
        Ok(())
    }

    fn element_added(&mut self, pedestrian: &Pedestrian) -> ModelResult<()> {
        let kind = self.assign_new_agent(pedestrian.id)?;
        debug!(agent = %pedestrian.id, %kind, "pedestrian assigned");
        Ok(())
    }

    fn element_removed(&mut self, pedestrian: &Pedestrian) -> ModelResult<()> {
        match self.registry.remove(pedestrian.id) {
            Ok(kind) => {
                let slot = self.state.counts.slot(kind);
                *slot = slot.saturating_sub(1);
                debug!(agent = %pedestrian.id, %kind, "pedestrian left");
                Ok(())
            }
            Err(e) => {
                warn!(agent = %pedestrian.id, error = %e, "pedestrian removal rejected");
                Err(e)
            }
        }
    }

    fn get_group(&self, agent: AgentId) -> ModelResult<&SirGroup> {
        self.registry.group_of(agent)
    }

    fn groups_by_id(&self) -> &BTreeMap<GroupId, SirGroup> {
        self.registry.groups()
    }

    fn register_group_size_determinator(
        &mut self,
        source:       SourceId,
        determinator: Box<dyn GroupSizeDeterminator>,
    ) {
        self.determinators.insert(source, determinator);
    }

    /// SIR compartments are unbounded, so every source's next group is too.
    fn next_group_for_source(&mut self, _source: SourceId) -> usize {
        UNLIMITED
    }
}

// ── Exposure counting ─────────────────────────────────────────────────────────

#[cfg(not(feature = "parallel"))]
fn count_exposures(
    grid:        &LinkedCellsGrid<AgentId>,
    susceptible: &[(AgentId, Point)],
    radius:      f64,
) -> Vec<usize> {
    susceptible
        .iter()
        .map(|&(_, p)| grid.count_within(p, radius))
        .collect()
}

#[cfg(feature = "parallel")]
fn count_exposures(
    grid:        &LinkedCellsGrid<AgentId>,
    susceptible: &[(AgentId, Point)],
    radius:      f64,
) -> Vec<usize> {
    use rayon::prelude::*;

    susceptible
        .par_iter()
        .map(|&(_, p)| grid.count_within(p, radius))
        .collect()
}
