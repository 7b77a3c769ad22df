//! A single simulated pedestrian as seen by group models.

use sir_core::{AgentId, Point, SourceId};

/// One pedestrian in the topography.
///
/// Locomotion owns `position`; group models own `exposure`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pedestrian {
    pub id: AgentId,

    /// Current position in the topography plane.
    pub position: Point,

    /// The source that spawned this pedestrian.  `None` for pedestrians that
    /// were part of the scenario from the start.
    pub source: Option<SourceId>,

    /// Number of infected neighbours observed since the last interval
    /// rollover.  Reset by the SIR model at every interval boundary.
    pub exposure: u32,
}

impl Pedestrian {
    pub fn new(id: AgentId, position: Point) -> Self {
        Self { id, position, source: None, exposure: 0 }
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = Some(source);
        self
    }
}
