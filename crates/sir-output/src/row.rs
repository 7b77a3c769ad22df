//! Plain data row types written by output backends.

/// One pedestrian's group at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedestrianGroupRow {
    pub pedestrian_id: u32,
    pub tick:          u64,
    pub sim_time_secs: f64,
    /// 0 = susceptible, 1 = infected, 2 = recovered.
    pub group_id:      u32,
}

/// Compartment sizes at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupCountRow {
    pub tick:          u64,
    pub sim_time_secs: f64,
    pub susceptible:   u64,
    pub infected:      u64,
    pub recovered:     u64,
}
