//! Locomotion stand-ins.
//!
//! The group model never decides where pedestrians go; a `PedestrianMover`
//! does, once per tick, before events are dispatched to the model.

use std::f64::consts::TAU;

use sir_agent::Topography;
use sir_core::{AgentId, Point, SimRng, SourceId, Tick};

use crate::SimResult;

/// Moves, spawns and removes pedestrians.
pub trait PedestrianMover {
    fn step(
        &mut self,
        tick:       Tick,
        step_secs:  f64,
        topography: &mut Topography,
        rng:        &mut SimRng,
    ) -> SimResult<()>;
}

/// Nobody moves.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stationary;

impl PedestrianMover for Stationary {
    fn step(&mut self, _: Tick, _: f64, _: &mut Topography, _: &mut SimRng) -> SimResult<()> {
        Ok(())
    }
}

/// Each pedestrian takes one step of `speed * step_secs` metres in a uniform
/// random direction, clamped to the topography bounds.
#[derive(Copy, Clone, Debug)]
pub struct RandomWalk {
    /// Metres per second.
    pub speed: f64,
}

impl RandomWalk {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

impl PedestrianMover for RandomWalk {
    fn step(
        &mut self,
        _tick:      Tick,
        step_secs:  f64,
        topography: &mut Topography,
        rng:        &mut SimRng,
    ) -> SimResult<()> {
        let bounds = topography.bounds();
        let reach = self.speed * step_secs;
        for p in topography.pedestrians_mut() {
            let heading = rng.gen_range(0.0..TAU);
            let next = Point::new(
                p.position.x + reach * heading.cos(),
                p.position.y + reach * heading.sin(),
            );
            p.position = bounds.clamp(next);
        }
        Ok(())
    }
}

/// Left-to-right corridor traffic.
///
/// Every `spawn_every` ticks a source places one pedestrian at a random height
/// on the left edge.  Pedestrians walk right at `speed` with a little vertical
/// jitter and are removed once they reach the right edge.
#[derive(Copy, Clone, Debug)]
pub struct CorridorFlow {
    pub source:      SourceId,
    pub spawn_every: u64,
    /// Metres per second along the corridor.
    pub speed:       f64,
    /// Maximum sideways drift per tick in metres.
    pub jitter:      f64,
}

impl CorridorFlow {
    pub fn new(source: SourceId, spawn_every: u64, speed: f64) -> Self {
        Self { source, spawn_every, speed, jitter: 0.1 }
    }
}

impl PedestrianMover for CorridorFlow {
    fn step(
        &mut self,
        tick:       Tick,
        step_secs:  f64,
        topography: &mut Topography,
        rng:        &mut SimRng,
    ) -> SimResult<()> {
        let bounds = topography.bounds();
        let exit_x = bounds.x + bounds.width;
        let advance = self.speed * step_secs;

        let mut arrived: Vec<AgentId> = Vec::new();
        for p in topography.pedestrians_mut() {
            let drift = if self.jitter > 0.0 {
                rng.gen_range(-self.jitter..=self.jitter)
            } else {
                0.0
            };
            let next = bounds.clamp(Point::new(p.position.x + advance, p.position.y + drift));
            p.position = next;
            if next.x >= exit_x {
                arrived.push(p.id);
            }
        }
        for id in arrived {
            topography.remove_pedestrian(id)?;
        }

        if self.spawn_every > 0 && tick.0.is_multiple_of(self.spawn_every) {
            let y = bounds.y + rng.gen_range(0.0..=bounds.height);
            topography.spawn_pedestrian(self.source, Point::new(bounds.x, y));
        }
        Ok(())
    }
}
