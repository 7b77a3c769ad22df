//! `sir-sim` — host tick loop for the crowd SIR simulation.
//!
//! # Tick loop
//!
//! ```text
//! model.pre_loop(0)
//! for tick in 0..config.total_ticks:
//!   ① Locomotion — PedestrianMover::step moves, spawns and removes
//!                  pedestrians; the topography queues added/removed events.
//!   ② Events     — queued events go to GroupModel::handle_event in order.
//!   ③ Update     — GroupModel::update(tick * step_secs).
//!   ④ Observe    — on_tick_end, then on_snapshot every output interval.
//! model.post_loop(end)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Counts exposures on Rayon's thread pool.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sir_agent::TopographyBuilder;
//! use sir_core::{Rect, SimConfig};
//! use sir_model::{SirGroupModel, SirParams};
//! use sir_sim::{NoopObserver, RandomWalk, SimBuilder};
//!
//! let topography = TopographyBuilder::new(Rect::new(0.0, 0.0, 20.0, 20.0))
//!     .pedestrians(points)
//!     .build()?;
//! let mut sim = SimBuilder::new(SimConfig::default(), topography, SirGroupModel::new(), SirParams::default())
//!     .mover(RandomWalk::new(1.0))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod mover;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use mover::{CorridorFlow, PedestrianMover, RandomWalk, Stationary};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
