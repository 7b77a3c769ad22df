//! `sir-model` — the Susceptible / Infected / Recovered group model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`model`]      | `GroupModel`, `Group`, `GroupSizeDeterminator` traits        |
//! | [`sir_type`]   | `SirType` compartments and their reserved group IDs          |
//! | [`group`]      | `SirGroup` member sets                                       |
//! | [`registry`]   | `GroupRegistry`: groups plus the agent → group map           |
//! | [`params`]     | `SirParams`: the four epidemic attributes                    |
//! | [`sir`]        | `SirGroupModel`, `SirCounts`                                 |
//! | [`error`]      | `ModelError`, `ModelResult<T>`                               |
//!
//! # Design notes
//!
//! Each tick splits into two phases:
//!
//! 1. **Exposure phase** (read-only, parallel with the `parallel` feature):
//!    infected positions go into a linked-cells grid and every susceptible
//!    pedestrian counts its infected neighbours.
//!
//! 2. **Transition phase** (sequential, ascending `AgentId`): on interval
//!    boundaries, recoveries and then infections are drawn from the model's
//!    single `SimRng` and applied to the registry.
//!
//! Nothing in phase 1 observes a transition made in phase 2 of the same tick.

pub mod error;
pub mod group;
pub mod model;
pub mod params;
pub mod registry;
pub mod sir;
pub mod sir_type;


pub use error::{ModelError, ModelResult};
pub use group::{SirGroup, UNLIMITED};
pub use model::{Group, GroupModel, GroupSizeDeterminator};
pub use params::SirParams;
pub use registry::GroupRegistry;
pub use sir::{INTERVAL_SECS, SirCounts, SirGroupModel};
pub use sir_type::SirType;
