//! `sir-core` — foundational types for the crowd SIR simulation.
//!
//! This crate is a dependency of every other `sir-*` crate.  It intentionally
//! has no `sir-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `GroupId`, `SourceId`                      |
//! | [`geo`]         | `Point`, `Rect` (planar, metres)                      |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (the single shared random stream)            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Point, Rect};
pub use ids::{AgentId, GroupId, SourceId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
