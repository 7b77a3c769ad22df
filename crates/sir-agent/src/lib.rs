//! `sir-agent` — the host's pedestrian container.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`pedestrian`]  | `Pedestrian` (position + exposure counter)                |
//! | [`topography`]  | `Topography`, `TopographyAttributes`                      |
//! | [`event`]       | `ElementEvent`, `ListenerKind`                            |
//! | [`builder`]     | `TopographyBuilder` (fluent construction)                 |
//!
//! # Listener model
//!
//! Group models do not hold references into the topography.  Instead they
//! *register interest* in pedestrian arrivals and departures; from then on the
//! topography queues an [`ElementEvent`] for every matching change and the
//! host loop drains the queue into the model before the next update.  Nothing
//! is queued for a kind nobody listens to.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod event;
pub mod pedestrian;
pub mod topography;

#[cfg(test)]
mod tests;

pub use builder::TopographyBuilder;
pub use event::{ElementEvent, ListenerKind};
pub use pedestrian::Pedestrian;
pub use topography::{Topography, TopographyAttributes};
