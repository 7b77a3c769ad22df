//! `sir-spatial` — uniform-grid spatial indexing.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`grid`]  | `LinkedCellsGrid<T>` (bucket grid with radius queries)        |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `sir-core` types.       |

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::{CellCoord, LinkedCellsGrid};
